use clap::{Parser, Subcommand};
use folio::generate::{self, GenerateOptions};
use folio::{config, output, pipeline, scan};
use std::path::PathBuf;

/// Shared flags for commands that render pages.
#[derive(clap::Args, Clone)]
struct DraftArgs {
    /// Render draft documents (never added to rss.xml or sitemap.xml)
    #[arg(long)]
    drafts: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("FOLIO_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("FOLIO_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for a personal blog, portfolio and digital garden")]
#[command(long_about = "\
Static site generator for a personal blog, portfolio and digital garden

Markdown files become pages; config.toml holds everything that is not a page:
the menu, the author and contacts, projects, recent work and garden cards.

Content structure:

  content/
  ├── config.toml                      # Site config (required)
  ├── index.md                         # Landing page (template: landing)
  ├── pages/
  │   ├── 010-about.md                 # → /pages/about
  │   └── 020-projects.md              # → /pages/projects (template: projects)
  ├── posts/
  │   └── 2020-05-12---heroku.md       # → /posts/heroku (template: post)
  ├── digital-garden/
  │   ├── index.md                     # → /digital-garden (template: digital-garden)
  │   └── heroku.md                    # Detail for the \"Heroku\" garden card
  └── static/                          # Copied to the output root as-is

Front matter (YAML between --- or TOML between +++):
  title, date, template, draft, description, socialImage, slug

Templates: page (default), post, landing, projects, digital-garden

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".folio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate(DraftArgs),
    /// Run the full pipeline: scan → generate
    Build(DraftArgs),
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            pipeline::write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate(draft_args) => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(
                &manifest_path,
                &cli.source,
                &cli.output,
                GenerateOptions {
                    include_drafts: draft_args.drafts,
                },
            )?;
            output::print_generate_output(&report);
        }
        Command::Build(draft_args) => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            pipeline::write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate_site(
                &manifest,
                &cli.source,
                &cli.output,
                GenerateOptions {
                    include_drafts: draft_args.drafts,
                },
            )?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = pipeline::check(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            if manifest.warnings.is_empty() {
                println!("==> Content is valid");
            } else {
                println!(
                    "==> Content is valid ({} warnings)",
                    manifest.warnings.len()
                );
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
