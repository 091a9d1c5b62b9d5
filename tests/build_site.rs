//! End-to-end build of the fixture site.
//!
//! Runs the library pipeline and the `folio` binary against a temporary copy
//! of `fixtures/content` and inspects the generated HTML.

use folio::pipeline::{self, BuildOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn copy_dir(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}

fn content_copy() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir(&fixtures(), tmp.path());
    tmp
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

// ---------------------------------------------------------------------------
// Library pipeline
// ---------------------------------------------------------------------------

#[test]
fn builds_every_template() {
    let content = content_copy();
    let out = TempDir::new().unwrap();
    let report = pipeline::build(content.path(), out.path(), &BuildOptions::default()).unwrap();
    let site = out.path();

    let home = read(site, "index.html");
    assert!(home.contains("<title>Home - Ramonak.io</title>"));
    assert!(home.contains("My Recent Work"));
    assert!(home.contains("id=\"contact\""));

    let projects = read(site, "pages/projects/index.html");
    assert!(projects.contains("Coffee Sales Dashboard"));
    assert!(projects.contains("https://github.com/KaterinaLupacheva/coffee-dashboard"));

    let post = read(site, "posts/heroku-export/index.html");
    assert!(post.contains("datetime=\"2020-05-12\""));
    assert!(post.contains("heroku pg:backups:capture"));

    let garden = read(site, "digital-garden/heroku/index.html");
    assert_eq!(garden.matches("card-container selected").count(), 1);
    assert!(garden.contains("heroku logs --tail"));

    assert!(report.manifest.warnings.is_empty());
    assert_eq!(report.generated.feed_items, 2);
}

#[test]
fn sidebar_marks_current_menu_entry() {
    let content = content_copy();
    let out = TempDir::new().unwrap();
    pipeline::build(content.path(), out.path(), &BuildOptions::default()).unwrap();

    let about = read(out.path(), "pages/about/index.html");
    assert!(about.contains(
        "<li class=\"menu-item current\"><a href=\"/pages/about/\" aria-current=\"page\">About</a>"
    ));
    assert!(about.contains("https://twitter.com/ramonak_io"));
    assert!(!about.contains("linkedin.com"));
}

#[test]
fn blog_index_lists_newest_first() {
    let content = content_copy();
    let out = TempDir::new().unwrap();
    pipeline::build(content.path(), out.path(), &BuildOptions::default()).unwrap();

    let index = read(out.path(), "posts/index.html");
    let git = index.find("Git aliases I use every day").unwrap();
    let heroku = index.find("How to export a Heroku Postgres database").unwrap();
    assert!(git < heroku);
    assert!(!index.contains("Work in progress"));
}

#[test]
fn drafts_render_but_stay_out_of_feeds() {
    let content = content_copy();
    let out = TempDir::new().unwrap();
    let options = BuildOptions {
        include_drafts: true,
        temp_dir: None,
    };
    pipeline::build(content.path(), out.path(), &options).unwrap();

    assert!(out.path().join("posts/work-in-progress/index.html").exists());
    assert!(!read(out.path(), "rss.xml").contains("work-in-progress"));
    assert!(!read(out.path(), "sitemap.xml").contains("work-in-progress"));
    assert!(!read(out.path(), "posts/index.html").contains("Work in progress"));
}

#[test]
fn feeds_use_absolute_urls() {
    let content = content_copy();
    let out = TempDir::new().unwrap();
    pipeline::build(content.path(), out.path(), &BuildOptions::default()).unwrap();

    let rss = read(out.path(), "rss.xml");
    assert!(rss.contains("<link>https://ramonak.io/posts/heroku-export/</link>"));
    let sitemap = read(out.path(), "sitemap.xml");
    assert!(sitemap.contains("<loc>https://ramonak.io/pages/about/</loc>"));
    assert!(sitemap.contains("<loc>https://ramonak.io/posts/</loc>"));
}

#[test]
fn dangling_menu_entry_warns_but_builds() {
    let content = content_copy();
    let config = fs::read_to_string(content.path().join("config.toml")).unwrap();
    let config = config.replacen("path = \"/pages/about\"", "path = \"/about\"", 1);
    fs::write(content.path().join("config.toml"), config).unwrap();

    let out = TempDir::new().unwrap();
    let report = pipeline::build(content.path(), out.path(), &BuildOptions::default()).unwrap();
    assert_eq!(report.manifest.warnings.len(), 1);
    assert!(report.manifest.warnings[0].to_string().contains("/about"));
    assert!(out.path().join("index.html").exists());
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

#[test]
fn cli_scan_then_generate() {
    let content = content_copy();
    let work = TempDir::new().unwrap();
    let temp_dir = work.path().join(".folio-temp");
    let output = work.path().join("dist");
    let bin = env!("CARGO_BIN_EXE_folio");

    for stage in ["scan", "generate"] {
        let status = Command::new(bin)
            .arg(stage)
            .arg("--source")
            .arg(content.path())
            .arg("--output")
            .arg(&output)
            .arg("--temp-dir")
            .arg(&temp_dir)
            .status()
            .expect("failed to run folio");
        assert!(status.success(), "folio {stage} failed");
    }

    assert!(temp_dir.join("manifest.json").exists());
    assert!(output.join("index.html").exists());
    assert!(output.join("rss.xml").exists());
}

#[test]
fn cli_check_rejects_unknown_template() {
    let content = content_copy();
    fs::write(
        content.path().join("pages/bad.md"),
        "---\ntitle: Bad\ntemplate: gallery\n---\n",
    )
    .unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_folio"))
        .arg("check")
        .arg("--source")
        .arg(content.path())
        .output()
        .expect("failed to run folio");
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("gallery"), "{stderr}");
}

#[test]
fn cli_gen_config_is_valid() {
    let result = Command::new(env!("CARGO_BIN_EXE_folio"))
        .arg("gen-config")
        .output()
        .expect("failed to run folio");
    assert!(result.status.success());
    let text = String::from_utf8(result.stdout).unwrap();
    folio::config::parse_config(&text).unwrap();
}
