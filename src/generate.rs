//! HTML site generation.
//!
//! Stage 2 of the Folio build pipeline. Takes the scan manifest and writes the
//! final static site.
//!
//! ## Generated Files
//!
//! - **Document pages** (`/{slug}/index.html`): one per renderable document,
//!   rendered with the template its front matter selects
//! - **Blog index** (`/posts/index.html`, `/posts/page/N/index.html`)
//! - **Feeds**: `rss.xml` (published posts) and `sitemap.xml` (published pages)
//! - **Assets**: fingerprinted stylesheet, `garden.js`, `contact.js`
//! - **Static files**: everything under `content/static/`, copied as-is,
//!   last. A static file may not replace anything written above.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                   # Landing page (slug "/")
//! ├── style-3f2a9c1e.css           # Stylesheet, named by content hash
//! ├── garden.js
//! ├── contact.js
//! ├── rss.xml
//! ├── sitemap.xml
//! ├── pages/about/index.html
//! ├── posts/
//! │   ├── index.html               # Blog index, page 1
//! │   ├── page/2/index.html
//! │   └── heroku-export/index.html
//! └── media/...                    # From content/static/media/
//! ```
//!
//! With `path_prefix = "/blog/"` everything above moves under `dist/blog/`.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time from `static/`. The stylesheet
//! file name carries the first 8 hex digits of its SHA-256, so a changed
//! stylesheet never collides with a cached one.
//!
//! Pages are independent of each other and are rendered in parallel.

use crate::feed;
use crate::metadata::SiteMetadata;
use crate::naming::is_safe_slug;
use crate::scan::{CONTACT_SCRIPT, GARDEN_SCRIPT, Manifest, RSS_FILE, SITEMAP_FILE};
use crate::templates::{
    AssetPaths, RenderContext, TemplateError, posts_page_count, posts_page_slug, render_document,
    render_posts_index,
};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    #[error("Feed error: {0}")]
    Feed(String),
    #[error("slug {0:?} would be written outside its page directory")]
    UnsafeSlug(String),
    #[error("static file {0} would overwrite a generated file")]
    StaticCollision(PathBuf),
}

const CSS: &str = include_str!("../static/style.css");
const GARDEN_JS: &str = include_str!("../static/garden.js");
const CONTACT_JS: &str = include_str!("../static/contact.js");

/// Per-run switches that are not part of the site configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Render drafts even when the config does not ask for them.
    pub include_drafts: bool,
}

/// A page written by the generate stage.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub title: String,
    pub slug: String,
    /// Output path relative to the output directory.
    pub path: String,
    pub draft: bool,
}

/// What the generate stage wrote.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub index_pages: usize,
    pub feed_items: usize,
    pub stylesheet: String,
    pub static_files: usize,
}

/// Generate the site from a manifest file written by the scan stage.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    options: GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_root, output_dir, options)
}

/// Generate the site from an in-memory manifest.
pub fn generate_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
    options: GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let meta = SiteMetadata::new(config);
    let site_root = output_dir.join(config.path_prefix.trim_matches('/'));
    fs::create_dir_all(&site_root)?;

    let stylesheet = stylesheet_name(CSS);
    let mut written = HashSet::new();
    for (name, contents) in [
        (stylesheet.as_str(), CSS),
        (GARDEN_SCRIPT, GARDEN_JS),
        (CONTACT_SCRIPT, CONTACT_JS),
    ] {
        let path = site_root.join(name);
        fs::write(&path, contents)?;
        written.insert(path);
    }

    let assets = AssetPaths::new(&meta, &stylesheet);
    let ctx = RenderContext {
        meta,
        content: &manifest.content,
        assets: &assets,
    };

    let include_drafts = options.include_drafts || config.include_drafts;
    let documents: Vec<_> = manifest.content.renderable(include_drafts).collect();
    let pages = documents
        .par_iter()
        .map(|doc| -> Result<(GeneratedPage, PathBuf), GenerateError> {
            let html = render_document(doc, &ctx);
            let path = write_page(&site_root, &doc.slug, &html.into_string())?;
            let page = GeneratedPage {
                title: doc.title().to_string(),
                slug: doc.slug.clone(),
                path: relative_display(output_dir, &path),
                draft: doc.is_draft(),
            };
            Ok((page, path))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;
    let pages: Vec<GeneratedPage> = pages
        .into_iter()
        .map(|(page, path)| {
            written.insert(path);
            page
        })
        .collect();

    let index_pages = posts_page_count(&ctx);
    for page in 1..=index_pages {
        let html = render_posts_index(page, &ctx)?;
        written.insert(write_page(&site_root, &posts_page_slug(page), &html.into_string())?);
    }

    let rss = feed::render_rss(&meta, &manifest.content).map_err(GenerateError::Feed)?;
    let sitemap = feed::render_sitemap(&meta, &manifest.content, index_pages);
    for (name, contents) in [(RSS_FILE, rss), (SITEMAP_FILE, sitemap)] {
        let path = site_root.join(name);
        fs::write(&path, contents)?;
        written.insert(path);
    }

    let static_dir = source_root.join("static");
    let static_files = if static_dir.is_dir() {
        copy_dir_recursive(&static_dir, &site_root, &written)?
    } else {
        0
    };

    Ok(GenerateReport {
        pages,
        index_pages,
        feed_items: manifest.content.posts().len(),
        stylesheet,
        static_files,
    })
}

/// `style-{first 8 hex digits of sha256}.css`
pub fn stylesheet_name(css: &str) -> String {
    let digest = Sha256::digest(css.as_bytes());
    let hex = format!("{:x}", digest);
    format!("style-{}.css", &hex[..8])
}

/// Output file for a slug: `/` → `index.html`, `/a/b` → `a/b/index.html`.
pub fn page_path(site_root: &Path, slug: &str) -> PathBuf {
    let trimmed = slug.trim_matches('/');
    if trimmed.is_empty() {
        site_root.join("index.html")
    } else {
        site_root.join(trimmed).join("index.html")
    }
}

fn write_page(site_root: &Path, slug: &str, html: &str) -> Result<PathBuf, GenerateError> {
    if !is_safe_slug(slug) {
        return Err(GenerateError::UnsafeSlug(slug.to_string()));
    }
    let path = page_path(site_root, slug);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html)?;
    Ok(path)
}

fn relative_display(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Copy a directory tree, returning the number of files copied.
///
/// Fails before touching a file the build has already written in this run.
fn copy_dir_recursive(
    src: &Path,
    dst: &Path,
    written: &HashSet<PathBuf>,
) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            if written.contains(&dst_path) {
                return Err(GenerateError::StaticCollision(src_path));
            }
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path, written)?;
        } else {
            if written.contains(&dst_path) {
                return Err(GenerateError::StaticCollision(src_path));
            }
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}
