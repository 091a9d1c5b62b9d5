//! Content tree scanning and manifest generation.
//!
//! Stage 1 of the Folio build pipeline. Walks the content root, resolves every
//! markdown document to a [`ContentDocument`], loads the site configuration and
//! bundles everything into a [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                             # Content root
//! ├── config.toml                      # Site configuration (required)
//! ├── index.md                         # → /            (template: landing)
//! ├── pages/
//! │   ├── 010-about.md                 # → /pages/about
//! │   └── projects.md                  # → /pages/projects (template: projects)
//! ├── posts/
//! │   └── 2020-05-12---heroku-export.md  # → /posts/heroku-export
//! ├── digital-garden/
//! │   ├── index.md                     # → /digital-garden
//! │   └── heroku.md                    # → /digital-garden/heroku
//! ├── static/                          # Copied verbatim, never scanned
//! └── .drafts/                         # Hidden: skipped
//! ```
//!
//! ## Resolution Rules
//!
//! - Files are sorted by relative path before anything else, so the result
//!   never depends on directory iteration order.
//! - The slug is the front matter `slug` when present, otherwise derived from
//!   the path (see [`crate::naming`]).
//! - The title is the front matter `title`, falling back to the first
//!   `# heading` of the body.
//! - An explicit slug may not contain empty, `.` or `..` segments.
//! - `/posts` and `/posts/page/N` belong to the generated blog index, and
//!   the generated assets (`rss.xml`, `sitemap.xml`, `garden.js`,
//!   `contact.js`, `style-*.css`) own their names at the site root. Neither
//!   can be claimed by a document.
//!
//! Resolution either succeeds for the whole tree or fails with the first
//! offending file; there is no partial content set.

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontMatterError};
use crate::integrity::{self, LinkIntegrityWarning};
use crate::naming::{explicit_slug, normalize_slug, slug_from_relative_path};
use crate::types::{ContentDocument, FeedEntry, FrontMatter, Template};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path}: {message}")]
    FrontMatter { path: PathBuf, message: String },
    #[error("{path}: unknown template `{selector}`")]
    UnknownTemplate { path: PathBuf, selector: String },
    #[error("{path}: unparseable date {value:?}")]
    InvalidDate { path: PathBuf, value: String },
    #[error("{path}: no title in front matter and no `# heading` in the body")]
    MissingTitle { path: PathBuf },
    #[error("{path}: slug {slug} is reserved for generated output")]
    ReservedSlug { path: PathBuf, slug: String },
    #[error("{path}: slug {slug:?} has an empty, `.` or `..` segment")]
    InvalidSlug { path: PathBuf, slug: String },
    #[error("duplicate slug {slug}: {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    pub content: ContentSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LinkIntegrityWarning>,
}

/// A markdown file read from the content tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Path relative to the content root.
    pub path: PathBuf,
    pub contents: String,
}

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Directory names under the content root that never hold documents.
const SKIPPED_DIRS: &[&str] = &["static", "dist", "node_modules"];

/// Prefix of the generated blog index routes.
pub const POSTS_INDEX: &str = "/posts";

pub const RSS_FILE: &str = "rss.xml";
pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const GARDEN_SCRIPT: &str = "garden.js";
pub const CONTACT_SCRIPT: &str = "contact.js";

/// Files the generate stage writes at the site root.
pub const GENERATED_FILES: &[&str] = &[RSS_FILE, SITEMAP_FILE, GARDEN_SCRIPT, CONTACT_SCRIPT];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let files = read_tree(root)?;
    let content = ContentSet::new(resolve_content(files)?);

    let mut warnings = integrity::check_config(&config);
    warnings.extend(integrity::check_links(&config, &content));

    Ok(Manifest {
        config,
        content,
        warnings,
    })
}

/// Read every markdown file under `root`.
///
/// Hidden entries and the asset/output directories are skipped.
pub fn read_tree(root: &Path) -> Result<Vec<SourceFile>, ContentError> {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            let skipped_dir = e.depth() == 1
                && e.file_type().is_dir()
                && SKIPPED_DIRS.contains(&name.as_ref());
            !name.starts_with('.') && !skipped_dir
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        let contents = fs::read_to_string(entry.path())?;
        files.push(SourceFile {
            path: relative,
            contents,
        });
    }
    Ok(files)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.as_str()))
}

/// Resolve source files into documents.
///
/// Pure: the same files always give the same documents in the same order.
pub fn resolve_content(mut files: Vec<SourceFile>) -> Result<Vec<ContentDocument>, ContentError> {
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut documents = Vec::with_capacity(files.len());
    for file in &files {
        let doc = resolve_document(file)?;
        if let Some(first) = seen.get(&doc.slug) {
            return Err(ContentError::DuplicateSlug {
                slug: doc.slug,
                first: first.clone(),
                second: file.path.clone(),
            });
        }
        seen.insert(doc.slug.clone(), file.path.clone());
        documents.push(doc);
    }
    Ok(documents)
}

fn resolve_document(file: &SourceFile) -> Result<ContentDocument, ContentError> {
    let path = &file.path;
    let (raw, body) = frontmatter::parse(&file.contents).map_err(|e| front_matter_error(path, e))?;

    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| frontmatter::first_heading(body))
        .ok_or_else(|| ContentError::MissingTitle { path: path.clone() })?;

    let template = match raw.template.as_deref() {
        None => Template::default(),
        Some(selector) => selector
            .parse::<Template>()
            .map_err(|_| ContentError::UnknownTemplate {
                path: path.clone(),
                selector: selector.to_string(),
            })?,
    };

    if let Some(value) = raw.date.as_deref()
        && frontmatter::parse_date(value).is_none()
    {
        return Err(ContentError::InvalidDate {
            path: path.clone(),
            value: value.to_string(),
        });
    }

    let slug = match raw.slug.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(explicit) => explicit_slug(explicit).ok_or_else(|| ContentError::InvalidSlug {
            path: path.clone(),
            slug: explicit.to_string(),
        })?,
        None => slug_from_relative_path(path),
    };
    if is_reserved(&slug) {
        return Err(ContentError::ReservedSlug {
            path: path.clone(),
            slug,
        });
    }

    Ok(ContentDocument {
        slug,
        source_path: path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        frontmatter: FrontMatter {
            title,
            date: raw.date,
            template,
            draft: raw.draft,
            description: raw.description.filter(|d| !d.trim().is_empty()),
            social_image: raw.social_image.filter(|s| !s.trim().is_empty()),
            slug: raw.slug,
        },
        body: body.to_string(),
    })
}

fn front_matter_error(path: &Path, err: FrontMatterError) -> ContentError {
    ContentError::FrontMatter {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// `/posts`, `/posts/page/...` and anything under a generated asset name.
fn is_reserved(slug: &str) -> bool {
    let first = slug.trim_start_matches('/').split('/').next().unwrap_or_default();
    slug == POSTS_INDEX
        || slug
            .strip_prefix(POSTS_INDEX)
            .is_some_and(|rest| rest == "/page" || rest.starts_with("/page/"))
        || GENERATED_FILES.contains(&first)
        || (first.starts_with("style-") && first.ends_with(".css"))
}

/// The resolved documents of a site, in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSet {
    documents: Vec<ContentDocument>,
}

impl ContentSet {
    pub fn new(documents: Vec<ContentDocument>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentDocument> {
        self.documents.iter()
    }

    /// Look up a document by slug. The slug is normalised first, so `about/`
    /// and `/about` find the same document.
    pub fn get(&self, slug: &str) -> Option<&ContentDocument> {
        let slug = normalize_slug(slug);
        self.documents.iter().find(|d| d.slug == slug)
    }

    /// Non-draft documents.
    pub fn published(&self) -> impl Iterator<Item = &ContentDocument> {
        self.documents.iter().filter(|d| !d.is_draft())
    }

    /// Documents that get a page of their own.
    pub fn renderable(&self, include_drafts: bool) -> impl Iterator<Item = &ContentDocument> {
        self.documents
            .iter()
            .filter(move |d| include_drafts || !d.is_draft())
    }

    /// Published posts, newest first. Undated posts sort last.
    pub fn posts(&self) -> Vec<&ContentDocument> {
        let mut posts: Vec<_> = self
            .published()
            .filter(|d| d.template() == Template::Post)
            .collect();
        posts.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| a.slug.cmp(&b.slug)));
        posts
    }

    /// Feed entries for published posts, newest first.
    pub fn feed_entries(&self) -> Vec<FeedEntry> {
        self.posts()
            .into_iter()
            .map(|d| FeedEntry {
                title: d.title().to_string(),
                date: d.date(),
                slug: d.slug.clone(),
                description: d.frontmatter.description.clone(),
                html: d.render_body(),
            })
            .collect()
    }

    /// True when some document's slug is `path` or lies beneath it.
    pub fn has_prefix(&self, path: &str) -> bool {
        let path = normalize_slug(path);
        if path == "/" {
            return !self.documents.is_empty();
        }
        let nested = format!("{path}/");
        self.documents
            .iter()
            .any(|d| d.slug == path || d.slug.starts_with(&nested))
    }
}
