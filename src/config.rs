//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root. The
//! configuration is read exactly once per build and is immutable afterwards;
//! every template and component receives it (or a narrowed view of it, see
//! [`crate::metadata`]) as a parameter.
//!
//! ## Configuration Options
//!
//! ```toml
//! url = "https://example.com"      # required
//! title = "Example"                # required
//! path_prefix = "/"
//! subtitle = "Personal site and blog"
//! copyright = "© All rights reserved."
//! google_analytics_id = "UA-0000"  # or FOLIO_GOOGLE_ANALYTICS in the environment
//! disqus_shortname = "example"
//! posts_per_page = 8
//! include_drafts = false
//!
//! [[menu]]                         # at least one entry
//! label = "Home"
//! path = "/"
//!
//! [author]
//! name = "Jane Doe"                # required
//! photo = "/photo.jpg"
//! bio = "Full-stack web developer"
//!
//! [author.contacts]
//! twitter = "jane"
//! facebook = "#"                   # placeholder: not rendered
//!
//! [[projects]]
//! title = "Personal site"
//! image = "/media/projects/site.jpg"
//! description = "..."
//! link = ""                        # optional live demo
//! techs = ["Rust"]
//! source_code = "https://github.com/jane/site"
//!
//! [[recent_work]]
//! title = "Dashboard"
//! date = "May 2020"
//! image = "/media/mockups/dash.png"
//! description = "..."
//! link = "https://dash.example.com"
//! techs = ["Rust"]
//!
//! [[digital_garden]]
//! title = "Heroku"
//! image = "/media/heroku.png"
//! link = "/digital-garden/heroku"
//! date = "June 2020"
//! ```
//!
//! Unknown keys are rejected to catch typos early. Camel-case spellings of
//! the multi-word keys (`pathPrefix`, `sourceCode`, `recentWork`, ...) are
//! accepted as aliases.

use crate::contacts::ContactChannel;
use crate::naming::{normalize_path_prefix, normalize_slug, slugify};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding `google_analytics_id`.
pub const ANALYTICS_ENV: &str = "FOLIO_GOOGLE_ANALYTICS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("menu must contain at least one entry")]
    EmptyMenu,
    #[error("duplicate menu path: {0}")]
    DuplicateMenuPath(String),
    #[error("{field} is not a valid URL: {value:?}")]
    InvalidUrl { field: String, value: String },
    #[error("unknown contact channel `{0}`")]
    UnknownContactChannel(String),
    #[error("duplicate digital garden key: {0}")]
    DuplicateGardenKey(String),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Canonical site URL, used for feeds, sitemap and `og:image`.
    pub url: String,
    /// URL path the site is served under. Normalised to `/.../`.
    #[serde(alias = "pathPrefix")]
    pub path_prefix: String,
    pub title: String,
    pub subtitle: String,
    pub copyright: String,
    #[serde(alias = "googleAnalyticsId", skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    /// Enables the comment thread under posts.
    #[serde(alias = "disqusShortname", skip_serializing_if = "Option::is_none")]
    pub disqus_shortname: Option<String>,
    /// Number of posts per blog index page.
    #[serde(alias = "postsPerPage")]
    pub posts_per_page: usize,
    /// Render draft documents as pages (they never reach feeds or the sitemap).
    pub include_drafts: bool,
    pub contact: ContactConfig,
    pub menu: Vec<MenuItem>,
    pub author: Author,
    pub projects: Vec<Project>,
    #[serde(alias = "recentWork")]
    pub recent_work: Vec<WorkItem>,
    #[serde(alias = "digitalGarden")]
    pub digital_garden: Vec<GardenEntry>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            path_prefix: "/".to_string(),
            title: String::new(),
            subtitle: String::new(),
            copyright: String::new(),
            google_analytics_id: None,
            disqus_shortname: None,
            posts_per_page: 8,
            include_drafts: false,
            contact: ContactConfig::default(),
            menu: Vec::new(),
            author: Author::default(),
            projects: Vec::new(),
            recent_work: Vec::new(),
            digital_garden: Vec::new(),
        }
    }
}

/// A navigation entry. Order in the file is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuItem {
    pub label: String,
    pub path: String,
}

/// Site author and published contact handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Author {
    pub name: String,
    pub photo: String,
    pub bio: String,
    /// Channel name → handle. See [`crate::contacts`].
    pub contacts: BTreeMap<String, String>,
}

/// Contact form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Where the contact form posts to. Empty disables the form.
    pub endpoint: String,
    /// Form name sent along with the submission (Netlify form handling).
    pub form_name: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "/".to_string(),
            form_name: "contact".to_string(),
        }
    }
}

/// A portfolio project. `source_code` is required, `link` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Live demo URL; empty means "no live demo".
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub techs: Vec<String>,
    #[serde(alias = "sourceCode")]
    pub source_code: String,
}

/// A "recent work" showcase entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkItem {
    pub title: String,
    /// Display string, not necessarily ISO (e.g. "May 2020").
    pub date: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub techs: Vec<String>,
}

/// A digital-garden note card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GardenEntry {
    /// Stable identifier. Assigned at load time when not written explicitly.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub image: String,
    pub title: String,
    /// Slug of the content document holding this note's detail.
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub date: String,
}

/// `""` and `"#"` mean "intentionally unpublished" wherever a link is optional.
pub fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "#"
}

impl SiteConfig {
    /// Normalise derived fields: path prefix and garden keys.
    ///
    /// Idempotent; called by [`load_config`] before validation.
    pub fn finalize(&mut self) {
        self.path_prefix = normalize_path_prefix(&self.path_prefix);
        let mut taken: HashSet<String> = self
            .digital_garden
            .iter()
            .map(|e| e.key.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        for entry in &mut self.digital_garden {
            if entry.key.trim().is_empty() {
                let base = garden_key(entry);
                let mut key = base.clone();
                let mut n = 2;
                while taken.contains(&key) {
                    key = format!("{base}-{n}");
                    n += 1;
                }
                taken.insert(key.clone());
                entry.key = key;
            }
        }
    }

    /// Validate required fields, URLs and identifier uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::MissingField("url"));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingField("title"));
        }
        if self.author.name.trim().is_empty() {
            return Err(ConfigError::MissingField("author.name"));
        }
        if self.menu.is_empty() {
            return Err(ConfigError::EmptyMenu);
        }
        if self.posts_per_page == 0 {
            return Err(ConfigError::Validation(
                "posts_per_page must be at least 1".into(),
            ));
        }

        check_url("url", &self.url, false)?;

        let mut menu_paths = HashSet::new();
        for item in &self.menu {
            let path = menu_path_key(&item.path);
            if !menu_paths.insert(path.clone()) {
                return Err(ConfigError::DuplicateMenuPath(path));
            }
        }

        for name in self.author.contacts.keys() {
            if ContactChannel::from_name(name).is_none() {
                return Err(ConfigError::UnknownContactChannel(name.clone()));
            }
        }

        for (i, project) in self.projects.iter().enumerate() {
            check_url(&format!("projects[{i}].source_code"), &project.source_code, true)?;
            check_url(&format!("projects[{i}].link"), &project.link, true)?;
        }
        for (i, work) in self.recent_work.iter().enumerate() {
            check_url(&format!("recent_work[{i}].link"), &work.link, true)?;
        }

        let mut keys = HashSet::new();
        for entry in &self.digital_garden {
            if !keys.insert(entry.key.as_str()) {
                return Err(ConfigError::DuplicateGardenKey(entry.key.clone()));
            }
        }
        Ok(())
    }

    /// Apply environment overrides through `lookup` (usually `std::env::var`).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(id) = lookup(ANALYTICS_ENV).filter(|v| !v.trim().is_empty()) {
            self.google_analytics_id = Some(id);
        }
    }
}

/// Key for a garden entry: its link slug, falling back to its title slug.
fn garden_key(entry: &GardenEntry) -> String {
    let from_link = if is_placeholder(&entry.link) {
        String::new()
    } else {
        slugify(&entry.link)
    };
    let key = if from_link.is_empty() {
        slugify(&entry.title)
    } else {
        from_link
    };
    if key.is_empty() { "note".to_string() } else { key }
}

/// Menu paths compare by normalised slug; external links compare verbatim.
fn menu_path_key(path: &str) -> String {
    if is_external(path) {
        path.trim().to_string()
    } else {
        normalize_slug(path)
    }
}

pub fn is_external(path: &str) -> bool {
    let path = path.trim();
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("mailto:")
}

fn check_url(field: &str, value: &str, placeholder_ok: bool) -> Result<(), ConfigError> {
    if placeholder_ok && is_placeholder(value) {
        return Ok(());
    }
    let valid = url::Url::parse(value.trim())
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parse a config from TOML text, finalize and validate it.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let mut config: SiteConfig = toml::from_str(content)?;
    config.finalize();
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// A missing file is treated as an empty one, which then fails validation
/// on the first required field.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let content = if config_path.exists() {
        fs::read_to_string(&config_path)?
    } else {
        String::new()
    };
    let mut config: SiteConfig = toml::from_str(&content)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.finalize();
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# `url`, `title`, `author.name` and at least one `[[menu]]` entry are required.
# Unknown keys will cause an error.

url = "https://example.com"
title = "Example"
subtitle = "Personal site and blog"
copyright = "© All rights reserved."

# Path the site is served under.
path_prefix = "/"

# Google Analytics id. FOLIO_GOOGLE_ANALYTICS in the environment overrides it.
# google_analytics_id = "UA-000000-1"

# Disqus shortname; enables comments under posts.
# disqus_shortname = "example"

# Posts per blog index page (/posts, /posts/page/2, ...).
posts_per_page = 8

# Render draft documents as pages. Drafts never appear in rss.xml or sitemap.xml.
include_drafts = false

# ---------------------------------------------------------------------------
# Navigation (display order)
# ---------------------------------------------------------------------------
[[menu]]
label = "Home"
path = "/"

[[menu]]
label = "Blog"
path = "/posts"

[[menu]]
label = "My projects"
path = "/projects"

# ---------------------------------------------------------------------------
# Author
# ---------------------------------------------------------------------------
[author]
name = "Jane Doe"
photo = "/photo.jpg"
bio = "Full-stack web developer"

# Empty string or "#" means "not published".
[author.contacts]
email = "jane@example.com"
github = "jane"
twitter = ""

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Empty endpoint disables the form.
endpoint = "/"
form_name = "contact"

# ---------------------------------------------------------------------------
# Listings
# ---------------------------------------------------------------------------
# [[projects]]
# title = "Personal site"
# image = "/media/projects/site.jpg"
# description = "This site."
# link = ""                       # optional live demo
# techs = ["Rust"]
# source_code = "https://github.com/jane/site"

# [[recent_work]]
# title = "Dashboard"
# date = "May 2020"
# image = "/media/mockups/dashboard.png"
# description = "An admin dashboard."
# link = "https://dashboard.example.com"
# techs = ["Rust"]

# [[digital_garden]]
# title = "Heroku"
# image = "/media/garden/heroku.png"
# link = "/digital-garden/heroku"
# date = "June 2020"
"##
}
