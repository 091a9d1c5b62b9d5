//! Shared types used across pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → generate) as
//! part of the manifest, so both sides agree on them by construction.

use crate::frontmatter;
use chrono::NaiveDateTime;
use pulldown_cmark::{Options, Parser, html as md_html};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
    #[error("posts index page {page} does not exist (last page is {last})")]
    PageOutOfRange { page: usize, last: usize },
}

/// Presentation template a document is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    #[default]
    Page,
    Post,
    Landing,
    Projects,
    DigitalGarden,
}

impl Template {
    pub const ALL: [Template; 5] = [
        Template::Page,
        Template::Post,
        Template::Landing,
        Template::Projects,
        Template::DigitalGarden,
    ];

    /// The selector written in front matter.
    pub fn selector(self) -> &'static str {
        match self {
            Template::Page => "page",
            Template::Post => "post",
            Template::Landing => "landing",
            Template::Projects => "projects",
            Template::DigitalGarden => "digital-garden",
        }
    }

    /// Class set on `<body>` so styles can target a template.
    pub fn body_class(self) -> &'static str {
        match self {
            Template::Page => "page-template",
            Template::Post => "post-template",
            Template::Landing => "landing-template",
            Template::Projects => "projects-template",
            Template::DigitalGarden => "garden-template",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    /// Accepts the selector, plus the `-template` suffixed spelling
    /// (`post-template`) used by older content.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let wanted = wanted.strip_suffix("-template").unwrap_or(wanted);
        Template::ALL
            .into_iter()
            .find(|t| t.selector() == wanted)
            .ok_or_else(|| TemplateError::UnknownTemplate(s.to_string()))
    }
}

/// Validated front matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    /// Validated at resolve time; see [`ContentDocument::date`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_image: Option<String>,
    /// Explicit slug override, as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// One resolved content document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// URL path within the site, always starting with `/`.
    pub slug: String,
    /// Path relative to the content root, `/`-separated.
    pub source_path: String,
    pub frontmatter: FrontMatter,
    /// Markdown body with the front matter removed.
    pub body: String,
}

impl ContentDocument {
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn template(&self) -> Template {
        self.frontmatter.template
    }

    pub fn is_draft(&self) -> bool {
        self.frontmatter.draft
    }

    pub fn description(&self) -> Option<&str> {
        self.frontmatter.description.as_deref()
    }

    /// Parsed front matter date. `None` when the document has no date.
    pub fn date(&self) -> Option<NaiveDateTime> {
        self.frontmatter
            .date
            .as_deref()
            .and_then(frontmatter::parse_date)
    }

    /// Display form of the date, e.g. `May 12, 2020`.
    pub fn display_date(&self) -> Option<String> {
        self.date().map(|d| d.format("%B %-d, %Y").to_string())
    }

    /// Render the markdown body to HTML.
    pub fn render_body(&self) -> String {
        render_markdown(&self.body)
    }
}

/// Markdown to HTML with tables, footnotes and strikethrough enabled.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// A published post as it appears in the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub date: Option<NaiveDateTime>,
    pub slug: String,
    pub description: Option<String>,
    pub html: String,
}
