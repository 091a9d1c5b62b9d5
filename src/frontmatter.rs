//! Front matter splitting and parsing.
//!
//! A content document may open with a metadata block in one of two forms:
//!
//! ```text
//! +++                         ---
//! title = "Heroku"            title: Heroku
//! date = 2020-05-12           date: 2020-05-12
//! template = "post"           template: post
//! +++                         ---
//! # Body starts here          # Body starts here
//! ```
//!
//! `+++` blocks are TOML, `---` blocks are YAML. The closing fence must sit
//! on its own line. Keys use either snake or camel case (`social_image` or
//! `socialImage`); keys this site does not use are ignored so that files
//! written for other generators still resolve.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter opened with `{0}` is never closed")]
    Unterminated(&'static str),
    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
}

impl Format {
    fn fence(self) -> &'static str {
        match self {
            Format::Toml => "+++",
            Format::Yaml => "---",
        }
    }
}

/// Front matter as written, before template and date validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawFrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub template: Option<String>,
    pub draft: bool,
    pub description: Option<String>,
    #[serde(alias = "socialImage")]
    pub social_image: Option<String>,
    pub slug: Option<String>,
}

/// Split a document into its front matter block and body.
///
/// Returns `None` for the block when the document has no front matter.
pub fn split(input: &str) -> Result<(Option<(Format, &str)>, &str), FrontMatterError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let Some(first) = input.split_inclusive('\n').next() else {
        return Ok((None, input));
    };
    let format = match first.trim_end() {
        "+++" => Format::Toml,
        "---" => Format::Yaml,
        _ => return Ok((None, input)),
    };

    let rest = &input[first.len()..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == format.fence() {
            return Ok((Some((format, &rest[..offset])), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated(format.fence()))
}

/// Parse a front matter block.
pub fn parse_block(format: Format, block: &str) -> Result<RawFrontMatter, FrontMatterError> {
    match format {
        Format::Yaml => {
            if block.trim().is_empty() {
                return Ok(RawFrontMatter::default());
            }
            Ok(serde_yaml_ng::from_str(block)?)
        }
        Format::Toml => {
            let mut table: toml::Table = toml::from_str(block)?;
            // Bare TOML dates are datetimes; the document model keeps dates as text
            for (_, value) in table.iter_mut() {
                if let toml::Value::Datetime(dt) = value {
                    *value = toml::Value::String(dt.to_string());
                }
            }
            Ok(toml::Value::Table(table).try_into()?)
        }
    }
}

/// Split and parse in one step. Documents without a block get defaults.
pub fn parse(input: &str) -> Result<(RawFrontMatter, &str), FrontMatterError> {
    match split(input)? {
        (Some((format, block)), body) => Ok((parse_block(format, block)?, body)),
        (None, body) => Ok((RawFrontMatter::default(), body)),
    }
}

/// Parse a front matter date.
///
/// Accepts RFC 3339 (`2020-05-12T10:00:00Z`), a plain date (`2020-05-12`)
/// and a naive date-time with either `T` or a space as separator.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// First `# heading` of a markdown body, used when front matter has no title.
pub fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .filter(|title| !title.is_empty())
}
