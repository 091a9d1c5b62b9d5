//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every document is
//! shown by its positional index and title, with the source file and slug as
//! indented context lines. This reads as a content inventory while still
//! letting users trace each page back to the file it came from.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Documents
//! 001 Home [landing]
//!     Source: index.md
//!     Slug: /
//! 002 Work in progress [post] (draft)
//!     Source: posts/work-in-progress.md
//!     Slug: /posts/work-in-progress
//!
//! Config
//!     config.toml
//!     static/
//!     5 menu entries, 2 projects, 1 recent work, 2 garden entries
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Home → index.html
//! 002 About me → pages/about/index.html
//!
//! Blog index → posts/index.html (1 page)
//! Assets: style-3f2a9c1e.css, garden.js, contact.js
//! Feeds: rss.xml (2 posts), sitemap.xml
//! Static: 4 files
//! Generated 7 pages, 1 index page
//! ```
//!
//! ## Warnings
//!
//! ```text
//! warning: menu entry "About" points to /about, which no page provides
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects. Warnings go to stderr with a coloured prefix.

use crate::generate::GenerateReport;
use crate::integrity::LinkIntegrityWarning;
use crate::scan::Manifest;
use crate::types::{ContentDocument, Template};
use colored::Colorize;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `1 page`, `2 pages`.
fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Header line for a document: index, title, template, draft marker.
///
/// ```text
/// 001 About me
/// 002 Home [landing]
/// 003 WIP [post] (draft)
/// ```
///
/// The default `page` template is implied and not shown.
fn document_header(index: usize, doc: &ContentDocument) -> String {
    let mut line = format!("{} {}", format_index(index), doc.title());
    if doc.template() != Template::Page {
        line.push_str(&format!(" [{}]", doc.template()));
    }
    if doc.is_draft() {
        line.push_str(" (draft)");
    }
    line
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: resolved documents, then config inventory.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Documents".to_string());
    if manifest.content.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, doc) in manifest.content.iter().enumerate() {
        lines.push(document_header(i + 1, doc));
        lines.push(format!("    Source: {}", doc.source_path));
        lines.push(format!("    Slug: {}", doc.slug));
        if let Some(date) = doc.display_date() {
            lines.push(format!("    Date: {}", date));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    if source_root.join("static").is_dir() {
        lines.push("    static/".to_string());
    }
    let config = &manifest.config;
    lines.push(format!(
        "    {}, {}, {}, {}",
        plural(config.menu.len(), "menu entry", "menu entries"),
        plural(config.projects.len(), "project", "projects"),
        plural(config.recent_work.len(), "recent work", "recent work"),
        plural(config.digital_garden.len(), "garden entry", "garden entries"),
    ));

    lines
}

/// Print scan output to stdout, then any warnings to stderr.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
    print_warnings(&manifest.warnings);
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: each written page, then assets and totals.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, page) in report.pages.iter().enumerate() {
        let draft = if page.draft { " (draft)" } else { "" };
        lines.push(format!(
            "{} {}{} \u{2192} {}",
            format_index(i + 1),
            page.title,
            draft,
            page.path
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Blog index \u{2192} posts/index.html ({})",
        plural(report.index_pages, "page", "pages")
    ));
    lines.push(format!(
        "Assets: {}, garden.js, contact.js",
        report.stylesheet
    ));
    lines.push(format!(
        "Feeds: rss.xml ({}), sitemap.xml",
        plural(report.feed_items, "post", "posts")
    ));
    if report.static_files > 0 {
        lines.push(format!(
            "Static: {}",
            plural(report.static_files, "file", "files")
        ));
    }
    lines.push(format!(
        "Generated {}, {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.index_pages, "index page", "index pages")
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Warnings
// ============================================================================

/// One `warning: ...` line per link integrity finding.
pub fn format_warnings(warnings: &[LinkIntegrityWarning]) -> Vec<String> {
    warnings.iter().map(|w| format!("warning: {w}")).collect()
}

/// Print warnings to stderr with a coloured prefix.
pub fn print_warnings(warnings: &[LinkIntegrityWarning]) {
    for line in format_warnings(warnings) {
        match line.split_once(' ') {
            Some((prefix, rest)) => eprintln!("{} {}", prefix.yellow().bold(), rest),
            None => eprintln!("{}", line),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
