//! # Folio
//!
//! A static site generator for a personal site: a blog, a project portfolio,
//! a landing page with a contact form, and a "digital garden" of notes.
//! Markdown files become pages; one `config.toml` holds everything else
//! (menu, author, contacts, projects, recent work, garden cards).
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so a failed or surprising build can
//! be debugged by reading what the scan stage resolved. [`pipeline::build`]
//! runs both stages in one call.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content directory, resolves documents, produces the manifest |
//! | [`generate`] | Stage 2 — renders pages, feeds and assets from the manifest |
//! | [`pipeline`] | Both stages as library calls: `build` and `check` |
//! | [`config`] | `config.toml` loading, validation and the environment overlay |
//! | [`frontmatter`] | YAML / TOML front matter splitting and date parsing |
//! | [`naming`] | Ordering prefixes and slug derivation |
//! | [`types`] | Shared types serialized in the manifest (`ContentDocument`, `Template`) |
//! | [`metadata`] | Read-only view of the site config used by every template |
//! | [`contacts`] | Contact channels and the "published handle" rule |
//! | [`garden`] | Digital garden selection state |
//! | [`components`] | Reusable Maud fragments (cards, sidebar, footer, contact form) |
//! | [`templates`] | Full pages, one per [`types::Template`], plus the blog index |
//! | [`feed`] | `rss.xml` and `sitemap.xml` |
//! | [`integrity`] | Dangling links and other non-fatal findings |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Template variables are Rust expressions, interpolation is
//! escaped by default, and there is no template directory to ship.
//!
//! ## Pages Are Files, Everything Else Is Config
//!
//! Anything with a body of prose is a markdown file. Lists of things (menu,
//! projects, garden cards) live in `config.toml` and are validated when it is
//! loaded, so a typo in a contact channel or a duplicate menu path fails the
//! build instead of producing a broken page.
//!
//! ## Warnings Are Not Errors
//!
//! A menu entry or garden card pointing at a page that does not exist is
//! reported by [`integrity`] but still builds. Malformed content (bad front
//! matter, unknown template, duplicate slug) is an error naming the file.
//!
//! ## Drafts
//!
//! `draft: true` documents are only rendered with `--drafts` or
//! `include_drafts = true`, and never reach the feed, the sitemap or the
//! blog index.

pub mod components;
pub mod config;
pub mod contacts;
pub mod feed;
pub mod frontmatter;
pub mod garden;
pub mod generate;
pub mod integrity;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod templates;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
