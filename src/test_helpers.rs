//! Shared test utilities for the folio test suite.
//!
//! Provides fixture setup, a parsed sample configuration, and lookup helpers
//! that panic with the available alternatives on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let about = find_document(&manifest, "/pages/about");
//! assert_eq!(about.title(), "About me");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{SiteConfig, parse_config};
use crate::scan::Manifest;
use crate::types::ContentDocument;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Sample configuration
// =========================================================================

const SAMPLE_CONFIG: &str = r##"
url = "https://ramonak.io"
title = "Ramonak.io"
subtitle = "Full-stack web developer"
copyright = "© Kate Ramonak"

[[menu]]
label = "Home"
path = "/"

[[menu]]
label = "Blog"
path = "/posts"

[author]
name = "Kate"
photo = "/media/me.png"
bio = "I build things for the web."

[author.contacts]
twitter = "ramonak_io"
facebook = "#"
instagram = ""

[[projects]]
title = "X"
image = "/media/x.png"
description = "A project"
link = ""
techs = ["A"]
source_code = "https://github.com/x"

[[recent_work]]
title = "Coffee dashboard"
date = "May 2020"
image = "/media/coffee.png"
description = "Sales dashboard for a coffee roaster"
link = "https://coffee.example.com"
techs = ["React", "Node.js"]

[[digital_garden]]
title = "Heroku"
image = "/media/heroku.png"
link = "/digital-garden/heroku"
date = "June 2020"

[[digital_garden]]
title = "Git"
image = "/media/git.png"
link = "/digital-garden/git"
date = "June 2020"
"##;

/// A valid, finalized configuration shared by the rendering tests.
pub fn sample_config() -> SiteConfig {
    parse_config(SAMPLE_CONFIG).unwrap()
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a document by slug. Panics if not found.
pub fn find_document<'a>(manifest: &'a Manifest, slug: &str) -> &'a ContentDocument {
    manifest.content.get(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = manifest.content.iter().map(|d| d.slug.as_str()).collect();
        panic!("document '{slug}' not found. Available: {slugs:?}")
    })
}

/// All slugs in resolution order.
pub fn document_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.content.iter().map(|d| d.slug.as_str()).collect()
}
