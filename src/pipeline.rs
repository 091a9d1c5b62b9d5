//! Whole-site build: scan, then generate.
//!
//! The CLI drives the stages one at a time so it can print between them;
//! this module is the same pipeline as a single library call.

use crate::config::ConfigError;
use crate::generate::{self, GenerateError, GenerateOptions, GenerateReport};
use crate::metadata::SiteMetadata;
use crate::scan::{self, ContentError, Manifest, ScanError};
use crate::templates::{AssetPaths, RenderContext, posts_page_count, render_posts_index};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),
}

impl From<ScanError> for BuildError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Config(e) => BuildError::Config(e),
            ScanError::Content(e) => BuildError::Content(e),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub include_drafts: bool,
    /// Where to keep `manifest.json`. Not written when `None`.
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct BuildReport {
    pub manifest: Manifest,
    pub generated: GenerateReport,
}

/// Scan `source` and write the site to `output`.
pub fn build(source: &Path, output: &Path, options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let manifest = scan::scan(source)?;
    if let Some(temp_dir) = &options.temp_dir {
        write_manifest(&manifest, temp_dir)?;
    }
    let generated = generate::generate_site(
        &manifest,
        source,
        output,
        GenerateOptions {
            include_drafts: options.include_drafts,
        },
    )?;
    Ok(BuildReport {
        manifest,
        generated,
    })
}

/// Write the scan manifest as pretty JSON, returning its path.
pub fn write_manifest(manifest: &Manifest, temp_dir: &Path) -> Result<PathBuf, GenerateError> {
    fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

/// Validate a content tree without writing anything.
///
/// Loads the config, resolves every document and renders the blog index in
/// memory. Link warnings come back on the manifest.
pub fn check(source: &Path) -> Result<Manifest, BuildError> {
    let manifest = scan::scan(source)?;
    let meta = SiteMetadata::new(&manifest.config);
    let assets = AssetPaths::new(&meta, &generate::stylesheet_name(""));
    let ctx = RenderContext {
        meta,
        content: &manifest.content,
        assets: &assets,
    };
    for page in 1..=posts_page_count(&ctx) {
        render_posts_index(page, &ctx).map_err(GenerateError::from)?;
    }
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn build_writes_site_and_manifest() {
        let source = setup_fixtures();
        let out = TempDir::new().unwrap();
        let temp = out.path().join(".folio-temp");
        let options = BuildOptions {
            include_drafts: false,
            temp_dir: Some(temp.clone()),
        };
        let report = build(source.path(), &out.path().join("dist"), &options).unwrap();

        assert!(temp.join("manifest.json").exists());
        assert!(out.path().join("dist/index.html").exists());
        assert_eq!(report.generated.pages.len(), report.manifest.content.published().count());
    }

    #[test]
    fn check_writes_nothing() {
        let source = setup_fixtures();
        let manifest = check(source.path()).unwrap();
        assert!(document_slugs(&manifest).contains(&"/pages/about"));
        assert!(!source.path().join("dist").exists());
        assert!(!source.path().join("manifest.json").exists());
    }

    #[test]
    fn fixture_menu_has_no_warnings() {
        let source = setup_fixtures();
        let manifest = check(source.path()).unwrap();
        assert!(manifest.warnings.is_empty(), "{:?}", manifest.warnings);
    }

    #[test]
    fn content_error_surfaces_as_build_error() {
        let source = setup_fixtures();
        fs::write(
            source.path().join("pages/broken.md"),
            "---\ntitle: Broken\ntemplate: gallery\n---\n",
        )
        .unwrap();
        let err = check(source.path()).unwrap_err();
        assert!(matches!(err, BuildError::Content(ContentError::UnknownTemplate { .. })));
        assert!(err.to_string().contains("pages/broken.md"));
    }

    #[test]
    fn config_error_surfaces_as_build_error() {
        let source = setup_fixtures();
        fs::write(source.path().join("config.toml"), "title = \"No url\"\n").unwrap();
        let out = TempDir::new().unwrap();
        let err = build(source.path(), out.path(), &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, BuildError::Config(ConfigError::MissingField("url"))));
    }
}
