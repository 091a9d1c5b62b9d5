//! Link integrity checks.
//!
//! These never fail a build. Each finding is a [`LinkIntegrityWarning`] that
//! `scan` stores in the manifest and the CLI prints after the stage it ran.

use crate::config::{SiteConfig, is_external, is_placeholder};
use crate::naming::normalize_slug;
use crate::scan::{ContentSet, POSTS_INDEX};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Routes that exist without a content document behind them.
pub const STATIC_ROUTES: &[&str] = &["/", POSTS_INDEX];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkIntegrityWarning {
    /// A menu path that matches no static route and no document.
    DanglingMenuPath { label: String, path: String },
    /// A digital garden entry whose `link` resolves to no rendered document.
    DanglingGardenLink { title: String, link: String },
    /// Two garden entries share a title; only the first is reachable by title.
    DuplicateGardenTitle {
        title: String,
        first: usize,
        second: usize,
    },
    /// A required link left as a placeholder.
    EmptyRequiredLink { item: String, field: String },
}

impl fmt::Display for LinkIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingMenuPath { label, path } => {
                write!(f, "menu entry \"{label}\" points to {path}, which no page provides")
            }
            Self::DanglingGardenLink { title, link } => {
                write!(f, "garden entry \"{title}\" links to {link}, which no page provides")
            }
            Self::DuplicateGardenTitle {
                title,
                first,
                second,
            } => write!(
                f,
                "garden entries #{first} and #{second} share the title \"{title}\"; title lookups only find #{first}"
            ),
            Self::EmptyRequiredLink { item, field } => {
                write!(f, "{item} has no {field}")
            }
        }
    }
}

/// Warnings that depend on the configuration alone.
pub fn check_config(config: &SiteConfig) -> Vec<LinkIntegrityWarning> {
    let mut warnings = Vec::new();

    let mut titles: HashMap<&str, usize> = HashMap::new();
    for (i, entry) in config.digital_garden.iter().enumerate() {
        match titles.get(entry.title.as_str()) {
            Some(&first) => warnings.push(LinkIntegrityWarning::DuplicateGardenTitle {
                title: entry.title.clone(),
                first,
                second: i,
            }),
            None => {
                titles.insert(entry.title.as_str(), i);
            }
        }
    }

    for project in &config.projects {
        if is_placeholder(&project.source_code) {
            warnings.push(LinkIntegrityWarning::EmptyRequiredLink {
                item: format!("project \"{}\"", project.title),
                field: "source_code".to_string(),
            });
        }
    }

    warnings
}

/// Warnings about config links that point into the content tree.
pub fn check_links(config: &SiteConfig, content: &ContentSet) -> Vec<LinkIntegrityWarning> {
    let mut warnings = Vec::new();

    for item in &config.menu {
        if !menu_path_resolves(&item.path, content) {
            warnings.push(LinkIntegrityWarning::DanglingMenuPath {
                label: item.label.clone(),
                path: item.path.clone(),
            });
        }
    }

    for entry in &config.digital_garden {
        if is_placeholder(&entry.link) || is_external(&entry.link) {
            continue;
        }
        let target = content
            .get(&entry.link)
            .filter(|doc| config.include_drafts || !doc.is_draft());
        if target.is_none() {
            warnings.push(LinkIntegrityWarning::DanglingGardenLink {
                title: entry.title.clone(),
                link: entry.link.clone(),
            });
        }
    }

    warnings
}

fn menu_path_resolves(path: &str, content: &ContentSet) -> bool {
    if is_external(path) {
        return true;
    }
    let path = normalize_slug(path);
    STATIC_ROUTES.contains(&path.as_str()) || content.has_prefix(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GardenEntry, MenuItem, Project};
    use crate::scan::{SourceFile, resolve_content};
    use crate::test_helpers::sample_config;
    use std::path::PathBuf;

    fn content(paths: &[&str]) -> ContentSet {
        content_with(paths.iter().map(|p| (*p, "# Title")).collect())
    }

    fn content_with(files: Vec<(&str, &str)>) -> ContentSet {
        let files = files
            .into_iter()
            .map(|(p, contents)| SourceFile {
                path: PathBuf::from(p),
                contents: contents.to_string(),
            })
            .collect();
        ContentSet::new(resolve_content(files).unwrap())
    }

    fn garden(title: &str, link: &str) -> GardenEntry {
        GardenEntry {
            key: String::new(),
            image: String::new(),
            title: title.to_string(),
            link: link.to_string(),
            date: String::new(),
        }
    }

    #[test]
    fn static_routes_and_prefixes_resolve() {
        let mut config = sample_config();
        config.digital_garden.clear();
        config.menu = vec![
            MenuItem { label: "Home".into(), path: "/".into() },
            MenuItem { label: "Blog".into(), path: "/posts".into() },
            MenuItem { label: "Projects".into(), path: "/projects/".into() },
            MenuItem { label: "GitHub".into(), path: "https://github.com/x".into() },
        ];
        let set = content(&["projects/index.md"]);
        assert!(check_links(&config, &set).is_empty());
    }

    #[test]
    fn dangling_menu_path_is_reported() {
        let mut config = sample_config();
        config.digital_garden.clear();
        config.menu = vec![MenuItem { label: "About".into(), path: "/about".into() }];
        let warnings = check_links(&config, &content(&["pages/about.md"]));
        assert_eq!(
            warnings,
            vec![LinkIntegrityWarning::DanglingMenuPath {
                label: "About".into(),
                path: "/about".into()
            }]
        );
    }

    #[test]
    fn dangling_garden_link_is_reported() {
        let mut config = sample_config();
        config.digital_garden = vec![
            garden("Heroku", "/digital-garden/heroku"),
            garden("Git", "/digital-garden/git"),
            garden("Notes", ""),
        ];
        let warnings = check_links(&config, &content(&["digital-garden/heroku.md"]));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            LinkIntegrityWarning::DanglingGardenLink { title, .. } if title == "Git"
        ));
    }

    #[test]
    fn garden_link_to_draft_is_dangling_unless_drafts_render() {
        let mut config = sample_config();
        config.digital_garden = vec![garden("Heroku", "/digital-garden/heroku")];
        let set = content_with(vec![(
            "digital-garden/heroku.md",
            "---\ntitle: Heroku\ndraft: true\n---\n",
        )]);

        let warnings = check_links(&config, &set);
        assert_eq!(
            warnings,
            vec![LinkIntegrityWarning::DanglingGardenLink {
                title: "Heroku".into(),
                link: "/digital-garden/heroku".into()
            }]
        );

        config.include_drafts = true;
        assert!(check_links(&config, &set).is_empty());
    }

    #[test]
    fn duplicate_garden_title_reports_both_indices() {
        let mut config = sample_config();
        config.digital_garden = vec![
            garden("Heroku", "/a"),
            garden("Git", "/b"),
            garden("Heroku", "/c"),
        ];
        let warnings = check_config(&config);
        assert_eq!(
            warnings,
            vec![LinkIntegrityWarning::DuplicateGardenTitle {
                title: "Heroku".into(),
                first: 0,
                second: 2
            }]
        );
    }

    #[test]
    fn placeholder_source_code_is_reported() {
        let mut config = sample_config();
        config.projects = vec![Project {
            title: "Site".into(),
            image: "/s.png".into(),
            description: String::new(),
            link: String::new(),
            techs: vec![],
            source_code: "#".into(),
        }];
        let warnings = check_config(&config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].to_string(), "project \"Site\" has no source_code");
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let w = LinkIntegrityWarning::DanglingMenuPath {
            label: "About".into(),
            path: "/about".into(),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"kind\":\"dangling_menu_path\""));
    }
}
