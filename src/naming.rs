//! Slug derivation for content documents and config keys.
//!
//! Content files may carry an ordering prefix that is meaningful on disk but
//! not in URLs. Two forms are recognised:
//!
//! - a numeric prefix: `020-about.md` → `about`
//! - a date prefix: `2020-05-12---heroku-export.md` → `heroku-export`
//!
//! The remaining name is transliterated to ASCII and slugified, so
//! `content/posts/010-Über Git.md` resolves to `/posts/uber-git`.
//!
//! ## Slug Shape
//!
//! Every slug starts with `/` and never ends with one, except the root slug
//! which is exactly `/`. A trailing `index` file name maps to its directory:
//!
//! | Source | Slug |
//! |--------|------|
//! | `index.md` | `/` |
//! | `pages/about.md` | `/pages/about` |
//! | `posts/index.md` | `/posts` |
//! | `posts/2020-05-12---Heroku.md` | `/posts/heroku` |

use std::path::Path;

/// Result of parsing an entry name like `020-About-Me`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-About-Me`)
    pub number: Option<u32>,
    /// Date prefix if present (e.g., `2020-05-12` from `2020-05-12---post`)
    pub date: Option<String>,
    /// Raw name after the prefix, dashes preserved. Empty if prefix-only.
    pub name: String,
}

/// Parse an entry name, splitting off a numeric or date ordering prefix.
///
/// - `"020-About-Me"` → number=Some(20), name="About-Me"
/// - `"2020-05-12---heroku"` → date=Some("2020-05-12"), name="heroku"
/// - `"001"` → number=Some(1), name=""
/// - `"about"` → no prefix, name="about"
/// - `"wip-notes"` → no prefix, name="wip-notes"
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((date, rest)) = split_date_prefix(name) {
        return ParsedName {
            number: None,
            date: Some(date.to_string()),
            name: rest.trim_start_matches('-').to_string(),
        };
    }
    if let Some(dash_pos) = name.find('-') {
        let prefix = &name[..dash_pos];
        if let Ok(num) = prefix.parse::<u32>() {
            return ParsedName {
                number: Some(num),
                date: None,
                name: name[dash_pos + 1..].to_string(),
            };
        }
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            date: None,
            name: String::new(),
        };
    }
    ParsedName {
        number: None,
        date: None,
        name: name.to_string(),
    }
}

/// Split a leading `YYYY-MM-DD-` prefix. The date must be followed by a dash.
fn split_date_prefix(name: &str) -> Option<(&str, &str)> {
    let bytes = name.as_bytes();
    if bytes.len() < 11 {
        return None;
    }
    let digits_at = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    let shaped = digits_at(0..4)
        && bytes[4] == b'-'
        && digits_at(5..7)
        && bytes[7] == b'-'
        && digits_at(8..10)
        && bytes[10] == b'-';
    shaped.then(|| (&name[..10], &name[10..]))
}

/// Transliterate to ASCII and reduce to lowercase `a-z0-9` runs joined by `-`.
///
/// ```
/// assert_eq!(folio::naming::slugify("Export DB from Heroku"), "export-db-from-heroku");
/// assert_eq!(folio::naming::slugify("Über  Git!"), "uber-git");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Derive a slug from a path relative to the content root.
pub fn slug_from_relative_path(relative: &Path) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut components = relative.components().peekable();
    while let Some(component) = components.next() {
        let raw = component.as_os_str().to_string_lossy();
        let is_file = components.peek().is_none();
        let name = if is_file {
            Path::new(raw.as_ref())
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            raw.into_owned()
        };
        if is_file && name == "index" {
            continue;
        }
        let segment = slugify(&parse_entry_name(&name).name);
        if !segment.is_empty() {
            segments.push(segment);
        }
    }
    join_slug(segments)
}

/// Normalise an explicitly written slug (front matter, garden links, menu paths).
///
/// Segments are kept as written; only slashes are normalised.
pub fn normalize_slug(raw: &str) -> String {
    join_slug(
        raw.trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Normalise a slug written in front matter.
///
/// Returns `None` when a segment could not be a directory name of its own:
/// empty (`a//b`), `.`, `..`, or containing a backslash or control character.
/// Leading and trailing slashes are dropped as in [`normalize_slug`].
pub fn explicit_slug(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Some("/".to_string());
    }
    let segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
    segments
        .iter()
        .all(|s| is_safe_segment(s))
        .then(|| join_slug(segments))
}

/// True when every segment of `slug` stays inside its parent directory.
pub fn is_safe_slug(slug: &str) -> bool {
    let trimmed = slug.trim_matches('/');
    trimmed.is_empty() || trimmed.split('/').all(is_safe_segment)
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.chars().any(|c| c == '\\' || c.is_control())
}

fn join_slug(segments: Vec<String>) -> String {
    format!("/{}", segments.join("/"))
}

/// Normalise a site path prefix so it starts and ends with `/`.
pub fn normalize_path_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn numbered_with_multi_word_name() {
        let p = parse_entry_name("020-About-Me");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.date, None);
        assert_eq!(p.name, "About-Me");
    }

    #[test]
    fn number_only_no_dash() {
        let p = parse_entry_name("001");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("wip-notes");
        assert_eq!(p.number, None);
        assert_eq!(p.name, "wip-notes");
    }

    #[test]
    fn date_prefix_with_triple_dash() {
        let p = parse_entry_name("2020-05-12---heroku-export");
        assert_eq!(p.number, None);
        assert_eq!(p.date.as_deref(), Some("2020-05-12"));
        assert_eq!(p.name, "heroku-export");
    }

    #[test]
    fn date_like_without_trailing_dash_is_a_number_prefix() {
        // "2020-05-12" alone is not a date prefix; the leading number wins
        let p = parse_entry_name("2020-05-12");
        assert_eq!(p.number, Some(2020));
        assert_eq!(p.name, "05-12");
    }

    #[test]
    fn slugify_lowercases_and_collapses_separators() {
        assert_eq!(slugify("Export DB -- from Heroku"), "export-db-from-heroku");
        assert_eq!(slugify("  leading and trailing  "), "leading-and-trailing");
    }

    #[test]
    fn slugify_transliterates_unicode() {
        assert_eq!(slugify("Über Git"), "uber-git");
        assert_eq!(slugify("Беларусь"), "belarus");
    }

    #[test]
    fn slugify_of_punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn root_index_is_root_slug() {
        assert_eq!(slug_from_relative_path(&PathBuf::from("index.md")), "/");
    }

    #[test]
    fn nested_index_maps_to_directory() {
        assert_eq!(
            slug_from_relative_path(&PathBuf::from("posts/index.md")),
            "/posts"
        );
    }

    #[test]
    fn prefixes_are_stripped_per_segment() {
        assert_eq!(
            slug_from_relative_path(&PathBuf::from("010-pages/020-About Me.md")),
            "/pages/about-me"
        );
        assert_eq!(
            slug_from_relative_path(&PathBuf::from("posts/2020-05-12---Heroku.mdx")),
            "/posts/heroku"
        );
    }

    #[test]
    fn normalize_slug_adds_leading_and_drops_trailing_slash() {
        assert_eq!(normalize_slug("about"), "/about");
        assert_eq!(normalize_slug("/pages/about/"), "/pages/about");
        assert_eq!(normalize_slug("//posts//git"), "/posts/git");
        assert_eq!(normalize_slug("/"), "/");
        assert_eq!(normalize_slug(""), "/");
    }

    #[test]
    fn explicit_slug_normalises_slashes() {
        assert_eq!(explicit_slug("digital-garden/heroku/").as_deref(), Some("/digital-garden/heroku"));
        assert_eq!(explicit_slug("/").as_deref(), Some("/"));
    }

    #[test]
    fn explicit_slug_rejects_dot_segments() {
        assert_eq!(explicit_slug("/pages/./about"), None);
        assert_eq!(explicit_slug("/posts/../posts"), None);
        assert_eq!(explicit_slug("../../escape"), None);
    }

    #[test]
    fn explicit_slug_rejects_empty_and_backslash_segments() {
        assert_eq!(explicit_slug("/pages//about"), None);
        assert_eq!(explicit_slug("/pages/..\\about"), None);
    }

    #[test]
    fn safe_slug_check() {
        assert!(is_safe_slug("/"));
        assert!(is_safe_slug("/posts/page/2"));
        assert!(!is_safe_slug("/../../escape"));
        assert!(!is_safe_slug("/a/./b"));
    }

    #[test]
    fn path_prefix_always_wrapped_in_slashes() {
        assert_eq!(normalize_path_prefix("/"), "/");
        assert_eq!(normalize_path_prefix(""), "/");
        assert_eq!(normalize_path_prefix("blog"), "/blog/");
        assert_eq!(normalize_path_prefix("/blog/"), "/blog/");
    }
}
