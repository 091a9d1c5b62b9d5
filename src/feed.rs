//! RSS feed and sitemap generation.
//!
//! Both are built from published documents only; drafts never leave the
//! machine through either file, whatever `include_drafts` says.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2020-05-12</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::metadata::SiteMetadata;
use crate::scan::ContentSet;
use crate::templates::posts_page_slug;
use crate::types::FeedEntry;
use chrono::{NaiveDateTime, TimeZone, Utc};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build the RSS document for the site's published posts.
pub fn render_rss(meta: &SiteMetadata, content: &ContentSet) -> Result<String, String> {
    let items: Vec<rss::Item> = content
        .feed_entries()
        .iter()
        .map(|entry| entry_to_item(entry, meta))
        .collect();

    let description = if meta.subtitle().is_empty() {
        meta.title()
    } else {
        meta.subtitle()
    };
    let channel = ChannelBuilder::default()
        .title(meta.title())
        .link(meta.absolute_url("/"))
        .description(description)
        .generator(format!("folio {}", env!("CARGO_PKG_VERSION")))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| format!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn entry_to_item(entry: &FeedEntry, meta: &SiteMetadata) -> rss::Item {
    let link = meta.absolute_url(&entry.slug);
    ItemBuilder::default()
        .title(entry.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(entry.description.clone())
        .content(Some(entry.html.clone()))
        .pub_date(entry.date.map(to_rfc2822))
        .build()
}

fn to_rfc2822(date: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&date).to_rfc2822()
}

/// Build the sitemap: every published document plus the blog index pages.
pub fn render_sitemap(meta: &SiteMetadata, content: &ContentSet, posts_pages: usize) -> String {
    let mut urls: Vec<(String, Option<String>)> = content
        .published()
        .map(|doc| {
            (
                meta.absolute_url(&doc.slug),
                doc.date().map(|d| d.format("%Y-%m-%d").to_string()),
            )
        })
        .collect();
    urls.extend((1..=posts_pages).map(|page| (meta.absolute_url(&posts_page_slug(page)), None)));

    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');
    for (loc, lastmod) in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&loc)));
        if let Some(lastmod) = lastmod {
            xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{SourceFile, resolve_content};
    use crate::test_helpers::sample_config;
    use std::path::PathBuf;

    fn content() -> ContentSet {
        let files = [
            ("index.md", "---\ntitle: Home\ntemplate: landing\n---\n"),
            (
                "posts/heroku.md",
                "---\ntitle: Heroku\ntemplate: post\ndate: 2020-05-12\ndescription: Export a DB\n---\nStep **one**",
            ),
            (
                "posts/secret.md",
                "---\ntitle: Secret\ntemplate: post\ndate: 2021-01-01\ndraft: true\n---\n",
            ),
        ];
        ContentSet::new(
            resolve_content(
                files
                    .iter()
                    .map(|(p, c)| SourceFile {
                        path: PathBuf::from(p),
                        contents: c.to_string(),
                    })
                    .collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn rss_contains_published_posts_only() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let xml = render_rss(&meta, &content()).unwrap();

        assert!(xml.contains("<title>Heroku</title>"));
        assert!(xml.contains("https://ramonak.io/posts/heroku/"));
        assert!(xml.contains("Export a DB"));
        assert!(xml.contains("12 May 2020"));
        assert!(!xml.contains("Secret"));
        assert!(!xml.contains("<title>Home</title>"));
    }

    #[test]
    fn rss_item_carries_html_content() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let xml = render_rss(&meta, &content()).unwrap();
        assert!(xml.contains("content:encoded"));
        assert!(xml.contains("<strong>one</strong>"));
    }

    #[test]
    fn sitemap_lists_pages_and_index_without_drafts() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let xml = render_sitemap(&meta, &content(), 1);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://ramonak.io/</loc>"));
        assert!(xml.contains("<loc>https://ramonak.io/posts/heroku/</loc>"));
        assert!(xml.contains("<lastmod>2020-05-12</lastmod>"));
        assert!(xml.contains("<loc>https://ramonak.io/posts/</loc>"));
        assert!(!xml.contains("secret"));
    }

    #[test]
    fn escape_xml_special_chars() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }
}
