//! Read-only views of the site configuration for rendering code.
//!
//! Templates and components never reach for configuration on their own. The
//! generate stage builds one [`SiteMetadata`] per build and passes it (or
//! one of the narrowed slices it hands out) down explicitly, which keeps
//! every render function a pure function of its arguments.
//!
//! URL helpers live here too, because they depend on `url` and
//! `path_prefix` and nothing else:
//!
//! ```text
//! path_prefix = "/blog/"
//! url_for("/")              → /blog/
//! url_for("/posts/heroku")  → /blog/posts/heroku/
//! absolute_url("/posts")    → https://example.com/blog/posts/
//! ```

use crate::config::{Author, GardenEntry, MenuItem, Project, SiteConfig, WorkItem, is_external};
use crate::contacts::{PublishedContact, published_contacts};
use crate::naming::normalize_slug;

#[derive(Debug, Clone, Copy)]
pub struct SiteMetadata<'a> {
    config: &'a SiteConfig,
}

impl<'a> SiteMetadata<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    pub fn title(&self) -> &'a str {
        &self.config.title
    }

    pub fn subtitle(&self) -> &'a str {
        &self.config.subtitle
    }

    pub fn copyright(&self) -> &'a str {
        &self.config.copyright
    }

    pub fn site_url(&self) -> &'a str {
        self.config.url.trim_end_matches('/')
    }

    pub fn google_analytics_id(&self) -> Option<&'a str> {
        self.config
            .google_analytics_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    pub fn disqus_shortname(&self) -> Option<&'a str> {
        self.config
            .disqus_shortname
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn posts_per_page(&self) -> usize {
        self.config.posts_per_page
    }

    pub fn menu(&self) -> &'a [MenuItem] {
        &self.config.menu
    }

    pub fn author(&self) -> &'a Author {
        &self.config.author
    }

    /// Author contacts after the placeholder rule.
    pub fn contacts(&self) -> Vec<PublishedContact<'a>> {
        published_contacts(&self.config.author.contacts)
    }

    pub fn projects(&self) -> &'a [Project] {
        &self.config.projects
    }

    pub fn recent_work(&self) -> &'a [WorkItem] {
        &self.config.recent_work
    }

    pub fn garden(&self) -> &'a [GardenEntry] {
        &self.config.digital_garden
    }

    pub fn contact_endpoint(&self) -> Option<&'a str> {
        let endpoint = self.config.contact.endpoint.trim();
        (!endpoint.is_empty()).then_some(endpoint)
    }

    pub fn contact_form_name(&self) -> &'a str {
        &self.config.contact.form_name
    }

    /// `<title>` text for a document: `"{doc} - {site}"`.
    pub fn page_title(&self, doc_title: &str) -> String {
        format!("{doc_title} - {}", self.config.title)
    }

    /// Site-relative href for a slug, honouring `path_prefix`.
    ///
    /// Pages are written as `{slug}/index.html`, so non-root hrefs end in `/`.
    pub fn url_for(&self, slug: &str) -> String {
        let slug = normalize_slug(slug);
        let prefix = &self.config.path_prefix;
        if slug == "/" {
            prefix.clone()
        } else {
            format!("{prefix}{}/", slug.trim_start_matches('/'))
        }
    }

    /// Href for a config-supplied path: external links pass through.
    pub fn href(&self, path: &str) -> String {
        if is_external(path) {
            path.trim().to_string()
        } else {
            self.url_for(path)
        }
    }

    /// Absolute URL for a slug, for feeds, the sitemap and `og:url`.
    pub fn absolute_url(&self, slug: &str) -> String {
        format!("{}{}", self.site_url(), self.url_for(slug))
    }

    /// Absolute URL for an asset path like `/media/photo.jpg`.
    ///
    /// Already-absolute URLs are returned unchanged.
    pub fn absolute_asset(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}{}{}",
            self.site_url(),
            self.config.path_prefix,
            path.trim_start_matches('/')
        )
    }

    /// Href for a site asset like `/photo.jpg`, honouring `path_prefix`.
    pub fn asset(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.config.path_prefix, path.trim_start_matches('/'))
    }
}
