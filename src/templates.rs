//! Page template assembly.
//!
//! [`render_document`] turns one [`ContentDocument`] into a complete HTML page:
//! the shared `<head>` (title, description, Open Graph tags, analytics), the
//! sidebar with navigation, and a body chosen by the document's [`Template`]:
//!
//! | Template | Body |
//! |----------|------|
//! | `landing` | hero with the document body, recent work, contact form, footer |
//! | `projects` | document body as intro, then one card per project |
//! | `digital-garden` | garden cards with the current entry selected, detail panel |
//! | `post` | article with date, optional comments |
//! | `page` | article |
//!
//! The blog index (`/posts`, `/posts/page/2`, ...) has no document behind it
//! and is rendered by [`render_posts_index`].

use crate::components::{
    contact_form, footer, garden_cards, garden_detail, hero_title, project_card, sidebar, work_card,
};
use crate::garden::Selection;
use crate::metadata::SiteMetadata;
use crate::naming::normalize_slug;
use crate::scan::{CONTACT_SCRIPT, ContentSet, GARDEN_SCRIPT, POSTS_INDEX, RSS_FILE};
use crate::types::{ContentDocument, Template};
use maud::{DOCTYPE, Markup, PreEscaped, html};

pub use crate::types::TemplateError;

/// Hrefs of the generated assets, already prefixed and fingerprinted.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPaths {
    pub stylesheet: String,
    pub garden_script: String,
    pub contact_script: String,
    pub feed: String,
}

impl AssetPaths {
    pub fn new(meta: &SiteMetadata, stylesheet_file: &str) -> Self {
        Self {
            stylesheet: meta.asset(stylesheet_file),
            garden_script: meta.asset(GARDEN_SCRIPT),
            contact_script: meta.asset(CONTACT_SCRIPT),
            feed: meta.asset(RSS_FILE),
        }
    }
}

/// Everything a template may read. Built once per build and shared by all pages.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub meta: SiteMetadata<'a>,
    pub content: &'a ContentSet,
    pub assets: &'a AssetPaths,
}

/// Head metadata for one page.
struct PageHead<'a> {
    title: String,
    description: Option<&'a str>,
    social_image: Option<&'a str>,
    slug: &'a str,
}

// ============================================================================
// Document shell
// ============================================================================

fn base_document(
    ctx: &RenderContext,
    head: &PageHead,
    template: Template,
    content: Markup,
    scripts: &[&str],
) -> Markup {
    let meta = &ctx.meta;
    let description = head
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or(meta.subtitle());
    let og_image = head
        .social_image
        .or_else(|| Some(meta.author().photo.as_str()).filter(|p| !p.is_empty()))
        .map(|img| meta.absolute_asset(img));
    let og_type = if template == Template::Post {
        "article"
    } else {
        "website"
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (head.title) }
                meta name="description" content=(description);
                meta property="og:title" content=(head.title);
                meta property="og:description" content=(description);
                meta property="og:url" content=(meta.absolute_url(head.slug));
                meta property="og:type" content=(og_type);
                @if let Some(image) = &og_image {
                    meta property="og:image" content=(image);
                }
                meta name="twitter:card" content="summary";
                link rel="stylesheet" href=(ctx.assets.stylesheet);
                link rel="alternate" type="application/rss+xml" title=(meta.title()) href=(ctx.assets.feed);
                @if let Some(id) = meta.google_analytics_id() {
                    (analytics_snippet(id))
                }
            }
            body class=(template.body_class()) {
                div.layout {
                    (sidebar(meta, head.slug))
                    main.content {
                        (content)
                    }
                }
                @for src in scripts {
                    script src=(src) defer {}
                }
            }
        }
    }
}

fn analytics_snippet(id: &str) -> Markup {
    // serde_json gives a correctly escaped JS string literal
    let id_literal = serde_json::to_string(id).unwrap_or_else(|_| "\"\"".to_string());
    html! {
        script async src={ "https://www.googletagmanager.com/gtag/js?id=" (id) } {}
        script {
            (PreEscaped(format!(
                "window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config',{id_literal});"
            )))
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Render a document with the template its front matter selects.
pub fn render_document(doc: &ContentDocument, ctx: &RenderContext) -> Markup {
    let head = PageHead {
        title: ctx.meta.page_title(doc.title()),
        description: doc.description(),
        social_image: doc.frontmatter.social_image.as_deref(),
        slug: &doc.slug,
    };
    let body_html = doc.render_body();

    let (content, scripts): (Markup, Vec<&str>) = match doc.template() {
        Template::Landing => (
            render_landing(doc, &body_html, ctx),
            contact_scripts(ctx),
        ),
        Template::Projects => (render_projects(doc, &body_html, ctx), Vec::new()),
        Template::DigitalGarden => (
            render_garden(doc, &body_html, ctx),
            vec![ctx.assets.garden_script.as_str()],
        ),
        Template::Post => (render_post(doc, &body_html, ctx), Vec::new()),
        Template::Page => (render_page(doc, &body_html), Vec::new()),
    };

    base_document(ctx, &head, doc.template(), content, &scripts)
}

fn contact_scripts<'a>(ctx: &RenderContext<'a>) -> Vec<&'a str> {
    if ctx.meta.contact_endpoint().is_some() {
        vec![ctx.assets.contact_script.as_str()]
    } else {
        Vec::new()
    }
}

fn render_landing(doc: &ContentDocument, body_html: &str, ctx: &RenderContext) -> Markup {
    let meta = &ctx.meta;
    html! {
        (hero_title(doc.title(), body_html))
        @if !meta.recent_work().is_empty() {
            section.recent-work {
                h2 { "My Recent Work" }
                @for work in meta.recent_work() {
                    (work_card(work, meta))
                }
            }
        }
        (contact_form(meta))
        (footer(meta))
    }
}

fn render_projects(doc: &ContentDocument, body_html: &str, ctx: &RenderContext) -> Markup {
    html! {
        div.page {
            h1.page-title { (doc.title()) }
            div.page-body { (PreEscaped(body_html)) }
            div.projects {
                @for project in ctx.meta.projects() {
                    (project_card(project, &ctx.meta))
                }
            }
        }
    }
}

/// Selection for a garden page: the entry linking to this page, found by key;
/// failing that, the first entry with this page's title.
pub fn garden_selection(doc: &ContentDocument, meta: &SiteMetadata) -> Selection {
    let entries = meta.garden();
    entries
        .iter()
        .find(|e| !e.link.trim().is_empty() && normalize_slug(&e.link) == doc.slug)
        .map(|e| Selection::for_key(entries, &e.key))
        .unwrap_or_else(|| Selection::initial(entries, doc.title()))
}

fn render_garden(doc: &ContentDocument, body_html: &str, ctx: &RenderContext) -> Markup {
    let meta = &ctx.meta;
    let selection = garden_selection(doc, meta);
    let selected = selection.entry(meta.garden());
    html! {
        div.page {
            h1.page-title { (doc.title()) }
            @if selected.is_none() {
                div.page-body { (PreEscaped(body_html)) }
            }
            div.garden {
                (garden_cards(meta.garden(), selection, meta))
                (garden_detail(selected, body_html))
            }
        }
    }
}

fn render_post(doc: &ContentDocument, body_html: &str, ctx: &RenderContext) -> Markup {
    let meta = &ctx.meta;
    html! {
        article.post {
            header.post-header {
                h1.post-title { (doc.title()) }
                @if let (Some(date), Some(display)) = (doc.date(), doc.display_date()) {
                    time.post-date datetime=(date.format("%Y-%m-%d").to_string()) { (display) }
                }
                @if doc.is_draft() {
                    span.draft-badge { "Draft" }
                }
            }
            div.post-body { (PreEscaped(body_html)) }
            footer.post-footer {
                a href=(meta.url_for(POSTS_INDEX)) { "All posts" }
            }
            @if let Some(shortname) = meta.disqus_shortname() {
                (comments(shortname, &meta.absolute_url(&doc.slug), &doc.slug))
            }
        }
    }
}

fn comments(shortname: &str, page_url: &str, identifier: &str) -> Markup {
    let config = format!(
        "var disqus_config=function(){{this.page.url={};this.page.identifier={};}};",
        serde_json::to_string(page_url).unwrap_or_default(),
        serde_json::to_string(identifier).unwrap_or_default(),
    );
    html! {
        div id="disqus_thread" {}
        script { (PreEscaped(config)) }
        script src={ "https://" (shortname) ".disqus.com/embed.js" } async {}
    }
}

fn render_page(doc: &ContentDocument, body_html: &str) -> Markup {
    html! {
        article.page {
            h1.page-title { (doc.title()) }
            div.page-body { (PreEscaped(body_html)) }
        }
    }
}

// ============================================================================
// Blog index
// ============================================================================

/// Number of blog index pages. Always at least one, even with no posts.
pub fn posts_page_count(ctx: &RenderContext) -> usize {
    let per_page = ctx.meta.posts_per_page().max(1);
    ctx.content.posts().len().div_ceil(per_page).max(1)
}

/// Slug of blog index page `page` (1-based).
pub fn posts_page_slug(page: usize) -> String {
    if page <= 1 {
        POSTS_INDEX.to_string()
    } else {
        format!("{POSTS_INDEX}/page/{page}")
    }
}

/// Render blog index page `page` (1-based).
pub fn render_posts_index(page: usize, ctx: &RenderContext) -> Result<Markup, TemplateError> {
    let last = posts_page_count(ctx);
    if page == 0 || page > last {
        return Err(TemplateError::PageOutOfRange { page, last });
    }
    let meta = &ctx.meta;
    let per_page = meta.posts_per_page().max(1);
    let posts = ctx.content.posts();
    let shown = posts.iter().skip((page - 1) * per_page).take(per_page);

    let slug = posts_page_slug(page);
    let head = PageHead {
        title: meta.page_title("Blog"),
        description: None,
        social_image: None,
        slug: &slug,
    };
    let content = html! {
        div.feed {
            h1.page-title { "Blog" }
            @if posts.is_empty() {
                p.empty { "No posts yet." }
            }
            @for post in shown {
                article.feed-item {
                    @if let Some(display) = post.display_date() {
                        time.feed-date { (display) }
                    }
                    h2.feed-title { a href=(meta.url_for(&post.slug)) { (post.title()) } }
                    @if let Some(description) = post.description() {
                        p.feed-description { (description) }
                    }
                }
            }
            nav.pagination {
                @if page > 1 {
                    a.pagination-prev rel="prev" href=(meta.url_for(&posts_page_slug(page - 1))) { "← Newer" }
                }
                @if page < last {
                    a.pagination-next rel="next" href=(meta.url_for(&posts_page_slug(page + 1))) { "Older →" }
                }
            }
        }
    };
    Ok(base_document(ctx, &head, Template::Page, content, &[]))
}
