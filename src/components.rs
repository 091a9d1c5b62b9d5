//! Presentational components.
//!
//! Every function here maps one piece of data onto markup and nothing else:
//! no I/O, no configuration lookups beyond the [`SiteMetadata`] passed in.
//! Page templates in [`crate::templates`] compose them.
//!
//! Placeholder links (`""` or `"#"`) never produce an anchor. A component
//! whose only purpose is the link renders nothing at all.

use crate::config::{Author, GardenEntry, MenuItem, Project, WorkItem, is_placeholder};
use crate::contacts::PublishedContact;
use crate::garden::{DETAIL_PANEL_ID, Selection};
use crate::metadata::SiteMetadata;
use crate::naming::normalize_slug;
use maud::{Markup, PreEscaped, html};

// ============================================================================
// Project cards
// ============================================================================

pub fn tech_tag(tech: &str) -> Markup {
    html! {
        span.tech { (tech) }
    }
}

/// "Source" button. Renders nothing for a placeholder.
pub fn source_button(href: &str) -> Markup {
    html! {
        @if !is_placeholder(href) {
            a.button.source-button href=(href.trim()) target="_blank" rel="noopener" {
                span { "Source" }
            }
        }
    }
}

/// "View" button for a live demo. Renders nothing for a placeholder.
pub fn view_button(href: &str) -> Markup {
    html! {
        @if !is_placeholder(href) {
            a.button.view-button href=(href.trim()) target="_blank" rel="noopener" {
                span { "View" }
            }
        }
    }
}

/// Project screenshot, linked to the live demo or else to the source code.
pub fn project_image(project: &Project, meta: &SiteMetadata) -> Markup {
    let target = [project.link.as_str(), project.source_code.as_str()]
        .into_iter()
        .find(|href| !is_placeholder(href));
    let img = html! {
        img.project-image src=(meta.asset(&project.image)) alt=(project.title) loading="lazy";
    };
    html! {
        div.image-container {
            @if let Some(href) = target {
                a href=(href.trim()) target="_blank" rel="noopener" { (img) }
            } @else {
                (img)
            }
        }
    }
}

pub fn project_card(project: &Project, meta: &SiteMetadata) -> Markup {
    html! {
        article.project-card {
            h2.project-name { (project.title) }
            div.project-container {
                div.first-column {
                    (project_image(project, meta))
                    div.buttons-container {
                        (source_button(&project.source_code))
                        (view_button(&project.link))
                    }
                }
                div.second-column {
                    p.project-description { (project.description) }
                    div.techs-container {
                        @for tech in &project.techs {
                            (tech_tag(tech))
                        }
                    }
                }
            }
        }
    }
}

/// A "recent work" showcase entry on the landing page.
pub fn work_card(work: &WorkItem, meta: &SiteMetadata) -> Markup {
    html! {
        article.work-card {
            img.work-image src=(meta.asset(&work.image)) alt=(work.title) loading="lazy";
            div.work-description {
                h3 { (work.title) }
                p.work-date { (work.date) }
                p { (work.description) }
                div.techs-container {
                    @for tech in &work.techs {
                        (tech_tag(tech))
                    }
                }
                (view_button(&work.link))
            }
        }
    }
}

// ============================================================================
// Digital garden
// ============================================================================

/// One garden card. Cards link to the entry's page when it has one.
pub fn garden_card(
    entry: &GardenEntry,
    index: usize,
    selected: bool,
    meta: &SiteMetadata,
) -> Markup {
    let body = html! {
        div.image-container {
            @if !entry.image.is_empty() {
                img.image src=(meta.asset(&entry.image)) alt="" loading="lazy";
            }
        }
        div.title { (entry.title) }
        @if !entry.date.is_empty() {
            div.date { "last updated " (entry.date) }
        }
    };
    let class = if selected {
        "card-container selected"
    } else {
        "card-container"
    };
    html! {
        @if is_placeholder(&entry.link) {
            div class=(class) data-index=(index) data-key=(entry.key)
                aria-current=[selected.then_some("true")] { (body) }
        } @else {
            a class=(class) href=(meta.href(&entry.link)) data-index=(index) data-key=(entry.key)
                aria-current=[selected.then_some("true")] { (body) }
        }
    }
}

pub fn garden_cards(entries: &[GardenEntry], selection: Selection, meta: &SiteMetadata) -> Markup {
    html! {
        div.cards-container {
            @for (i, entry) in entries.iter().enumerate() {
                (garden_card(entry, i, selection.is_selected(i), meta))
            }
        }
    }
}

/// Collapsible block, open by default when `open` is set.
pub fn details_container(title: &str, header: Option<&str>, content: Markup, open: bool) -> Markup {
    html! {
        details.details-container open[open] {
            summary { b { (title) } }
            @if let Some(header) = header {
                b.details-header { (header) }
            }
            div.details-content { (content) }
        }
    }
}

/// The panel beside the garden cards. Empty when nothing is selected.
pub fn garden_detail(entry: Option<&GardenEntry>, body_html: &str) -> Markup {
    let updated = entry
        .filter(|e| !e.date.is_empty())
        .map(|e| format!("last updated {}", e.date));
    html! {
        section.detail-panel id=(DETAIL_PANEL_ID) {
            @if let Some(entry) = entry {
                (details_container(&entry.title, updated.as_deref(), html! { (PreEscaped(body_html)) }, true))
            }
        }
    }
}

// ============================================================================
// Sidebar, navigation, footer
// ============================================================================

/// Published contacts. Shared by the sidebar and the footer.
pub fn contacts_list(contacts: &[PublishedContact]) -> Markup {
    html! {
        @if !contacts.is_empty() {
            ul.contacts {
                @for contact in contacts {
                    li class={ "contact contact-" (contact.channel.name()) } {
                        a href=(contact.href) rel="noopener noreferrer" target="_blank"
                            aria-label=(contact.channel.label()) {
                            (contact.channel.label())
                        }
                    }
                }
            }
        }
    }
}

/// Author photo, name and bio. The name is the page's `h1` on the home page.
pub fn author_block(author: &Author, meta: &SiteMetadata, is_index: bool) -> Markup {
    let home = meta.url_for("/");
    html! {
        div.author {
            @if !author.photo.is_empty() {
                a href=(home) {
                    img.author-photo src=(meta.asset(&author.photo)) width="75" height="75" alt=(author.name);
                }
            }
            @if is_index {
                h1.author-title { a href=(home) { (author.name) } }
            } @else {
                h2.author-title { a href=(home) { (author.name) } }
            }
            @if !author.bio.is_empty() {
                p.author-subtitle { (author.bio) }
            }
        }
    }
}

/// Menu entries in config order. The entry for the current page is marked.
pub fn site_nav(menu: &[MenuItem], current_slug: &str, meta: &SiteMetadata) -> Markup {
    html! {
        nav.menu {
            ul.menu-list {
                @for item in menu {
                    @let current = is_current(&item.path, current_slug);
                    li.menu-item.current[current] {
                        a href=(meta.href(&item.path)) aria-current=[current.then_some("page")] {
                            (item.label)
                        }
                    }
                }
            }
        }
    }
}

fn is_current(menu_path: &str, current_slug: &str) -> bool {
    let path = normalize_slug(menu_path);
    if path == "/" {
        return current_slug == "/";
    }
    current_slug == path || current_slug.starts_with(&format!("{path}/"))
}

pub fn sidebar(meta: &SiteMetadata, current_slug: &str) -> Markup {
    html! {
        aside.sidebar {
            (author_block(meta.author(), meta, current_slug == "/"))
            (site_nav(meta.menu(), current_slug, meta))
            (contacts_list(&meta.contacts()))
            @if !meta.copyright().is_empty() {
                div.copyright { (meta.copyright()) }
            }
        }
    }
}

pub fn footer(meta: &SiteMetadata) -> Markup {
    html! {
        footer.footer-container {
            @if !meta.copyright().is_empty() {
                div.copyright { (meta.copyright()) }
            }
            (contacts_list(&meta.contacts()))
        }
    }
}

// ============================================================================
// Landing page
// ============================================================================

/// Landing hero: heading plus the rendered intro.
pub fn hero_title(heading: &str, intro_html: &str) -> Markup {
    html! {
        section.hero {
            div.hero-container {
                h1 { (heading) }
                div.hero-intro { (PreEscaped(intro_html)) }
                (action_button("Let's work together!", "#contact"))
            }
        }
    }
}

pub fn action_button(label: &str, href: &str) -> Markup {
    html! {
        div.button-container {
            a.button.action-button href=(href) { (label) }
        }
    }
}

/// Contact form (name, email, message). `static/contact.js` submits it.
///
/// Renders nothing when the contact endpoint is disabled.
pub fn contact_form(meta: &SiteMetadata) -> Markup {
    let Some(endpoint) = meta.contact_endpoint() else {
        return html! {};
    };
    let form_name = meta.contact_form_name();
    html! {
        section.contact id="contact" {
            h2 { "Get in touch" }
            form.contact-form name=(form_name) method="post" action=(endpoint)
                data-netlify="true" netlify-honeypot="bot-field" {
                input type="hidden" name="form-name" value=(form_name);
                p.hidden { label { "Leave this empty: " input name="bot-field"; } }
                label for="name" { "Your Name" }
                input id="name" type="text" name="name" required;
                label for="email" { "Your Email" }
                input id="email" type="email" name="email" required;
                label for="message" { "Message" }
                textarea id="message" name="message" rows="6" required {}
                button.button type="submit" { "Send" }
            }
            p.form-status role="status" aria-live="polite" {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_config;

    fn project(link: &str) -> Project {
        Project {
            title: "X".into(),
            image: "/media/x.png".into(),
            description: "A project".into(),
            link: link.into(),
            techs: vec!["A".into()],
            source_code: "https://github.com/x".into(),
        }
    }

    #[test]
    fn project_card_without_link_has_no_view_button() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = project_card(&project(""), &meta).into_string();

        assert!(html.contains("<h2 class=\"project-name\">X</h2>"));
        assert!(html.contains("href=\"https://github.com/x\""));
        assert!(html.contains(">Source<"));
        assert!(html.contains("<span class=\"tech\">A</span>"));
        assert!(!html.contains(">View<"));
    }

    #[test]
    fn project_image_prefers_live_link() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = project_image(&project("https://x.example.com"), &meta).into_string();
        assert!(html.contains("href=\"https://x.example.com\""));
        assert!(!html.contains("github.com"));
    }

    #[test]
    fn project_image_falls_back_to_source_code() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = project_image(&project("#"), &meta).into_string();
        assert!(html.contains("href=\"https://github.com/x\""));
    }

    #[test]
    fn placeholder_buttons_render_nothing() {
        assert_eq!(source_button("#").into_string(), "");
        assert_eq!(view_button("").into_string(), "");
    }

    #[test]
    fn garden_cards_mark_only_selected() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = garden_cards(meta.garden(), Selection::Selected(1), &meta).into_string();
        assert_eq!(html.matches("card-container selected").count(), 1);
        assert!(html.contains("last updated June 2020"));
    }

    #[test]
    fn garden_detail_empty_when_unselected() {
        let html = garden_detail(None, "<p>ignored</p>").into_string();
        assert!(html.contains("id=\"garden-detail\""));
        assert!(!html.contains("ignored"));
    }

    #[test]
    fn details_container_open_flag() {
        let open = details_container("T", None, html! { "c" }, true).into_string();
        assert!(open.contains("<details class=\"details-container\" open>"));
        let closed = details_container("T", Some("H"), html! { "c" }, false).into_string();
        assert!(!closed.contains(" open"));
        assert!(closed.contains("<b class=\"details-header\">H</b>"));
    }

    #[test]
    fn contacts_list_renders_each_channel_once() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = contacts_list(&meta.contacts()).into_string();
        assert!(html.contains("https://twitter.com/ramonak_io"));
        assert!(!html.contains("facebook"));
        assert!(!html.contains("instagram"));
    }

    #[test]
    fn sidebar_and_footer_show_same_contacts() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let list = contacts_list(&meta.contacts()).into_string();
        assert!(sidebar(&meta, "/pages/about").into_string().contains(&list));
        assert!(footer(&meta).into_string().contains(&list));
    }

    #[test]
    fn nav_marks_current_section() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = site_nav(meta.menu(), "/posts/heroku", &meta).into_string();
        assert!(html.contains("<li class=\"menu-item current\"><a href=\"/posts/\" aria-current=\"page\">Blog</a>"));
        assert!(html.contains("<li class=\"menu-item\"><a href=\"/\">Home</a>"));
    }

    #[test]
    fn author_name_is_h1_only_on_home() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        assert!(author_block(meta.author(), &meta, true).into_string().contains("<h1"));
        assert!(author_block(meta.author(), &meta, false).into_string().contains("<h2"));
    }

    #[test]
    fn contact_form_has_three_fields() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = contact_form(&meta).into_string();
        assert!(html.contains("name=\"name\""));
        assert!(html.contains("name=\"email\""));
        assert!(html.contains("name=\"message\""));
        assert!(html.contains("id=\"contact\""));
    }

    #[test]
    fn contact_form_labels_point_at_fields() {
        let config = sample_config();
        let meta = SiteMetadata::new(&config);
        let html = contact_form(&meta).into_string();
        for field in ["name", "email", "message"] {
            assert!(html.contains(&format!("<label for=\"{field}\">")));
            assert!(html.contains(&format!("id=\"{field}\"")));
        }
    }

    #[test]
    fn contact_form_hidden_without_endpoint() {
        let mut config = sample_config();
        config.contact.endpoint = String::new();
        let meta = SiteMetadata::new(&config);
        assert_eq!(contact_form(&meta).into_string(), "");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            tech_tag("<script>").into_string(),
            "<span class=\"tech\">&lt;script&gt;</span>"
        );
    }
}
