//! Contact channels and the rule deciding which ones are published.
//!
//! `author.contacts` in `config.toml` maps a channel name to a handle:
//!
//! ```toml
//! [author.contacts]
//! email = "contact@example.com"
//! twitter = "example"
//! facebook = "#"      # placeholder: not published
//! instagram = ""      # placeholder: not published
//! ```
//!
//! A channel whose value is empty or the literal `"#"` is omitted entirely.
//! The sidebar and the footer both go through [`published_contacts`], so the
//! two never disagree about which channels are shown.

use crate::config::is_placeholder;
use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of supported channels, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactChannel {
    Email,
    Github,
    Linkedin,
    Twitter,
    Bitbucket,
    Gitlab,
    Telegram,
    Facebook,
    Instagram,
    Vkontakte,
    Youtube,
    Codepen,
    Weibo,
    Line,
    Rss,
}

impl ContactChannel {
    pub const ALL: [ContactChannel; 15] = [
        Self::Email,
        Self::Github,
        Self::Linkedin,
        Self::Twitter,
        Self::Bitbucket,
        Self::Gitlab,
        Self::Telegram,
        Self::Facebook,
        Self::Instagram,
        Self::Vkontakte,
        Self::Youtube,
        Self::Codepen,
        Self::Weibo,
        Self::Line,
        Self::Rss,
    ];

    /// Key used in `[author.contacts]`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Bitbucket => "bitbucket",
            Self::Gitlab => "gitlab",
            Self::Telegram => "telegram",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Vkontakte => "vkontakte",
            Self::Youtube => "youtube",
            Self::Codepen => "codepen",
            Self::Weibo => "weibo",
            Self::Line => "line",
            Self::Rss => "rss",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Human-readable label used for link text and `aria-label`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::Bitbucket => "Bitbucket",
            Self::Gitlab => "GitLab",
            Self::Telegram => "Telegram",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Vkontakte => "VK",
            Self::Youtube => "YouTube",
            Self::Codepen => "CodePen",
            Self::Weibo => "Weibo",
            Self::Line => "Line",
            Self::Rss => "RSS",
        }
    }

    /// Build the link target for a handle on this channel.
    ///
    /// Handles that are already absolute URLs are used unchanged.
    pub fn href(self, handle: &str) -> String {
        let handle = handle.trim();
        if handle.starts_with("http://") || handle.starts_with("https://") {
            return handle.to_string();
        }
        match self {
            Self::Email => format!("mailto:{handle}"),
            Self::Github => format!("https://github.com/{handle}"),
            Self::Linkedin => format!("https://www.linkedin.com/in/{handle}"),
            Self::Twitter => format!("https://twitter.com/{handle}"),
            Self::Bitbucket => format!("https://bitbucket.org/{handle}"),
            Self::Gitlab => format!("https://gitlab.com/{handle}"),
            Self::Telegram => format!("https://t.me/{handle}"),
            Self::Facebook => format!("https://www.facebook.com/{handle}"),
            Self::Instagram => format!("https://www.instagram.com/{handle}"),
            Self::Vkontakte => format!("https://vk.com/{handle}"),
            Self::Youtube => format!("https://www.youtube.com/channel/{handle}"),
            Self::Codepen => format!("https://codepen.io/{handle}"),
            Self::Weibo => format!("https://weibo.com/{handle}"),
            Self::Line => format!("https://line.me/ti/p/{handle}"),
            // Feed links are site paths, not handles
            Self::Rss => handle.to_string(),
        }
    }
}

impl fmt::Display for ContactChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A channel that passed the placeholder rule, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedContact<'a> {
    pub channel: ContactChannel,
    pub handle: &'a str,
    pub href: String,
}

/// Channels to render, in [`ContactChannel::ALL`] order.
///
/// Values that are empty or `"#"` are dropped. Unknown channel names are
/// rejected when the config is loaded, so they never reach this point.
pub fn published_contacts(contacts: &BTreeMap<String, String>) -> Vec<PublishedContact<'_>> {
    ContactChannel::ALL
        .into_iter()
        .filter_map(|channel| {
            let handle = contacts.get(channel.name())?;
            if is_placeholder(handle) {
                return None;
            }
            Some(PublishedContact {
                channel,
                handle: handle.as_str(),
                href: channel.href(handle),
            })
        })
        .collect()
}
