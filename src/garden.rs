//! Digital garden card selection.
//!
//! The garden page shows every [`GardenEntry`] as a card and one detail panel.
//! At most one card is selected at a time:
//!
//! ```text
//!              Select(i)                    Select(j)
//! Unselected ────────────▶ Selected(i) ────────────▶ Selected(j)
//!      ▲                        │
//!      └──── Navigate { title } ┘   (re-derived from the new page)
//! ```
//!
//! There is no deselect event: leaving `Selected` only happens by navigating
//! to a page whose title matches no entry. Selecting a card asks the view to
//! scroll the detail panel into view.
//!
//! The build renders the initial state of every garden page statically;
//! `static/garden.js` runs the same transitions in the browser.

use crate::config::GardenEntry;

/// DOM id of the detail panel that `Effect::ScrollIntoView` targets.
pub const DETAIL_PANEL_ID: &str = "garden-detail";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A card was clicked.
    Select(usize),
    /// The page changed; the selection follows the new page's title.
    Navigate { title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScrollIntoView(&'static str),
}

impl Selection {
    /// Selection for a page, found by exact title. The first match wins, so
    /// a duplicated title always selects the earlier entry.
    pub fn initial(entries: &[GardenEntry], page_title: &str) -> Self {
        entries
            .iter()
            .position(|e| e.title == page_title)
            .map_or(Selection::Unselected, Selection::Selected)
    }

    /// Selection for an entry's stable key.
    pub fn for_key(entries: &[GardenEntry], key: &str) -> Self {
        entries
            .iter()
            .position(|e| e.key == key)
            .map_or(Selection::Unselected, Selection::Selected)
    }

    /// Apply one event. Returns the next state and any side effect.
    ///
    /// `Select` with an index past the end leaves the state unchanged.
    pub fn apply(self, entries: &[GardenEntry], event: &Event) -> (Self, Option<Effect>) {
        match event {
            Event::Select(i) if *i < entries.len() => (
                Selection::Selected(*i),
                Some(Effect::ScrollIntoView(DETAIL_PANEL_ID)),
            ),
            Event::Select(_) => (self, None),
            Event::Navigate { title } => (Selection::initial(entries, title), None),
        }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            Selection::Selected(i) => Some(i),
            Selection::Unselected => None,
        }
    }

    pub fn is_selected(self, i: usize) -> bool {
        self == Selection::Selected(i)
    }

    /// The selected entry, if any.
    pub fn entry(self, entries: &[GardenEntry]) -> Option<&GardenEntry> {
        self.index().and_then(|i| entries.get(i))
    }
}
