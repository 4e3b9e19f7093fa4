//! Presentation-independent snapshot of what the browser shows.

use std::io::{self, Write};

use serde::Serialize;

use crate::browser::Browser;
use crate::placeholder::{self, Segment};

pub const NO_MATCH_MESSAGE: &str = "No prompts match your search/filter.";

/// One tag filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chip {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub tags: &'a [String],
    pub segments: Vec<Segment>,
    /// The card a deep link points at.
    pub linked: bool,
}

impl Card<'_> {
    /// Prompt text with every placeholder left at its identifier.
    pub fn default_text(&self) -> String {
        placeholder::resolve(&self.segments, &[])
    }

    pub fn placeholder_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field { name } => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    NoMatches,
    LoadFailed(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::NoMatches => NO_MATCH_MESSAGE,
            Notice::LoadFailed(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserView<'a> {
    pub search: &'a str,
    pub chips: Vec<Chip>,
    pub cards: Vec<Card<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<'a> BrowserView<'a> {
    pub fn build(browser: &'a Browser, linked: Option<&str>) -> Self {
        let state = browser.state();
        let chips = browser
            .tags()
            .iter()
            .map(|tag| Chip {
                label: tag.clone(),
                active: *tag == state.tag,
            })
            .collect();
        let cards: Vec<Card<'a>> = browser
            .visible_prompts()
            .map(|p| Card {
                id: &p.id,
                title: &p.title,
                tags: &p.tags,
                segments: placeholder::parse(&p.text),
                linked: linked == Some(p.id.as_str()),
            })
            .collect();
        let notice = match browser.load_error() {
            Some(err) => Some(Notice::LoadFailed(err.to_string())),
            None if cards.is_empty() => Some(Notice::NoMatches),
            None => None,
        };
        Self {
            search: &state.search,
            chips,
            cards,
            notice,
        }
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.chips
            .iter()
            .find(|c| c.active)
            .map(|c| c.label.as_str())
    }
}

/// A text rendering of a [`BrowserView`].
pub trait Presenter {
    fn present(&self, view: &BrowserView<'_>, out: &mut dyn Write) -> io::Result<()>;
}
