//! Article value types shared across the race engine
use serde::{Deserialize, Serialize};

/// A single encyclopedia page as the engine sees it.
///
/// Snapshots are immutable once fetched; a session owns independent copies
/// rather than sharing references with the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub pageid: u64,
    /// Short summary text when the provider supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Article {
    /// Bare article carrying only the identifying fields.
    #[must_use]
    pub fn new(title: impl Into<String>, pageid: u64) -> Self {
        Self {
            title: title.into(),
            pageid,
            extract: None,
            url: None,
        }
    }
}

/// One row of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub pageid: u64,
    /// Plain-text snippet with markup already stripped.
    pub extract: String,
}

impl SearchHit {
    /// Promote a selected hit to a full article value.
    #[must_use]
    pub fn into_article(self) -> Article {
        Article {
            title: self.title,
            pageid: self.pageid,
            extract: if self.extract.is_empty() {
                None
            } else {
                Some(self.extract)
            },
            url: None,
        }
    }
}

/// Rendered page payload consumed by the viewer.
///
/// `links` is advisory only; move legality is decided by [`crate::links`],
/// never by this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    pub pageid: u64,
    pub html: String,
    pub links: Vec<String>,
}
