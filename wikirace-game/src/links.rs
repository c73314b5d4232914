//! Hyperlink classification
//!
//! Pure rules deciding which rendered hyperlinks count as legal moves.
//! Only hrefs inside the article namespace qualify: the `/wiki/` path with
//! no colon (which excludes `File:`, `Category:`, `Template:` pages and
//! absolute URLs) and no fragment marker. The rendering surface must defer
//! to this module and never judge legality itself.

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

/// Path prefix of the article namespace.
pub const ARTICLE_PREFIX: &str = "/wiki/";

static TITLE_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^/wiki/(.+)$").ok());

/// Verdict for a single rendered hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    pub legal: bool,
    /// Canonical article title, present exactly when the link is legal.
    pub title: Option<String>,
}

impl ClassifiedLink {
    const fn illegal() -> Self {
        Self {
            legal: false,
            title: None,
        }
    }
}

/// Classify an href and recover the canonical title of a legal move.
#[must_use]
pub fn classify(href: &str) -> ClassifiedLink {
    if !is_article_href(href) {
        return ClassifiedLink::illegal();
    }
    match title_from_href(href) {
        Some(title) if !title.is_empty() => ClassifiedLink {
            legal: true,
            title: Some(title),
        },
        _ => ClassifiedLink::illegal(),
    }
}

/// Namespace check alone; title recovery may still fail on a mangled path.
#[must_use]
pub fn is_article_href(href: &str) -> bool {
    href.starts_with(ARTICLE_PREFIX) && !href.contains(':') && !href.contains('#')
}

/// Recover the display title: path segment after the namespace prefix,
/// word separators restored, percent-escapes decoded.
#[must_use]
pub fn title_from_href(href: &str) -> Option<String> {
    let re = TITLE_RE.as_ref()?;
    let raw = re.captures(href)?.get(1)?.as_str();
    let spaced = raw.replace('_', " ");
    let decoded = percent_decode_str(&spaced).decode_utf8().ok()?;
    Some(decoded.into_owned())
}
