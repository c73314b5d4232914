//! Content provider seam
//!
//! The engine never talks to the network itself; platform crates implement
//! this trait (browser `fetch` in the web frontend, stubs in tests). Every
//! failure here is recoverable: callers fall back to a lesser-detail value
//! or treat the operation as a no-op.

use async_trait::async_trait;

use crate::article::{Article, PageContent, SearchHit};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("no page for {0:?}")]
    Missing(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Abstract contract for the encyclopedia backend.
///
/// Futures are not required to be `Send`; the engine runs on a
/// single-threaded, cooperative scheduler on every platform it targets.
#[async_trait(?Send)]
pub trait ContentProvider {
    /// Full-text search, best matches first.
    async fn search(&self, query: &str, limit: u32) -> ProviderResult<Vec<SearchHit>>;

    /// One random main-namespace article.
    async fn random_article(&self) -> ProviderResult<Article>;

    /// Summary lookup by canonical title.
    async fn summary(&self, title: &str) -> ProviderResult<Article>;

    /// Full rendered page, used by the viewer only.
    async fn content(&self, title: &str) -> ProviderResult<PageContent>;
}
