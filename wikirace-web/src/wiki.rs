//! Wikipedia client
//!
//! [`ContentProvider`] implementation over the MediaWiki action API and the
//! REST summary endpoint, fetched through the browser. Response decoding is
//! plain serde over the JSON text, so it is fully testable off-line.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::dom;
use wikirace_game::{
    Article, ContentProvider, PageContent, ProviderError, ProviderResult, SearchHit,
};

const ACTION_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
const REST_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1";
const ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";
/// Rendered pages can reference thousands of pages; the viewer only needs
/// a sample for prefetch hints.
const MAX_CONTENT_LINKS: usize = 100;

static TAG_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]*>").ok());

/// Live Wikipedia over the browser `fetch` API.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikiClient;

impl WikiClient {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn get_json<T: DeserializeOwned>(url: &str) -> ProviderResult<T> {
        let text = dom::fetch_text(url)
            .await
            .map_err(|err| ProviderError::Network(dom::js_error_message(&err)))?;
        serde_json::from_str(&text).map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

#[async_trait(?Send)]
impl ContentProvider for WikiClient {
    async fn search(&self, query: &str, limit: u32) -> ProviderResult<Vec<SearchHit>> {
        let url = action_url(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", &limit.to_string()),
        ])?;
        let response: QueryResponse = Self::get_json(&url).await?;
        Ok(response
            .query
            .unwrap_or_default()
            .search
            .into_iter()
            .map(|hit| SearchHit {
                title: hit.title,
                pageid: hit.pageid,
                extract: strip_tags(&hit.snippet),
            })
            .collect())
    }

    async fn random_article(&self) -> ProviderResult<Article> {
        let url = action_url(&[
            ("action", "query"),
            ("list", "random"),
            ("rnnamespace", "0"),
            ("rnlimit", "1"),
        ])?;
        let response: QueryResponse = Self::get_json(&url).await?;
        let page = response
            .query
            .unwrap_or_default()
            .random
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Missing("random article".to_string()))?;
        let mut article = Article::new(page.title, page.id);
        article.url = Some(article_url(&article.title));
        Ok(article)
    }

    async fn summary(&self, title: &str) -> ProviderResult<Article> {
        let encoded = utf8_percent_encode(title, NON_ALPHANUMERIC);
        let url = format!("{REST_ENDPOINT}/page/summary/{encoded}");
        let response: SummaryResponse = Self::get_json(&url).await?;
        Ok(Article {
            title: response.title,
            pageid: response.pageid,
            extract: response.extract,
            url: response
                .content_urls
                .and_then(|urls| urls.desktop)
                .and_then(|desktop| desktop.page),
        })
    }

    async fn content(&self, title: &str) -> ProviderResult<PageContent> {
        let url = action_url(&[
            ("action", "parse"),
            ("page", title),
            ("prop", "text|links"),
        ])?;
        let response: ParseResponse = Self::get_json(&url).await?;
        let body = response
            .parse
            .ok_or_else(|| ProviderError::Missing(title.to_string()))?;
        let links = body
            .links
            .into_iter()
            .filter(|link| link.ns == 0)
            .map(|link| link.title)
            .take(MAX_CONTENT_LINKS)
            .collect();
        Ok(PageContent {
            title: body.title,
            pageid: body.pageid,
            html: body.text.html,
            links,
        })
    }
}

fn action_url(pairs: &[(&str, &str)]) -> ProviderResult<String> {
    let mut url =
        Url::parse(ACTION_ENDPOINT).map_err(|err| ProviderError::Network(err.to_string()))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("format", "json").append_pair("origin", "*");
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
    Ok(url.into())
}

/// Canonical desktop URL for an article title.
#[must_use]
pub fn article_url(title: &str) -> String {
    format!("{ARTICLE_BASE}{}", utf8_percent_encode(title, NON_ALPHANUMERIC))
}

fn strip_tags(html: &str) -> String {
    TAG_RE.as_ref().map_or_else(
        || html.to_string(),
        |re| re.replace_all(html, "").into_owned(),
    )
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBody {
    #[serde(default)]
    search: Vec<RawSearchHit>,
    #[serde(default)]
    random: Vec<RawRandomPage>,
}

#[derive(Debug, Deserialize)]
struct RawSearchHit {
    title: String,
    pageid: u64,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct RawRandomPage {
    id: u64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<ParseBody>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    title: String,
    pageid: u64,
    text: StarKeyed,
    #[serde(default)]
    links: Vec<RawPageLink>,
}

#[derive(Debug, Deserialize)]
struct StarKeyed {
    #[serde(rename = "*")]
    html: String,
}

#[derive(Debug, Deserialize)]
struct RawPageLink {
    ns: i64,
    #[serde(rename = "*", default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: String,
    pageid: u64,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    #[serde(default)]
    desktop: Option<DesktopUrls>,
}

#[derive(Debug, Deserialize)]
struct DesktopUrls {
    #[serde(default)]
    page: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_url_carries_format_origin_and_params() {
        let url = action_url(&[("action", "query"), ("srsearch", "graph theory")]).unwrap();
        assert!(url.starts_with(ACTION_ENDPOINT));
        assert!(url.contains("format=json"));
        assert!(url.contains("origin=*"));
        assert!(url.contains("srsearch=graph+theory"));
    }

    #[test]
    fn strip_tags_removes_markup_only() {
        let snippet = r#"The <span class="searchmatch">theory</span> of graphs"#;
        assert_eq!(strip_tags(snippet), "The theory of graphs");
    }

    #[test]
    fn article_url_escapes_the_title() {
        assert_eq!(
            article_url("Graph theory"),
            "https://en.wikipedia.org/wiki/Graph%20theory"
        );
    }

    #[test]
    fn search_response_decodes_and_strips_snippets() {
        let text = r#"{"query":{"search":[
            {"title":"Graph theory","pageid":12,"snippet":"the <b>graph</b>"},
            {"title":"Graph","pageid":13}
        ]}}"#;
        let response: QueryResponse = serde_json::from_str(text).unwrap();
        let hits: Vec<SearchHit> = response
            .query
            .unwrap()
            .search
            .into_iter()
            .map(|hit| SearchHit {
                title: hit.title,
                pageid: hit.pageid,
                extract: strip_tags(&hit.snippet),
            })
            .collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].extract, "the graph");
        assert_eq!(hits[1].extract, "");
    }

    #[test]
    fn random_response_decodes_id_and_title() {
        let text = r#"{"query":{"random":[{"id":42,"title":"Oxygen"}]}}"#;
        let response: QueryResponse = serde_json::from_str(text).unwrap();
        let page = response.query.unwrap().random.into_iter().next().unwrap();
        assert_eq!(page.id, 42);
        assert_eq!(page.title, "Oxygen");
    }

    #[test]
    fn parse_response_keeps_main_namespace_links_only() {
        let text = r#"{"parse":{"title":"Oxygen","pageid":22303,
            "text":{"*":"<p>hi</p>"},
            "links":[{"ns":0,"*":"Nitrogen"},{"ns":14,"*":"Category:Gases"},{"ns":0,"*":"Helium"}]}}"#;
        let response: ParseResponse = serde_json::from_str(text).unwrap();
        let body = response.parse.unwrap();
        let links: Vec<String> = body
            .links
            .into_iter()
            .filter(|link| link.ns == 0)
            .map(|link| link.title)
            .collect();
        assert_eq!(links, vec!["Nitrogen", "Helium"]);
        assert_eq!(body.text.html, "<p>hi</p>");
    }

    #[test]
    fn summary_response_tolerates_missing_extras() {
        let text = r#"{"title":"Oxygen","pageid":22303}"#;
        let response: SummaryResponse = serde_json::from_str(text).unwrap();
        assert!(response.extract.is_none());
        assert!(response.content_urls.is_none());
    }

    #[test]
    fn summary_error_payload_fails_decoding() {
        // The REST endpoint answers missing pages with an error object
        // that has no pageid; decoding must fail so navigation no-ops.
        let text = r#"{"type":"about:blank","title":"Not found.","status":404}"#;
        assert!(serde_json::from_str::<SummaryResponse>(text).is_err());
    }
}
