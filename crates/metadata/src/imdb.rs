//! IMDb title-page provider.
//!
//! Fetches `https://www.imdb.com/title/tt0114709/` with a desktop browser
//! User-Agent, parses the returned HTML with `scraper` and reads the
//! director, runtime and box-office items out of it. One blocking request
//! per call; there is no retry, caching or rate limiting, so a query over N
//! movies costs N sequential round-trips.

use crate::error::{MetadataError, Result};
use crate::provider::MetadataProvider;
use crate::types::{FieldName, ScrapedFields};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:102.0) Gecko/20100101 Firefox/102.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const DIRECTOR_LABEL: &str = "span.ipc-metadata-list-item__label";
const INLINE_ITEM: &str = "li.ipc-inline-list__item";
const CONTENT_ITEM: &str = "span.ipc-metadata-list-item__list-content-item";

/// Settings for `ImdbProvider`
#[derive(Debug, Clone)]
pub struct ImdbConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ImdbConfig {
    /// Point at another host (a mirror or a local test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Per-request timeout (default: 15s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ImdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Scrapes metadata from IMDb title pages
pub struct ImdbProvider {
    client: Client,
    base_url: String,
}

impl ImdbProvider {
    /// Create a provider with the default settings
    pub fn new() -> Result<Self> {
        Self::from_config(ImdbConfig::default())
    }

    pub fn from_config(config: ImdbConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Page URL for an external id like "tt0114709"
    pub fn title_url(&self, external_id: &str) -> String {
        format!("{}/title/{}/", self.base_url, external_id)
    }

    fn fetch_page(&self, external_id: &str) -> Result<String> {
        let response = self.client.get(self.title_url(external_id)).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(MetadataError::ProviderUnavailable {
                id: external_id.to_string(),
                reason: format!("HTTP status {}", status),
            });
        }
        Ok(response.text()?)
    }
}

impl MetadataProvider for ImdbProvider {
    fn name(&self) -> &str {
        "imdb"
    }

    #[instrument(skip(self, fields))]
    fn get_fields(&self, external_id: &str, fields: &[FieldName]) -> Result<ScrapedFields> {
        let page = self.fetch_page(external_id)?;
        debug!("Fetched {} bytes for {}", page.len(), external_id);
        Ok(extract_fields(&page, fields))
    }
}

/// Read `fields` out of a title page; anything not found stays "N/A".
pub fn extract_fields(page: &str, fields: &[FieldName]) -> ScrapedFields {
    let document = Html::parse_document(page);
    let root = document.root_element();

    let mut scraped = ScrapedFields::default();
    for &field in fields {
        let value = match field {
            FieldName::Director => extract_director(root),
            FieldName::Runtime => extract_runtime(root),
            FieldName::Budget => extract_box_office(root, "title-boxoffice-budget"),
            FieldName::CumulativeWorldwideGross => {
                extract_box_office(root, "title-boxoffice-cumulativeworldwidegross")
            }
        };
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            scraped.set(field, value);
        }
    }
    scraped
}

/// First link in the credits item labelled exactly "Director".
fn extract_director(root: ElementRef<'_>) -> Option<String> {
    let label = Selector::parse(DIRECTOR_LABEL).ok()?;
    let link = Selector::parse("a").ok()?;

    root.select(&label)
        .filter(|span| text_of(*span) == "Director")
        .find_map(|span| {
            let item = span
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "li")?;
            item.select(&link).next().map(text_of)
        })
}

/// First inline list item whose only text contains both "h" and "m", e.g. "1h 21m".
fn extract_runtime(root: ElementRef<'_>) -> Option<String> {
    let item = Selector::parse(INLINE_ITEM).ok()?;

    root.select(&item)
        .filter_map(single_string)
        .map(|text| text.trim().to_string())
        .find(|text| text.contains('h') && text.contains('m'))
}

/// Value of the box-office item carrying `data-testid="{test_id}"`.
fn extract_box_office(root: ElementRef<'_>, test_id: &str) -> Option<String> {
    let css = format!(r#"li[data-testid="{}"] {}"#, test_id, CONTENT_ITEM);
    let value = Selector::parse(&css).ok()?;
    root.select(&value).next().map(text_of)
}

/// Text of an element with runs of whitespace collapsed
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The text of an element that has exactly one child, following single-child
/// elements down; `None` when any level has zero or several children.
fn single_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value().as_text() {
        Some(text) => Some(String::from(&**text)),
        None => ElementRef::wrap(only).and_then(single_string),
    }
}
