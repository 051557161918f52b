//! Pass-through client for the Pokémon TCG card catalog API.
//!
//! Every call is a single GET. A 200 response body is returned exactly as the
//! catalog sent it; any other status becomes [`TcgError::Upstream`] carrying
//! the same status and the raw body. Nothing is retried or cached.

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config;
use crate::error::{Result, TcgError};

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

fn default_page() -> i64 {
    config::DEFAULT_PAGE
}

fn default_cards_page_size() -> i64 {
    config::DEFAULT_CARDS_PAGE_SIZE
}

fn default_sets_page_size() -> i64 {
    config::DEFAULT_SETS_PAGE_SIZE
}

/// Parameters for `GET /cards`. `q` uses the catalog's own query syntax,
/// e.g. `name:Charizard set.id:sv3`.
#[derive(Debug, Clone, Deserialize)]
pub struct CardSearchParams {
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(rename = "pageSize", default = "default_cards_page_size")]
    pub page_size: i64,
}

impl Default for CardSearchParams {
    fn default() -> Self {
        Self {
            q: None,
            page: config::DEFAULT_PAGE,
            page_size: config::DEFAULT_CARDS_PAGE_SIZE,
        }
    }
}

impl CardSearchParams {
    /// Query pairs sent upstream; an empty `q` is left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        pairs
    }
}

/// Parameters for `GET /sets`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(rename = "pageSize", default = "default_sets_page_size")]
    pub page_size: i64,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
}

impl Default for SetListParams {
    fn default() -> Self {
        Self {
            page: config::DEFAULT_PAGE,
            page_size: config::DEFAULT_SETS_PAGE_SIZE,
            order_by: None,
        }
    }
}

impl SetListParams {
    /// Query pairs sent upstream; an empty `orderBy` is left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(order) = self.order_by.as_deref().filter(|o| !o.is_empty()) {
            pairs.push(("orderBy", order.to_string()));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// CatalogClient
// ---------------------------------------------------------------------------

/// Async HTTP client for the card catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Client for the public catalog with the standard 20-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_base_url(config::PTCG_API_BASE, config::UPSTREAM_TIMEOUT)
    }

    /// Client for a catalog served at `base_url`.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TcgError::InvalidArgument(format!("invalid catalog URL '{}': {}", base_url, e)))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `GET /cards` with the given search parameters.
    pub async fn search_cards(&self, params: &CardSearchParams) -> Result<Value> {
        self.get(&["cards"], &params.to_query()).await
    }

    /// `GET /cards/{card_id}`.
    pub async fn get_card(&self, card_id: &str) -> Result<Value> {
        self.get(&["cards", card_id], &[]).await
    }

    /// `GET /sets` with the given paging and ordering.
    pub async fn list_sets(&self, params: &SetListParams) -> Result<Value> {
        self.get(&["sets"], &params.to_query()).await
    }

    /// Issue one GET for `segments` below the base URL and relay the result.
    ///
    /// Each segment is percent-encoded as a single path segment.
    pub async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint(segments)?;
        log::debug!("Catalog request: GET {} {:?}", url, query);

        let resp = self.http.get(url.clone()).query(query).send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await?;
            log::warn!("Catalog returned {} for {}", status, url);
            return Err(TcgError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TcgError::InvalidArgument(format!("catalog URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
