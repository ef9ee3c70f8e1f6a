//! HTTP client for the VK `newsfeed.search` method.
//!
//! Wraps `reqwest` with VK-specific envelope handling: every call returns
//! HTTP 200 with either a `response` or an `error` object, and the client
//! branches on which one is present.

mod fetch_all;

use std::time::Duration;

use percent_encoding::percent_decode_str;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::NewsfeedError;
use crate::types::{ApiErrorDetail, RawPost};
use crate::window::FetchWindow;

pub use fetch_all::FetchOutcome;

const DEFAULT_BASE_URL: &str = "https://api.vk.com/method/";
const DEFAULT_API_VERSION: &str = "5.131";
const SEARCH_METHOD: &str = "newsfeed.search";

/// Items requested per call; the maximum `newsfeed.search` accepts.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Items of one window, after per-item deserialization.
#[derive(Debug, Clone, Default)]
pub struct WindowPage {
    pub items: Vec<RawPost>,
    /// Items that did not match the [`RawPost`] shape and were dropped.
    pub skipped: usize,
}

/// Client for `newsfeed.search`.
///
/// Holds the caller-supplied access token and appends it to every request.
/// Use [`NewsfeedClient::new`] for the production API or
/// [`NewsfeedClient::with_base_url`] to point at a mock server in tests.
pub struct NewsfeedClient {
    client: Client,
    access_token: String,
    search_url: Url,
    api_version: String,
    page_size: u32,
}

impl NewsfeedClient {
    /// Creates a client pointed at `https://api.vk.com/method/`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsfeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, NewsfeedError> {
        Self::with_base_url(access_token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom method base URL.
    ///
    /// # Errors
    ///
    /// Returns [`NewsfeedError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`NewsfeedError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, NewsfeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining the method name appends a
        // path segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_METHOD))
            .map_err(|e| NewsfeedError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            search_url,
            api_version: DEFAULT_API_VERSION.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Overrides the `v` parameter sent with every call.
    #[must_use]
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_owned();
        self
    }

    /// Overrides the `count` parameter sent with every call.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetches the posts matching `query` published inside `window`.
    ///
    /// # Errors
    ///
    /// - [`NewsfeedError::Transport`] on network failure or non-2xx status.
    /// - [`NewsfeedError::Deserialize`] if the body is not JSON.
    /// - [`NewsfeedError::Api`] if VK returned an `error` object.
    /// - [`NewsfeedError::UnexpectedResponse`] if neither `response.items`
    ///   nor `error` is present.
    pub async fn search_window(
        &self,
        query: &str,
        window: FetchWindow,
    ) -> Result<WindowPage, NewsfeedError> {
        let url = self.build_url(query, window);
        let body = self.request_json(url, window).await?;
        Self::parse_envelope(query, window, body)
    }

    /// Builds the request URL with percent-encoded query parameters.
    ///
    /// `query` is decoded once first, so `%23tag%20word` and `#tag word`
    /// produce the same request.
    fn build_url(&self, query: &str, window: FetchWindow) -> Url {
        let decoded = percent_decode_str(query).decode_utf8_lossy();
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", &decoded)
            .append_pair("count", &self.page_size.to_string())
            .append_pair("access_token", &self.access_token)
            .append_pair("start_time", &window.start_timestamp().to_string())
            .append_pair("end_time", &window.end_timestamp().to_string())
            .append_pair("v", &self.api_version);
        url
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    ///
    /// Errors name the window and have the URL stripped, since the URL
    /// carries the access token.
    async fn request_json(&self, url: Url, window: FetchWindow) -> Result<Value, NewsfeedError> {
        let transport = |source: reqwest::Error| NewsfeedError::Transport {
            window,
            source: source.without_url(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let response = response.error_for_status().map_err(transport)?;
        let body = response.text().await.map_err(transport)?;

        serde_json::from_str(&body).map_err(|e| NewsfeedError::Deserialize {
            context: format!("{SEARCH_METHOD} window {window}"),
            source: e,
        })
    }

    /// Splits the VK envelope into items or an error.
    ///
    /// Items are deserialized one by one; malformed items are logged and
    /// skipped so one odd post does not discard the window.
    fn parse_envelope(
        query: &str,
        window: FetchWindow,
        mut body: Value,
    ) -> Result<WindowPage, NewsfeedError> {
        if let Some(response) = body.get_mut("response") {
            let Some(Value::Array(items)) = response.get_mut("items").map(Value::take) else {
                return Err(NewsfeedError::UnexpectedResponse {
                    query: query.to_owned(),
                    window,
                    reason: "`response` has no `items` array".to_owned(),
                });
            };

            let mut page = WindowPage::default();
            for (idx, item) in items.into_iter().enumerate() {
                match serde_json::from_value::<RawPost>(item) {
                    Ok(post) => page.items.push(post),
                    Err(e) => {
                        tracing::warn!(%window, index = idx, error = %e, "skipping malformed newsfeed item");
                        page.skipped += 1;
                    }
                }
            }
            return Ok(page);
        }

        if let Some(error) = body.get_mut("error") {
            return Err(NewsfeedError::Api {
                query: query.to_owned(),
                window,
                detail: ApiErrorDetail::from_value(error.take()),
            });
        }

        Err(NewsfeedError::UnexpectedResponse {
            query: query.to_owned(),
            window,
            reason: "neither `response` nor `error` present".to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
