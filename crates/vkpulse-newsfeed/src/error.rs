use thiserror::Error;

use crate::types::ApiErrorDetail;
use crate::window::FetchWindow;

/// Errors returned by the `newsfeed.search` client.
///
/// None of these carry the access token.
#[derive(Debug, Error)]
pub enum NewsfeedError {
    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network failure or non-2xx status while fetching one window.
    #[error("request for window {window} failed: {source}")]
    Transport {
        window: FetchWindow,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// VK answered with an `error` object.
    #[error("VK API error for query \"{query}\" in window {window}: {detail}")]
    Api {
        query: String,
        window: FetchWindow,
        detail: ApiErrorDetail,
    },

    /// Valid JSON without a usable `response.items` or `error`.
    #[error("unexpected response for query \"{query}\" in window {window}: {reason}")]
    UnexpectedResponse {
        query: String,
        window: FetchWindow,
        reason: String,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
