//! HTTP client for the `YouTube` Data API v3 `playlistItems` endpoint.
//!
//! Wraps `reqwest` with API key management and typed response
//! deserialization. The key is sent as a query parameter and is stripped from
//! every URL that ends up in an error or a log line.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::HighlightsError;
use crate::types::PlaylistItemsResponse;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the `YouTube` Data API.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, HighlightsError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// A missing key is accepted here and reported on first use, so the
    /// server can start without highlights configured.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`HighlightsError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, HighlightsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends the endpoint instead
        // of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| HighlightsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url,
        })
    }

    /// Fetches one page of a playlist.
    ///
    /// # Errors
    ///
    /// - [`HighlightsError::ConfigurationMissing`] if no API key is set.
    /// - [`HighlightsError::UnexpectedStatus`] on a non-2xx answer.
    /// - [`HighlightsError::Http`] on network failure.
    /// - [`HighlightsError::Deserialize`] if the body is not the expected shape.
    pub async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse, HighlightsError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(HighlightsError::ConfigurationMissing("YOUTUBE_API_KEY"))?;

        let max_results = max_results.to_string();
        let mut params = vec![
            ("part", "snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.build_url("playlistItems", &params)?;
        let display_url = url.to_string();
        let mut request_url = url;
        request_url.query_pairs_mut().append_pair("key", api_key);

        let response = self.client.get(request_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                url = %display_url,
                "playlistItems returned non-success status"
            );
            return Err(HighlightsError::UnexpectedStatus {
                status: status.as_u16(),
                url: display_url,
            });
        }

        let body = response.text().await?;
        let parsed: PlaylistItemsResponse =
            serde_json::from_str(&body).map_err(|e| HighlightsError::Deserialize {
                context: format!("playlistItems(playlistId={playlist_id})"),
                source: e,
            })?;

        tracing::debug!(
            playlist_id,
            items = parsed.items.len(),
            has_next = parsed.next_page_token.is_some(),
            "fetched playlist page"
        );
        Ok(parsed)
    }

    /// Builds an endpoint URL with percent-encoded query parameters. The API
    /// key is not included.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, HighlightsError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| HighlightsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
