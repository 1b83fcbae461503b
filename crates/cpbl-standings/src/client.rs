//! HTTP client for the league's standings page.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::StandingsError;
use crate::parse::scrape_standings;
use crate::types::Standings;

/// Fetches the season standings page and scrapes it.
///
/// Failures are never retried: a non-2xx answer is reported with the status
/// the site returned.
pub struct StandingsClient {
    client: Client,
    source_url: String,
    base_url: Url,
}

impl StandingsClient {
    /// Creates a `StandingsClient` with configured timeout and `User-Agent`.
    ///
    /// `source_url` is the page to fetch; `base_url` is what relative team
    /// links are resolved against.
    ///
    /// # Errors
    ///
    /// - [`StandingsError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    /// - [`StandingsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        source_url: &str,
        base_url: &str,
    ) -> Result<Self, StandingsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base_url = Url::parse(base_url).map_err(|e| StandingsError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            source_url: source_url.to_owned(),
            base_url,
        })
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Downloads the raw standings page.
    ///
    /// # Errors
    ///
    /// - [`StandingsError::UnexpectedStatus`]: any non-2xx status.
    /// - [`StandingsError::Http`]: network or TLS failure.
    pub async fn fetch_html(&self) -> Result<String, StandingsError> {
        let response = self
            .client
            .get(&self.source_url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "zh-TW,zh;q=0.9,en;q=0.8")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                url = %self.source_url,
                "standings page returned non-success status"
            );
            return Err(StandingsError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.source_url.clone(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), url = %self.source_url, "fetched standings page");
        Ok(body)
    }

    /// Fetches and scrapes the standings in one call.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::fetch_html`] and
    /// [`crate::parse::scrape_standings`].
    pub async fn scrape(&self) -> Result<Standings, StandingsError> {
        let html = self.fetch_html().await?;
        scrape_standings(&html, &self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_base_url() {
        let result = StandingsClient::new(5, "cpbl-test/0.1", "https://x.test/", "not a url");
        assert!(
            matches!(result, Err(StandingsError::InvalidBaseUrl { .. })),
            "expected InvalidBaseUrl"
        );
    }

    #[test]
    fn source_url_is_kept_verbatim() {
        let client = StandingsClient::new(
            5,
            "cpbl-test/0.1",
            "https://www.cpbl.com.tw/standings/season",
            "https://www.cpbl.com.tw",
        )
        .expect("client");
        assert_eq!(
            client.source_url(),
            "https://www.cpbl.com.tw/standings/season"
        );
    }
}
