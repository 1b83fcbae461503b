//! Where a pagination session gets its pages from.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::HighlightsError;
use crate::types::HighlightsPage;

/// Parameters of one page request issued by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub keywords: Vec<String>,
    pub must_all: Vec<String>,
    /// `0` is unbounded.
    pub days: u32,
    pub limit: u32,
    pub cursor: Option<String>,
}

/// A paginated highlights provider.
pub trait HighlightsSource {
    /// Fetches the page described by `request`.
    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<HighlightsPage, HighlightsError>> + Send;
}

/// Calls the server's highlights endpoint over HTTP.
pub struct HttpHighlightsSource {
    client: Client,
    endpoint: Url,
}

impl HttpHighlightsSource {
    /// # Errors
    ///
    /// Returns [`HighlightsError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`HighlightsError::InvalidBaseUrl`] if `endpoint` does
    /// not parse.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, HighlightsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| HighlightsError::InvalidBaseUrl {
            url: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, endpoint })
    }

    fn build_url(&self, request: &PageRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for keyword in &request.keywords {
                pairs.append_pair("q", keyword);
            }
            for token in &request.must_all {
                pairs.append_pair("mustAll", token);
            }
            pairs.append_pair("days", &request.days.to_string());
            pairs.append_pair("limit", &request.limit.to_string());
            if let Some(cursor) = &request.cursor {
                pairs.append_pair("cursor", cursor);
            }
        }
        url
    }
}

impl HighlightsSource for HttpHighlightsSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<HighlightsPage, HighlightsError> {
        let url = self.build_url(request);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "highlights endpoint returned non-success status");
            return Err(HighlightsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HighlightsError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
