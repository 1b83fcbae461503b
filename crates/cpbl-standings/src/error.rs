use thiserror::Error;

#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("standings block not found")]
    BlockNotFound,

    #[error("standings block has no table")]
    TableNotFound,

    #[error("invalid CSS selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl StandingsError {
    /// `true` when the page was fetched but did not have the expected shape.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Self::BlockNotFound | Self::TableNotFound | Self::Selector { .. }
        )
    }

    /// Status code reported by the standings site, if the failure came from one.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
