//! Normalization of the highlights endpoint's query parameters.
//!
//! Parameters arrive as raw key/value pairs so that `mustAll` can repeat.
//! Keys are matched case-insensitively. Nothing here fails: unusable values
//! fall back to the configured defaults.

/// Largest page the upstream `playlistItems` call accepts.
pub const MAX_LIMIT: u32 = 50;
pub const DEFAULT_LIMIT: u32 = 24;
pub const DEFAULT_DAYS: u32 = 30;
/// Keyword applied when the caller supplies none ("full game highlights").
pub const DEFAULT_KEYWORD: &str = "全場精華";

/// Server-side defaults injected from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    pub limit: u32,
    pub days: u32,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            days: DEFAULT_DAYS,
        }
    }
}

/// A normalized highlights request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightsQuery {
    /// Page size, always within `1..=MAX_LIMIT`.
    pub limit: u32,
    /// OR set; a title must contain at least one.
    pub keywords: Vec<String>,
    /// AND set; a title must contain all of them.
    pub must_all: Vec<String>,
    /// Recency window in days; `0` is unbounded.
    pub days: u32,
    pub page_token: Option<String>,
    pub playlist_id: Option<String>,
}

impl HighlightsQuery {
    /// Builds a query from raw pairs, applying `defaults` where a parameter is
    /// absent or unusable.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)], defaults: QueryDefaults) -> Self {
        let mut limit = None;
        let mut keywords = Vec::new();
        let mut must_all = Vec::new();
        let mut days = None;
        let mut page_token = None;
        let mut playlist_id = None;

        for (key, value) in pairs {
            let value = value.trim();
            match key.to_ascii_lowercase().as_str() {
                "limit" => limit = value.parse::<i64>().ok(),
                "q" => push_nonblank(&mut keywords, value),
                "keywords" => {
                    for keyword in value.split(',') {
                        push_nonblank(&mut keywords, keyword);
                    }
                }
                "mustall" => push_nonblank(&mut must_all, value),
                "days" => days = value.parse::<u32>().ok(),
                "pagetoken" | "cursor" => page_token = non_empty(value),
                "playlistid" => playlist_id = non_empty(value),
                other => tracing::debug!(param = other, "ignoring unknown highlights parameter"),
            }
        }

        if keywords.is_empty() {
            keywords.push(DEFAULT_KEYWORD.to_owned());
        }

        Self {
            limit: clamp_limit(limit.unwrap_or(i64::from(defaults.limit))),
            keywords,
            must_all,
            days: days.unwrap_or(defaults.days),
            page_token,
            playlist_id,
        }
    }
}

/// Clamps a requested page size into `1..=MAX_LIMIT`.
#[must_use]
pub fn clamp_limit(requested: i64) -> u32 {
    u32::try_from(requested.clamp(1, i64::from(MAX_LIMIT))).unwrap_or(MAX_LIMIT)
}

fn push_nonblank(into: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !into.iter().any(|v| v == value) {
        into.push(value.to_owned());
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}
