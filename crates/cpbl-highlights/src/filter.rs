//! Title filters shared by the server-side fetcher and the client session.
//!
//! Matching is a plain case-insensitive substring search. There is no
//! tokenization and no normalization beyond case folding.

use chrono::{DateTime, TimeDelta, Utc};

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `true` when `title` contains every token. An empty token list matches.
#[must_use]
pub fn matches_all<S: AsRef<str>>(title: &str, tokens: &[S]) -> bool {
    tokens.iter().all(|t| contains_folded(title, t.as_ref()))
}

/// `true` when `title` contains at least one keyword. An empty keyword list
/// matches everything.
#[must_use]
pub fn matches_any<S: AsRef<str>>(title: &str, keywords: &[S]) -> bool {
    keywords.is_empty() || keywords.iter().any(|k| contains_folded(title, k.as_ref()))
}

/// Oldest accepted publish time for a window of `days`; `None` when the
/// window is unbounded (`0`) or reaches past the representable date range.
#[must_use]
pub fn cutoff(now: DateTime<Utc>, days: u32) -> Option<DateTime<Utc>> {
    if days == 0 {
        return None;
    }
    TimeDelta::try_days(i64::from(days)).and_then(|window| now.checked_sub_signed(window))
}
