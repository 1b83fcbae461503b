//! Server-side highlights fetching: one upstream page in, one filtered
//! [`HighlightsPage`] out.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::client::YoutubeClient;
use crate::error::HighlightsError;
use crate::extract::{video_from_item, SkipReason};
use crate::filter::{cutoff, matches_all, matches_any};
use crate::query::HighlightsQuery;
use crate::types::{HighlightsPage, PlaylistItemsResponse};

/// Fetches playlist pages and applies the recency and title filters.
pub struct HighlightsService {
    client: YoutubeClient,
    default_playlist_id: Option<String>,
}

impl HighlightsService {
    #[must_use]
    pub fn new(client: YoutubeClient, default_playlist_id: Option<String>) -> Self {
        Self {
            client,
            default_playlist_id: default_playlist_id.filter(|id| !id.trim().is_empty()),
        }
    }

    /// Fetches and filters one page for `query`, measuring recency from `now`.
    ///
    /// # Errors
    ///
    /// - [`HighlightsError::ConfigurationMissing`] if neither the query nor
    ///   the configuration names a playlist, or no API key is configured.
    /// - Any upstream failure from [`YoutubeClient::playlist_items`].
    pub async fn fetch_page(
        &self,
        query: &HighlightsQuery,
        now: DateTime<Utc>,
    ) -> Result<HighlightsPage, HighlightsError> {
        let playlist_id = query
            .playlist_id
            .as_deref()
            .or(self.default_playlist_id.as_deref())
            .ok_or(HighlightsError::ConfigurationMissing("YOUTUBE_PLAYLIST_ID"))?;

        let upstream = self
            .client
            .playlist_items(playlist_id, query.limit, query.page_token.as_deref())
            .await?;

        Ok(filter_page(upstream, query, playlist_id, now))
    }
}

/// Applies extraction, the recency cutoff, and both title filters to an
/// upstream page.
///
/// The continuation token is dropped once the page reaches an item older than
/// the cutoff: the playlist is newest-first, so later pages hold nothing
/// inside the window.
#[must_use]
pub fn filter_page(
    upstream: PlaylistItemsResponse,
    query: &HighlightsQuery,
    playlist_id: &str,
    now: DateTime<Utc>,
) -> HighlightsPage {
    let cutoff = cutoff(now, query.days);
    let upstream_count = upstream.items.len();

    let mut items = Vec::with_capacity(upstream_count);
    let mut malformed = 0usize;
    let mut unavailable = 0usize;
    let mut too_old = 0usize;
    let mut keyword_miss = 0usize;
    let mut must_all_miss = 0usize;

    for item in &upstream.items {
        let video = match video_from_item(item) {
            Ok(video) => video,
            Err(SkipReason::Unavailable) => {
                unavailable += 1;
                continue;
            }
            Err(reason) => {
                tracing::warn!(?reason, playlist_id, "dropping malformed playlist item");
                malformed += 1;
                continue;
            }
        };

        if cutoff.is_some_and(|c| video.published_at < c) {
            too_old += 1;
            continue;
        }
        if !matches_any(&video.title, &query.keywords) {
            keyword_miss += 1;
            continue;
        }
        if !matches_all(&video.title, &query.must_all) {
            must_all_miss += 1;
            continue;
        }
        items.push(video);
    }

    let reached_cutoff = too_old > 0;
    let next_page_token = if reached_cutoff {
        None
    } else {
        upstream.next_page_token.filter(|t| !t.is_empty())
    };

    let debug = json!({
        "playlistId": playlist_id,
        "upstreamCount": upstream_count,
        "cutoff": cutoff.map(|c| c.to_rfc3339()),
        "reachedCutoff": reached_cutoff,
        "dropped": {
            "malformed": malformed,
            "unavailable": unavailable,
            "tooOld": too_old,
            "keyword": keyword_miss,
            "mustAll": must_all_miss,
        },
    });

    HighlightsPage {
        count: items.len(),
        items,
        next_page_token,
        debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryDefaults;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 30, 12, 0, 0).unwrap()
    }

    fn upstream(items: serde_json::Value, next: Option<&str>) -> PlaylistItemsResponse {
        serde_json::from_value(json!({ "items": items, "nextPageToken": next }))
            .expect("valid upstream page")
    }

    fn item(id: &str, title: &str, published_at: &str) -> serde_json::Value {
        json!({
            "snippet": { "title": title, "publishedAt": published_at },
            "contentDetails": { "videoId": id }
        })
    }

    fn query(raw: &[(&str, &str)]) -> HighlightsQuery {
        let pairs: Vec<(String, String)> = raw
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        HighlightsQuery::from_pairs(&pairs, QueryDefaults::default())
    }

    #[test]
    fn keeps_matching_recent_items_and_token() {
        let page = filter_page(
            upstream(
                json!([
                    item("a", "【全場精華】兄弟 vs 獅", "2024-09-29T12:00:00Z"),
                    item("b", "賽後訪問", "2024-09-28T12:00:00Z"),
                ]),
                Some("NEXT"),
            ),
            &query(&[]),
            "PL1",
            now(),
        );

        assert_eq!(page.count, 1);
        assert_eq!(page.items[0].id, "a");
        assert_eq!(page.next_page_token.as_deref(), Some("NEXT"));
        assert_eq!(page.debug["dropped"]["keyword"], 1);
        assert_eq!(page.debug["reachedCutoff"], false);
    }

    #[test]
    fn items_older_than_cutoff_end_the_window() {
        let page = filter_page(
            upstream(
                json!([
                    item("a", "全場精華 1", "2024-09-20T12:00:00Z"),
                    item("b", "全場精華 2", "2024-08-01T12:00:00Z"),
                ]),
                Some("NEXT"),
            ),
            &query(&[("days", "30")]),
            "PL1",
            now(),
        );

        assert_eq!(page.count, 1);
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.debug["reachedCutoff"], true);
        assert_eq!(page.debug["dropped"]["tooOld"], 1);
    }

    #[test]
    fn unbounded_window_keeps_old_items() {
        let page = filter_page(
            upstream(json!([item("a", "全場精華", "2019-04-01T12:00:00Z")]), Some("NEXT")),
            &query(&[("days", "0")]),
            "PL1",
            now(),
        );

        assert_eq!(page.count, 1);
        assert_eq!(page.next_page_token.as_deref(), Some("NEXT"));
        assert!(page.debug["cutoff"].is_null());
    }

    #[test]
    fn window_past_date_range_is_treated_as_unbounded() {
        let page = filter_page(
            upstream(json!([item("a", "全場精華", "2019-04-01T12:00:00Z")]), Some("NEXT")),
            &query(&[("days", "4294967295")]),
            "PL1",
            now(),
        );

        assert_eq!(page.count, 1);
        assert_eq!(page.next_page_token.as_deref(), Some("NEXT"));
        assert!(page.debug["cutoff"].is_null());
    }

    #[test]
    fn must_all_tokens_are_all_required() {
        let page = filter_page(
            upstream(
                json!([
                    item("a", "全場精華 中信兄弟 vs 樂天桃猿", "2024-09-29T12:00:00Z"),
                    item("b", "全場精華 統一獅 vs 樂天桃猿", "2024-09-29T12:00:00Z"),
                    item("c", "全場精華 中信兄弟 vs 富邦悍將", "2024-09-29T12:00:00Z"),
                ]),
                None,
            ),
            &query(&[("mustAll", "兄弟"), ("mustAll", "桃猿")]),
            "PL1",
            now(),
        );

        let ids: Vec<&str> = page.items.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
        assert_eq!(page.debug["dropped"]["mustAll"], 2);
    }

    #[test]
    fn malformed_and_private_items_are_dropped() {
        let page = filter_page(
            upstream(
                json!([
                    { "snippet": { "title": "全場精華" } },
                    item("p", "Private video", "2024-09-29T12:00:00Z"),
                    item("a", "全場精華", "2024-09-29T12:00:00Z"),
                ]),
                None,
            ),
            &query(&[]),
            "PL1",
            now(),
        );

        assert_eq!(page.count, 1);
        assert_eq!(page.debug["dropped"]["malformed"], 1);
        assert_eq!(page.debug["dropped"]["unavailable"], 1);
    }

    #[test]
    fn empty_token_is_treated_as_end() {
        let page = filter_page(upstream(json!([]), Some("")), &query(&[]), "PL1", now());
        assert_eq!(page.next_page_token, None);
        assert_eq!(page.count, 0);
    }
}
