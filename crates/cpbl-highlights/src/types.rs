//! Highlight video types and the `YouTube` Data API `playlistItems` shapes.
//!
//! Upstream fields are all optional: `part=snippet,contentDetails` is
//! requested, but private and deleted entries come back with most of the
//! snippet blank and no `contentDetails.videoPublishedAt`. Which field wins
//! when several carry the same fact is decided in [`crate::extract`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A highlight video as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Upstream video id; unique per video but may repeat across pages.
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: String,
}

/// One page of the highlights endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightsPage {
    pub items: Vec<Video>,
    pub count: usize,
    /// `None` once the upstream collection or the recency window is exhausted.
    pub next_page_token: Option<String>,
    /// Diagnostics only; not a stable contract.
    #[serde(default)]
    pub debug: serde_json::Value,
}

// ---------------------------------------------------------------------------
// playlistItems
// ---------------------------------------------------------------------------

/// Response of `GET playlistItems`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    #[serde(default)]
    pub snippet: Option<PlaylistItemSnippet>,
    #[serde(default)]
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    /// When the item was added to the playlist.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub title: String,
    /// Owner of the playlist.
    #[serde(default)]
    pub channel_title: Option<String>,
    /// Owner of the referenced video.
    #[serde(default)]
    pub video_owner_channel_title: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    #[serde(default)]
    pub video_id: Option<String>,
    /// When the video itself was published on the platform.
    #[serde(default)]
    pub video_published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub maxres: Option<Thumbnail>,
    #[serde(default)]
    pub standard: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}
