//! Mapping of upstream playlist items into [`Video`]s.
//!
//! Each fact can come from more than one upstream field. Rather than nesting
//! fallbacks, every fact has an ordered strategy list; the first strategy that
//! yields a usable value wins. The order of each list is its precedence:
//!
//! - **id**: `contentDetails.videoId` is the id of the referenced video;
//!   `snippet.resourceId.videoId` is the snippet's copy of the same value.
//! - **published time**: `snippet.publishedAt` is when the video was added to
//!   the curated playlist, which is what the playlist is ordered by and
//!   matches the game date better than `contentDetails.videoPublishedAt`
//!   (re-uploads and late edits keep an older original publish time).
//! - **channel**: `snippet.videoOwnerChannelTitle` names the uploader;
//!   `snippet.channelTitle` names the playlist owner.
//! - **thumbnail**: largest first, then the id-derived `hqdefault` image.

use chrono::{DateTime, Utc};

use crate::types::{PlaylistItem, Thumbnail, Thumbnails, Video};

type TextStrategy = fn(&PlaylistItem) -> Option<&str>;

const VIDEO_ID_STRATEGIES: &[(&str, TextStrategy)] = &[
    ("contentDetails.videoId", id_from_content_details),
    ("snippet.resourceId.videoId", id_from_resource_id),
];

const PUBLISHED_AT_STRATEGIES: &[(&str, TextStrategy)] = &[
    ("snippet.publishedAt", added_to_playlist_at),
    ("contentDetails.videoPublishedAt", video_published_at),
];

const CHANNEL_STRATEGIES: &[(&str, TextStrategy)] = &[
    ("snippet.videoOwnerChannelTitle", video_owner_channel),
    ("snippet.channelTitle", playlist_channel),
];

const THUMBNAIL_STRATEGIES: &[(&str, TextStrategy)] = &[
    ("maxres", maxres_thumbnail),
    ("standard", standard_thumbnail),
    ("high", high_thumbnail),
    ("medium", medium_thumbnail),
    ("default", default_thumbnail),
];

/// Titles the platform substitutes for entries the viewer cannot see.
const UNAVAILABLE_TITLES: &[&str] = &["Private video", "Deleted video"];

/// Why an upstream item did not become a [`Video`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingId,
    MissingPublishedAt,
    Unavailable,
}

/// Converts one upstream item, applying the strategy lists in order.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the item has no id, no parseable
/// timestamp, or is a private/deleted placeholder.
pub fn video_from_item(item: &PlaylistItem) -> Result<Video, SkipReason> {
    let id = first_text(item, VIDEO_ID_STRATEGIES).ok_or(SkipReason::MissingId)?;

    let title = item
        .snippet
        .as_ref()
        .map(|s| s.title.trim())
        .unwrap_or_default();
    if UNAVAILABLE_TITLES.contains(&title) {
        return Err(SkipReason::Unavailable);
    }

    let published_at = PUBLISHED_AT_STRATEGIES
        .iter()
        .find_map(|(_, strategy)| strategy(item).and_then(parse_timestamp))
        .ok_or(SkipReason::MissingPublishedAt)?;

    let channel_title = first_text(item, CHANNEL_STRATEGIES).unwrap_or_default();
    let thumbnail_url = first_text(item, THUMBNAIL_STRATEGIES).map_or_else(
        || format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg"),
        str::to_owned,
    );

    Ok(Video {
        id: id.to_owned(),
        title: title.to_owned(),
        channel_title: channel_title.to_owned(),
        published_at,
        thumbnail_url,
    })
}

fn first_text<'a>(
    item: &'a PlaylistItem,
    strategies: &[(&'static str, TextStrategy)],
) -> Option<&'a str> {
    strategies.iter().find_map(|(field, strategy)| {
        let value = strategy(item).map(str::trim).filter(|v| !v.is_empty())?;
        tracing::trace!(field, "strategy matched");
        Some(value)
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn id_from_content_details(item: &PlaylistItem) -> Option<&str> {
    item.content_details.as_ref()?.video_id.as_deref()
}

fn id_from_resource_id(item: &PlaylistItem) -> Option<&str> {
    item.snippet.as_ref()?.resource_id.as_ref()?.video_id.as_deref()
}

fn added_to_playlist_at(item: &PlaylistItem) -> Option<&str> {
    item.snippet.as_ref()?.published_at.as_deref()
}

fn video_published_at(item: &PlaylistItem) -> Option<&str> {
    item.content_details.as_ref()?.video_published_at.as_deref()
}

fn video_owner_channel(item: &PlaylistItem) -> Option<&str> {
    item.snippet.as_ref()?.video_owner_channel_title.as_deref()
}

fn playlist_channel(item: &PlaylistItem) -> Option<&str> {
    item.snippet.as_ref()?.channel_title.as_deref()
}

fn thumbnails(item: &PlaylistItem) -> Option<&Thumbnails> {
    item.snippet.as_ref().map(|s| &s.thumbnails)
}

fn url_of(thumbnail: Option<&Thumbnail>) -> Option<&str> {
    thumbnail.map(|t| t.url.as_str())
}

fn maxres_thumbnail(item: &PlaylistItem) -> Option<&str> {
    url_of(thumbnails(item)?.maxres.as_ref())
}

fn standard_thumbnail(item: &PlaylistItem) -> Option<&str> {
    url_of(thumbnails(item)?.standard.as_ref())
}

fn high_thumbnail(item: &PlaylistItem) -> Option<&str> {
    url_of(thumbnails(item)?.high.as_ref())
}

fn medium_thumbnail(item: &PlaylistItem) -> Option<&str> {
    url_of(thumbnails(item)?.medium.as_ref())
}

fn default_thumbnail(item: &PlaylistItem) -> Option<&str> {
    url_of(thumbnails(item)?.default.as_ref())
}
