//! Client-side pagination over a [`HighlightsSource`].
//!
//! A session accumulates deduplicated pages for one filter configuration.
//! When a page comes back without a continuation cursor the recency window is
//! exhausted; the session then widens the window by
//! [`WINDOW_EXPANSION_DAYS`] and starts over from the first page, until the
//! widened window would pass the configured maximum. An unbounded window
//! (`0` days) never widens.
//!
//! ```text
//! Idle ──load──▶ Loading ──cursor──▶ Ready ──load──▶ Loading
//!                   │  └─no cursor──▶ WindowExhausted ──widen──▶ Loading
//!                   │  └─no cursor, unbounded or at max──▶ Done
//!                   └─failure──▶ Errored ──load──▶ Loading
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::HighlightsError;
use crate::filter::matches_all;
use crate::query::{clamp_limit, DEFAULT_DAYS, DEFAULT_KEYWORD, DEFAULT_LIMIT};
use crate::source::{HighlightsSource, PageRequest};
use crate::types::Video;

/// Days added to the window each time it is exhausted.
pub const WINDOW_EXPANSION_DAYS: u32 = 60;

/// The filter a session paginates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFilter {
    pub keywords: Vec<String>,
    pub title_must_all: Vec<String>,
    /// Starting window in days; `0` is unbounded.
    pub window_days: u32,
    pub page_size: u32,
}

impl Default for SessionFilter {
    fn default() -> Self {
        Self {
            keywords: vec![DEFAULT_KEYWORD.to_owned()],
            title_must_all: Vec::new(),
            window_days: DEFAULT_DAYS,
            page_size: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Ready,
    WindowExhausted,
    Done,
    Errored,
}

/// Accumulated results of the active filter.
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    pub accumulated_pages: Vec<Vec<Video>>,
    /// Every id seen since the filter was applied, across window restarts.
    pub seen_ids: HashSet<String>,
    pub cursor: Option<String>,
    pub window_days: u32,
    /// The last page ended without a continuation cursor.
    pub exhausted: bool,
}

impl PaginationState {
    fn new(window_days: u32) -> Self {
        Self {
            window_days,
            ..Self::default()
        }
    }

    /// Keeps only ids not seen before, recording them as seen.
    fn dedup(&mut self, videos: Vec<Video>) -> Vec<Video> {
        videos
            .into_iter()
            .filter(|v| self.seen_ids.insert(v.id.clone()))
            .collect()
    }
}

/// Result of a single [`HighlightsSession::fetch_once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// One upstream call was made; this many new videos were appended.
    Fetched { appended: usize },
    /// The session is done; nothing was requested.
    Finished,
}

/// What one [`HighlightsSession::load_next`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub fetches: usize,
    pub appended: usize,
    pub phase: SessionPhase,
}

/// Pagination controller for one filter at a time.
pub struct HighlightsSession<S> {
    source: S,
    max_window_days: u32,
    filter: Option<SessionFilter>,
    state: PaginationState,
    phase: SessionPhase,
}

impl<S: HighlightsSource> HighlightsSession<S> {
    /// `max_window_days` bounds automatic widening.
    pub fn new(source: S, max_window_days: u32) -> Self {
        Self {
            source,
            max_window_days,
            filter: None,
            state: PaginationState::default(),
            phase: SessionPhase::Idle,
        }
    }

    /// Applies a filter. A filter different from the active one (or the first
    /// one) discards all results and returns to [`SessionPhase::Idle`] with
    /// the starting window; reapplying the active filter changes nothing.
    ///
    /// Returns `true` when the session was reset.
    pub fn configure(
        &mut self,
        keywords: Vec<String>,
        title_must_all: Vec<String>,
        window_days: u32,
        page_size: u32,
    ) -> bool {
        self.apply(SessionFilter {
            keywords,
            title_must_all,
            window_days,
            page_size,
        })
    }

    /// [`Self::configure`] taking a prepared [`SessionFilter`].
    pub fn apply(&mut self, filter: SessionFilter) -> bool {
        if self.filter.as_ref() == Some(&filter) {
            return false;
        }
        tracing::debug!(?filter, "highlights filter changed, resetting session");
        self.state = PaginationState::new(filter.window_days);
        self.filter = Some(filter);
        self.phase = SessionPhase::Idle;
        true
    }

    /// One load triggered by the user or by scrolling near the end.
    ///
    /// Fetches once, then keeps fetching while the session is
    /// [`SessionPhase::WindowExhausted`]. A [`SessionPhase::Done`] session
    /// returns without fetching.
    ///
    /// # Errors
    ///
    /// The first fetch failure halts the chain and leaves the session
    /// [`SessionPhase::Errored`]; calling again re-attempts.
    pub async fn load_next(&mut self) -> Result<LoadSummary, HighlightsError> {
        let mut fetches = 0;
        let mut appended = 0;

        loop {
            match self.fetch_once().await? {
                FetchOutcome::Finished => break,
                FetchOutcome::Fetched { appended: n } => {
                    fetches += 1;
                    appended += n;
                }
            }
            if self.phase != SessionPhase::WindowExhausted {
                break;
            }
        }

        Ok(LoadSummary {
            fetches,
            appended,
            phase: self.phase,
        })
    }

    /// Exactly one upstream call, widening the window first when the previous
    /// one exhausted it.
    ///
    /// # Errors
    ///
    /// Propagates the source's failure and moves to [`SessionPhase::Errored`].
    pub async fn fetch_once(&mut self) -> Result<FetchOutcome, HighlightsError> {
        if self.filter.is_none() {
            self.apply(SessionFilter::default());
        }
        if self.phase == SessionPhase::Done {
            return Ok(FetchOutcome::Finished);
        }
        if self.phase == SessionPhase::WindowExhausted {
            self.widen_window();
        }

        let request = self.next_request();
        self.phase = SessionPhase::Loading;

        let page = match self.source.fetch_page(&request).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, days = request.days, "highlights fetch failed");
                self.phase = SessionPhase::Errored;
                return Err(e);
            }
        };

        let batch = self.state.dedup(page.items);
        let appended = batch.len();
        if !batch.is_empty() {
            self.state.accumulated_pages.push(batch);
        }

        self.state.cursor = page.next_page_token.filter(|t| !t.is_empty());
        self.state.exhausted = self.state.cursor.is_none();
        self.phase = if !self.state.exhausted {
            SessionPhase::Ready
        } else if self.can_widen() {
            SessionPhase::WindowExhausted
        } else {
            SessionPhase::Done
        };

        tracing::debug!(
            days = request.days,
            appended,
            phase = ?self.phase,
            "highlights page loaded"
        );
        Ok(FetchOutcome::Fetched { appended })
    }

    /// All accumulated videos that contain every must-all token.
    #[must_use]
    pub fn visible_videos(&self) -> Vec<&Video> {
        let tokens = self
            .filter
            .as_ref()
            .map_or(&[][..], |f| f.title_must_all.as_slice());
        self.state
            .accumulated_pages
            .iter()
            .flatten()
            .filter(|v| matches_all(&v.title, tokens))
            .collect()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    #[must_use]
    pub fn filter(&self) -> Option<&SessionFilter> {
        self.filter.as_ref()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    fn can_widen(&self) -> bool {
        let days = self.state.window_days;
        days > 0
            && days
                .checked_add(WINDOW_EXPANSION_DAYS)
                .is_some_and(|widened| widened <= self.max_window_days)
    }

    fn widen_window(&mut self) {
        let from = self.state.window_days;
        self.state.window_days = from.saturating_add(WINDOW_EXPANSION_DAYS);
        self.state.cursor = None;
        self.state.exhausted = false;
        tracing::info!(from, to = self.state.window_days, "widening highlights window");
    }

    fn next_request(&self) -> PageRequest {
        let filter = self.filter.clone().unwrap_or_default();
        PageRequest {
            keywords: filter.keywords,
            must_all: filter.title_must_all,
            days: self.state.window_days,
            limit: clamp_limit(i64::from(filter.page_size)),
            cursor: self.state.cursor.clone(),
        }
    }
}

/// Result of [`SharedSession::request_more`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadSummary),
    /// Another load was in flight; this trigger was ignored.
    Suppressed,
}

/// A session shared between triggers (scroll, button) that allows at most
/// one load in flight.
pub struct SharedSession<S> {
    inner: Arc<Mutex<HighlightsSession<S>>>,
}

impl<S> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: HighlightsSource> SharedSession<S> {
    pub fn new(session: HighlightsSession<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Starts a load unless one is already running.
    ///
    /// # Errors
    ///
    /// Propagates [`HighlightsSession::load_next`] failures.
    pub async fn request_more(&self) -> Result<LoadOutcome, HighlightsError> {
        let Ok(mut session) = self.inner.try_lock() else {
            tracing::debug!("load already in flight, suppressing trigger");
            return Ok(LoadOutcome::Suppressed);
        };
        session.load_next().await.map(LoadOutcome::Loaded)
    }

    /// Waits for any in-flight load, then applies `filter`.
    pub async fn apply(&self, filter: SessionFilter) -> bool {
        self.inner.lock().await.apply(filter)
    }

    pub async fn phase(&self) -> SessionPhase {
        self.inner.lock().await.phase()
    }

    /// Owned copy of [`HighlightsSession::visible_videos`].
    pub async fn visible_videos(&self) -> Vec<Video> {
        self.inner
            .lock()
            .await
            .visible_videos()
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
