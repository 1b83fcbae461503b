pub mod client;
pub mod error;
pub mod extract;
pub mod filter;
pub mod query;
pub mod service;
pub mod session;
pub mod source;
pub mod types;

pub use client::YoutubeClient;
pub use error::HighlightsError;
pub use query::{HighlightsQuery, QueryDefaults};
pub use service::HighlightsService;
pub use session::{
    FetchOutcome, HighlightsSession, LoadOutcome, LoadSummary, PaginationState, SessionFilter,
    SessionPhase, SharedSession, WINDOW_EXPANSION_DAYS,
};
pub use source::{HighlightsSource, HttpHighlightsSource, PageRequest};
pub use types::{HighlightsPage, Video};
