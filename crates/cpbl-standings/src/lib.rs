pub mod client;
pub mod columns;
pub mod error;
pub mod parse;
pub mod render;
pub mod types;

pub use client::StandingsClient;
pub use columns::ColumnIndex;
pub use error::StandingsError;
pub use parse::scrape_standings;
pub use render::render_fragment;
pub use types::{Standings, StandingsRow};
