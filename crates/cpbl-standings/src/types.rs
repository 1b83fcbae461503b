//! Standings records as displayed by the league site.
//!
//! Every field is the display string the site already formats (`"0.600"`,
//! `"60-0-40"`, `"-"`); nothing is parsed into numbers.

use serde::{Deserialize, Serialize};

/// One team's line in the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub rank: String,
    pub team: String,
    /// Absolute URL of the team page, when the team cell links to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_url: Option<String>,
    pub games: String,
    pub win_loss_draw: String,
    pub win_rate: String,
    pub games_behind: String,
    pub elimination_number: String,
    pub streak: String,
    pub last_ten_record: String,
}

/// Result of one scrape: rows in table order plus the normalized fragment.
#[derive(Debug, Clone)]
pub struct Standings {
    pub rows: Vec<StandingsRow>,
    pub rendered_fragment: String,
}
