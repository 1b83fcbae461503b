//! Header-driven column resolution for the standings table.
//!
//! The site reorders and adds columns between seasons, so positions are never
//! hard-coded. Each logical column is located by a keyword substring in the
//! (whitespace-stripped) header text; the first header containing any of the
//! column's keywords wins. A column whose keywords appear nowhere resolves to
//! `None` and extracts as an empty string.

const RANK_KEYWORDS: &[&str] = &["排名"];
const TEAM_KEYWORDS: &[&str] = &["球隊"];
const GAMES_KEYWORDS: &[&str] = &["出賽數"];
const WIN_LOSS_DRAW_KEYWORDS: &[&str] = &["勝-和-敗"];
const WIN_RATE_KEYWORDS: &[&str] = &["勝率"];
const GAMES_BEHIND_KEYWORDS: &[&str] = &["勝差"];
const ELIMINATION_KEYWORDS: &[&str] = &["淘汰指數"];
const STREAK_KEYWORDS: &[&str] = &["連勝", "連敗"];
const LAST_TEN_KEYWORDS: &[&str] = &["近十場戰績"];

/// Offsets of each logical column within a row's cell list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    pub rank: Option<usize>,
    pub team: Option<usize>,
    pub games: Option<usize>,
    pub win_loss_draw: Option<usize>,
    pub win_rate: Option<usize>,
    pub games_behind: Option<usize>,
    pub elimination_number: Option<usize>,
    pub streak: Option<usize>,
    pub last_ten_record: Option<usize>,
}

impl ColumnIndex {
    /// Resolves every logical column against the header row.
    ///
    /// `headers` are expected to be whitespace-stripped already; see
    /// [`strip_whitespace`].
    #[must_use]
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            rank: find_column(headers, RANK_KEYWORDS),
            team: find_column(headers, TEAM_KEYWORDS),
            games: find_column(headers, GAMES_KEYWORDS),
            win_loss_draw: find_column(headers, WIN_LOSS_DRAW_KEYWORDS),
            win_rate: find_column(headers, WIN_RATE_KEYWORDS),
            games_behind: find_column(headers, GAMES_BEHIND_KEYWORDS),
            elimination_number: find_column(headers, ELIMINATION_KEYWORDS),
            streak: find_column(headers, STREAK_KEYWORDS),
            last_ten_record: find_column(headers, LAST_TEN_KEYWORDS),
        }
    }

    /// Logical data columns (everything except rank and team) that could not
    /// be located. Used for diagnostics only.
    #[must_use]
    pub fn missing_columns(&self) -> Vec<&'static str> {
        [
            ("games", self.games),
            ("win_loss_draw", self.win_loss_draw),
            ("win_rate", self.win_rate),
            ("games_behind", self.games_behind),
            ("elimination_number", self.elimination_number),
            ("streak", self.streak),
            ("last_ten_record", self.last_ten_record),
        ]
        .into_iter()
        .filter_map(|(name, idx)| idx.is_none().then_some(name))
        .collect()
    }
}

fn find_column<S: AsRef<str>>(headers: &[S], keywords: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| keywords.iter().any(|kw| header.as_ref().contains(kw)))
}

/// Removes every whitespace character, including U+00A0.
#[must_use]
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
