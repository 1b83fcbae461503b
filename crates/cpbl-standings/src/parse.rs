//! Extraction of standings rows from the league site's season page.
//!
//! The page carries several `RecordTableWrap` blocks (standings, head-to-head,
//! splits). The one we want is identified by its caption text rather than its
//! position, then its columns are mapped by header keyword (see
//! [`crate::columns`]).

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::columns::{strip_whitespace, ColumnIndex};
use crate::error::StandingsError;
use crate::render::render_fragment;
use crate::types::{Standings, StandingsRow};

/// Class of the block wrapping each table on the season page.
pub const WRAPPER_SELECTOR: &str = ".RecordTableWrap";

/// Text that marks the standings block's caption.
pub const CAPTION_MARKER: &str = "球隊對戰戰績";

const CAPTION_SELECTOR: &str = "caption, .record_table_caption";
const RANK_SELECTOR: &str = ".rank";
const TEAM_LINK_SELECTOR: &str = "a";
const TEAM_NAME_SELECTOR: &str = ".team_name";

struct RowSelectors {
    rank: Selector,
    team_link: Selector,
    team_name: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self, StandingsError> {
        Ok(Self {
            rank: selector(RANK_SELECTOR)?,
            team_link: selector(TEAM_LINK_SELECTOR)?,
            team_name: selector(TEAM_NAME_SELECTOR)?,
        })
    }
}

/// Scrapes the standings table out of `html` and renders the normalized
/// fragment.
///
/// # Errors
///
/// - [`StandingsError::BlockNotFound`]: no wrapper carries the caption marker.
/// - [`StandingsError::TableNotFound`]: the block has no `<table>`.
pub fn scrape_standings(html: &str, base_url: &Url) -> Result<Standings, StandingsError> {
    let rows = parse_rows(html, base_url)?;
    let rendered_fragment = render_fragment(&rows);
    Ok(Standings {
        rows,
        rendered_fragment,
    })
}

/// Extracts one [`StandingsRow`] per data row, in table order.
///
/// Rows whose team resolves to an empty string (separators, footnotes) are
/// skipped. A column missing from the header yields empty strings for that
/// field instead of failing.
///
/// # Errors
///
/// Same as [`scrape_standings`].
pub fn parse_rows(html: &str, base_url: &Url) -> Result<Vec<StandingsRow>, StandingsError> {
    let document = Html::parse_document(html);
    let wrapper_sel = selector(WRAPPER_SELECTOR)?;
    let caption_sel = selector(CAPTION_SELECTOR)?;
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let row_selectors = RowSelectors::new()?;

    let wrapper = document
        .select(&wrapper_sel)
        .find(|wrapper| {
            wrapper
                .select(&caption_sel)
                .any(|caption| caption.text().collect::<String>().contains(CAPTION_MARKER))
        })
        .ok_or(StandingsError::BlockNotFound)?;

    let table = wrapper
        .select(&table_sel)
        .next()
        .ok_or(StandingsError::TableNotFound)?;

    let mut table_rows = table.select(&row_sel);
    let Some(header_row) = table_rows.next() else {
        return Ok(Vec::new());
    };

    let headers: Vec<String> = row_cells(header_row)
        .map(|cell| strip_whitespace(&cell.text().collect::<String>()))
        .collect();
    let index = ColumnIndex::resolve(&headers);

    let missing = index.missing_columns();
    if !missing.is_empty() {
        tracing::warn!(?missing, ?headers, "standings columns not found in header");
    }

    let mut rows = Vec::new();
    for row in table_rows {
        let cells: Vec<ElementRef<'_>> = row_cells(row).collect();
        if cells.is_empty() {
            continue;
        }
        match extract_row(&cells, &index, base_url, &row_selectors) {
            Some(parsed) => rows.push(parsed),
            None => tracing::debug!(cells = cells.len(), "skipping standings row without team"),
        }
    }

    tracing::debug!(rows = rows.len(), "parsed standings rows");
    Ok(rows)
}

fn extract_row(
    cells: &[ElementRef<'_>],
    index: &ColumnIndex,
    base_url: &Url,
    selectors: &RowSelectors,
) -> Option<StandingsRow> {
    let first = cells.first()?;

    // The site's sticky first column packs rank and team into one cell.
    let (rank, team, href) = if let Some(rank_el) = first.select(&selectors.rank).next() {
        let rank = cell_text(&rank_el);
        let (team, href) = team_from_cell(first, Some(&rank), selectors);
        (rank, team, href)
    } else {
        let rank_cell = index.rank.and_then(|i| cells.get(i)).unwrap_or(first);
        let rank = cell_text(rank_cell);
        let (team, href) = match index.team.and_then(|i| cells.get(i)) {
            Some(team_cell) => team_from_cell(team_cell, None, selectors),
            None => first
                .select(&selectors.team_link)
                .next()
                .map(|link| (cell_text(&link), link.value().attr("href").map(str::to_owned)))
                .unwrap_or_default(),
        };
        (rank, team, href)
    };

    if team.is_empty() {
        return None;
    }

    let field = |idx: Option<usize>| -> String {
        idx.and_then(|i| cells.get(i))
            .map(cell_text)
            .unwrap_or_default()
    };

    Some(StandingsRow {
        rank,
        team,
        team_url: href.as_deref().and_then(|h| absolutize(base_url, h)),
        games: field(index.games),
        win_loss_draw: field(index.win_loss_draw),
        win_rate: field(index.win_rate),
        games_behind: field(index.games_behind),
        elimination_number: field(index.elimination_number),
        streak: field(index.streak),
        last_ten_record: field(index.last_ten_record),
    })
}

/// Team name and raw `href` from a cell. Prefers the link text, then a
/// `.team_name` element, then the whole cell with any leading rank removed.
fn team_from_cell(
    cell: &ElementRef<'_>,
    rank: Option<&str>,
    selectors: &RowSelectors,
) -> (String, Option<String>) {
    if let Some(link) = cell.select(&selectors.team_link).next() {
        return (
            cell_text(&link),
            link.value().attr("href").map(str::to_owned),
        );
    }

    let text = cell
        .select(&selectors.team_name)
        .next()
        .map_or_else(|| cell_text(cell), |el| cell_text(&el));

    let text = match rank {
        Some(rank) if !rank.is_empty() => text
            .strip_prefix(rank)
            .map_or_else(|| text.clone(), |rest| rest.trim().to_owned()),
        _ => text,
    };

    (text, None)
}

/// Resolves a team link against the site base. Fragment-only and script links
/// are dropped.
fn absolutize(base_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    base_url.join(href).ok().map(String::from)
}

/// Cell text with non-breaking spaces removed and surrounding whitespace trimmed.
fn cell_text(el: &ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .replace('\u{a0}', "")
        .trim()
        .to_owned()
}

/// Direct `<th>`/`<td>` children of a row (nested tables are not descended into).
fn row_cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "td" | "th"))
}

fn selector(css: &str) -> Result<Selector, StandingsError> {
    Selector::parse(css).map_err(|e| StandingsError::Selector {
        selector: css.to_owned(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
