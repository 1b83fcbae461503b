//! Normalized HTML fragment for direct embedding.
//!
//! The fragment always has the same nine equal-width columns, whatever the
//! upstream table looked like.

use crate::types::StandingsRow;

/// Column titles of the rendered fragment, in display order.
pub const FRAGMENT_HEADERS: [&str; 9] = [
    "排名",
    "球隊",
    "出賽數",
    "勝-和-敗",
    "勝率",
    "勝差",
    "淘汰指數",
    "連勝/連敗",
    "近十場戰績",
];

/// 100% split across the nine columns.
const COLUMN_WIDTH: &str = "11.11%";

/// Renders rows into a fixed-layout `<table>` fragment.
#[must_use]
pub fn render_fragment(rows: &[StandingsRow]) -> String {
    let mut html = String::from(
        r#"<table class="standings-table" style="table-layout:fixed;width:100%">"#,
    );

    html.push_str("<colgroup>");
    for _ in FRAGMENT_HEADERS {
        html.push_str(&format!(r#"<col style="width:{COLUMN_WIDTH}">"#));
    }
    html.push_str("</colgroup>");

    html.push_str("<thead><tr>");
    for title in FRAGMENT_HEADERS {
        html.push_str(&format!("<th>{}</th>", escape_html(title)));
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        html.push_str("<tr>");
        push_cell(&mut html, &row.rank);
        match &row.team_url {
            Some(url) => html.push_str(&format!(
                r#"<td><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></td>"#,
                escape_html(url),
                escape_html(&row.team)
            )),
            None => push_cell(&mut html, &row.team),
        }
        push_cell(&mut html, &row.games);
        push_cell(&mut html, &row.win_loss_draw);
        push_cell(&mut html, &row.win_rate);
        push_cell(&mut html, &row.games_behind);
        push_cell(&mut html, &row.elimination_number);
        push_cell(&mut html, &row.streak);
        push_cell(&mut html, &row.last_ten_record);
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn push_cell(html: &mut String, value: &str) {
    html.push_str(&format!("<td>{}</td>", escape_html(value)));
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
