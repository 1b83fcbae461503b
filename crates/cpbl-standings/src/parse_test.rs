use super::*;

fn base() -> Url {
    Url::parse("https://www.cpbl.com.tw").expect("valid base")
}

/// Wraps a header and body rows into a captioned standings block, preceded by
/// an unrelated block that must be ignored.
fn page(header: &[&str], body_rows: &[Vec<&str>]) -> String {
    let header_html: String = header.iter().map(|h| format!("<th>{h}</th>")).collect();
    let body_html: String = body_rows
        .iter()
        .map(|cells| {
            let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!("<tr>{tds}</tr>")
        })
        .collect();
    format!(
        r#"<html><body>
        <div class="RecordTableWrap">
          <div class="record_table_caption">投手成績</div>
          <table><tr><th>球隊</th><th>出賽數</th></tr><tr><td>Decoy</td><td>1</td></tr></table>
        </div>
        <div class="RecordTableWrap">
          <div class="record_table_caption">2024 球隊對戰戰績</div>
          <table>
            <thead><tr>{header_html}</tr></thead>
            <tbody>{body_html}</tbody>
          </table>
        </div>
        </body></html>"#
    )
}

const HEADER: [&str; 9] = [
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

fn team_a_row() -> Vec<&'static str> {
    vec![
        "1",
        "<a href=/teams/1>Team A</a>",
        "100",
        "60-0-40",
        "0.600",
        "-",
        "5.0",
        "W3",
        "7-3",
    ]
}

#[test]
fn extracts_canonical_row() {
    let html = page(&HEADER, &[team_a_row()]);
    let rows = parse_rows(&html, &base()).expect("parse");

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.rank, "1");
    assert_eq!(row.team, "Team A");
    assert_eq!(
        row.team_url.as_deref(),
        Some("https://www.cpbl.com.tw/teams/1")
    );
    assert_eq!(row.games, "100");
    assert_eq!(row.win_loss_draw, "60-0-40");
    assert_eq!(row.win_rate, "0.600");
    assert_eq!(row.games_behind, "-");
    assert_eq!(row.elimination_number, "5.0");
    assert_eq!(row.streak, "W3");
    assert_eq!(row.last_ten_record, "7-3");
}

#[test]
fn permuted_headers_extract_identical_fields() {
    let canonical = parse_rows(&page(&HEADER, &[team_a_row()]), &base()).expect("parse");

    // Reverse both header and cells; every keyword stays in exactly one header.
    let mut header = HEADER.to_vec();
    header.reverse();
    let mut cells = team_a_row();
    cells.reverse();
    let permuted = parse_rows(&page(&header, &[cells]), &base()).expect("parse");

    assert_eq!(canonical, permuted);
}

#[test]
fn ignores_extra_unknown_columns() {
    let header = [
        "排名", "球隊", "主場", "出賽數", "勝-和-敗", "勝率", "勝差", "淘汰指數", "連勝/連敗",
        "近十場戰績",
    ];
    let cells = vec![
        "2", "Team B", "Taipei", "100", "50-2-48", "0.510", "9.0", "-", "L2", "4-6",
    ];
    let rows = parse_rows(&page(&header, &[cells]), &base()).expect("parse");
    assert_eq!(rows[0].games, "100");
    assert_eq!(rows[0].streak, "L2");
    assert_eq!(rows[0].last_ten_record, "4-6");
}

#[test]
fn missing_column_degrades_to_empty_string() {
    let header = ["排名", "球隊", "出賽數", "勝率"];
    let cells = vec!["1", "Team A", "100", "0.600"];
    let rows = parse_rows(&page(&header, &[cells]), &base()).expect("parse");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].win_rate, "0.600");
    assert_eq!(rows[0].elimination_number, "");
    assert_eq!(rows[0].streak, "");
}

#[test]
fn rows_with_empty_team_are_dropped() {
    let rows = parse_rows(
        &page(
            &HEADER,
            &[
                team_a_row(),
                vec!["", "&nbsp;", "", "", "", "", "", "", ""],
                vec!["註：勝差以勝率計算"],
            ],
        ),
        &base(),
    )
    .expect("parse");

    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|r| !r.team.trim().is_empty()));
}

#[test]
fn strips_nbsp_from_cells() {
    let mut cells = team_a_row();
    cells[4] = "&nbsp;0.600&nbsp;";
    let rows = parse_rows(&page(&HEADER, &[cells]), &base()).expect("parse");
    assert_eq!(rows[0].win_rate, "0.600");
}

#[test]
fn preserves_table_order() {
    let mut second = team_a_row();
    second[0] = "2";
    second[1] = "Team B";
    let rows = parse_rows(&page(&HEADER, &[team_a_row(), second]), &base()).expect("parse");
    let teams: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
    assert_eq!(teams, ["Team A", "Team B"]);
}

#[test]
fn combined_rank_and_team_cell() {
    let header = ["球隊", "出賽數", "勝-和-敗", "勝率"];
    let cell = r#"<div class="team_name"><span class="rank">3</span><a href="team/index?teamNo=ACN011">中信兄弟</a></div>"#;
    let rows = parse_rows(
        &page(&header, &[vec![cell, "120", "62-3-55", "0.530"]]),
        &base(),
    )
    .expect("parse");

    assert_eq!(rows[0].rank, "3");
    assert_eq!(rows[0].team, "中信兄弟");
    assert_eq!(
        rows[0].team_url.as_deref(),
        Some("https://www.cpbl.com.tw/team/index?teamNo=ACN011")
    );
    assert_eq!(rows[0].games, "120");
}

#[test]
fn combined_cell_without_link_strips_rank_prefix() {
    let header = ["球隊", "出賽數"];
    let cell = r#"<div class="team_name"><span class="rank">4</span> 統一7-ELEVEn獅</div>"#;
    let rows = parse_rows(&page(&header, &[vec![cell, "120"]]), &base()).expect("parse");

    assert_eq!(rows[0].rank, "4");
    assert_eq!(rows[0].team, "統一7-ELEVEn獅");
    assert!(rows[0].team_url.is_none());
}

#[test]
fn absolute_team_link_is_kept() {
    let mut cells = team_a_row();
    cells[1] = r#"<a href="https://example.com/a">Team A</a>"#;
    let rows = parse_rows(&page(&HEADER, &[cells]), &base()).expect("parse");
    assert_eq!(rows[0].team_url.as_deref(), Some("https://example.com/a"));
}

#[test]
fn script_link_is_not_resolved() {
    let mut cells = team_a_row();
    cells[1] = r#"<a href="javascript:void(0)">Team A</a>"#;
    let rows = parse_rows(&page(&HEADER, &[cells]), &base()).expect("parse");
    assert_eq!(rows[0].team, "Team A");
    assert!(rows[0].team_url.is_none());
}

#[test]
fn missing_block_is_an_error() {
    let html = r#"<div class="RecordTableWrap"><caption>其他</caption><table></table></div>"#;
    let err = parse_rows(html, &base()).unwrap_err();
    assert!(
        matches!(err, StandingsError::BlockNotFound),
        "expected BlockNotFound, got: {err:?}"
    );
    assert_eq!(err.to_string(), "standings block not found");
}

#[test]
fn block_without_table_is_an_error() {
    let html = r#"<div class="RecordTableWrap"><div class="record_table_caption">球隊對戰戰績</div></div>"#;
    let err = parse_rows(html, &base()).unwrap_err();
    assert!(matches!(err, StandingsError::TableNotFound));
    assert!(err.is_parse_failure());
}

#[test]
fn caption_element_inside_table_is_recognized() {
    let html = r#"<div class="RecordTableWrap"><table>
        <caption>球隊對戰戰績</caption>
        <tr><th>排名</th><th>球隊</th></tr>
        <tr><td>1</td><td>Team A</td></tr>
    </table></div>"#;
    let rows = parse_rows(html, &base()).expect("parse");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].team, "Team A");
}

#[test]
fn scrape_standings_renders_fragment() {
    let standings = scrape_standings(&page(&HEADER, &[team_a_row()]), &base()).expect("scrape");
    assert_eq!(standings.rows.len(), 1);
    assert!(standings.rendered_fragment.contains("Team A"));
    assert!(standings
        .rendered_fragment
        .contains("https://www.cpbl.com.tw/teams/1"));
}
