//! `standings` command.

use cpbl_standings::{StandingsClient, StandingsRow};

pub(crate) async fn run_standings(config: &cpbl_core::AppConfig, html: bool) -> anyhow::Result<()> {
    let client = StandingsClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.standings_url,
        &config.standings_base_url,
    )?;
    let standings = client.scrape().await?;
    tracing::info!(rows = standings.rows.len(), source = client.source_url(), "scraped standings");

    if html {
        println!("{}", standings.rendered_fragment);
        return Ok(());
    }

    println!("排名\t球隊\t出賽數\t勝-和-敗\t勝率\t勝差\t淘汰指數\t連勝/連敗\t近十場戰績");
    for row in &standings.rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

/// Tab-separated line in fragment column order.
pub(crate) fn format_row(row: &StandingsRow) -> String {
    [
        row.rank.as_str(),
        row.team.as_str(),
        row.games.as_str(),
        row.win_loss_draw.as_str(),
        row.win_rate.as_str(),
        row.games_behind.as_str(),
        row.elimination_number.as_str(),
        row.streak.as_str(),
        row.last_ten_record.as_str(),
    ]
    .join("\t")
}
