//! `highlights` command: drives a pagination session against the server's
//! highlights endpoint, the same way a scrolling page would.

use clap::Args;
use cpbl_highlights::{
    query::DEFAULT_KEYWORD, HighlightsSession, HttpHighlightsSource, SessionFilter, SessionPhase,
    Video,
};

#[derive(Debug, Args)]
pub struct HighlightsArgs {
    /// Keyword a title must contain (any of them); repeatable
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,
    /// Token every title must contain; repeatable
    #[arg(long = "must-all")]
    pub must_all: Vec<String>,
    /// Only show games of this team
    #[arg(long)]
    pub team: Option<String>,
    /// Starting recency window in days (0 = unbounded)
    #[arg(long)]
    pub days: Option<u32>,
    /// Page size (clamped to 50)
    #[arg(long)]
    pub limit: Option<u32>,
    /// Number of loads to perform
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
    /// Highlights endpoint; defaults to the configured one
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Builds the session filter from flags and configured defaults. A team is
/// one more must-all token.
pub(crate) fn session_filter(
    args: &HighlightsArgs,
    default_days: u32,
    default_limit: u32,
) -> SessionFilter {
    let mut keywords: Vec<String> = args
        .keywords
        .iter()
        .map(|k| k.trim().to_owned())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        keywords.push(DEFAULT_KEYWORD.to_owned());
    }

    let mut title_must_all: Vec<String> = args
        .must_all
        .iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect();
    if let Some(team) = args.team.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        title_must_all.push(team.to_owned());
    }

    SessionFilter {
        keywords,
        title_must_all,
        window_days: args.days.unwrap_or(default_days),
        page_size: args.limit.unwrap_or(default_limit),
    }
}

pub(crate) async fn run_highlights(
    config: &cpbl_core::AppConfig,
    args: &HighlightsArgs,
) -> anyhow::Result<()> {
    let endpoint = args.endpoint.as_deref().unwrap_or(&config.highlights_endpoint);
    let source =
        HttpHighlightsSource::new(endpoint, config.request_timeout_secs, &config.user_agent)?;
    let mut session = HighlightsSession::new(source, config.highlights_max_window_days);
    session.apply(session_filter(
        args,
        config.highlights_default_days,
        config.highlights_default_limit,
    ));

    for load in 1..=args.pages {
        let summary = session.load_next().await?;
        tracing::info!(
            load,
            fetches = summary.fetches,
            appended = summary.appended,
            phase = ?summary.phase,
            "loaded highlights"
        );
        if summary.phase == SessionPhase::Done {
            break;
        }
    }

    let videos = session.visible_videos();
    if videos.is_empty() {
        println!("no highlights found");
    }
    for video in videos {
        println!("{}", format_video(video));
    }
    Ok(())
}

pub(crate) fn format_video(video: &Video) -> String {
    format!(
        "{}  {}  [{}]  https://www.youtube.com/watch?v={}",
        video.published_at.format("%Y-%m-%d"),
        video.title,
        video.channel_title,
        video.id
    )
}
