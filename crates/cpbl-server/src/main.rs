mod api;
mod middleware;

use std::sync::Arc;

use cpbl_highlights::{HighlightsService, QueryDefaults, YoutubeClient};
use cpbl_standings::StandingsClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cpbl_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let standings = StandingsClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        &config.standings_url,
        &config.standings_base_url,
    )?;
    let youtube = YoutubeClient::with_base_url(
        config.youtube_api_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        &config.youtube_api_base_url,
    )?;
    if config.youtube_api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY not set; /api/highlights will fail until configured");
    }

    let state = AppState {
        standings: Arc::new(standings),
        highlights: Arc::new(HighlightsService::new(
            youtube,
            config.youtube_playlist_id.clone(),
        )),
        query_defaults: QueryDefaults {
            limit: config.highlights_default_limit,
            days: config.highlights_default_days,
        },
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "cpbl-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
