mod highlights;
mod standings;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::highlights::HighlightsArgs;

#[derive(Debug, Parser)]
#[command(name = "cpbl-cli")]
#[command(about = "CPBL standings and full-game highlights from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the current season standings
    Standings {
        /// Print the normalized HTML fragment instead of a table
        #[arg(long)]
        html: bool,
    },
    /// Page through full-game highlight videos
    Highlights(HighlightsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cpbl_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Standings { html }) => standings::run_standings(&config, html).await?,
        Some(Commands::Highlights(args)) => highlights::run_highlights(&config, &args).await?,
        None => println!("cpbl-cli: try `standings` or `highlights` (see --help)"),
    }

    Ok(())
}
