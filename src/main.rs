mod cache;
mod constants;
mod dom;
mod error;
mod extractors;
mod fetch;
mod output;
mod status;

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::fetch::CachedClient;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "pydocs_scraper", about = "Python documentation and PEP index scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (default: plain lines on stdout)
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Clear the HTTP response cache before the run
    #[arg(short = 'c', long, global = true)]
    clear_cache: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Release notes links from the "What's New" index
    WhatsNew,
    /// Version/status pairs from the documentation front page
    LatestVersions,
    /// Download the PDF (A4) documentation archive
    Download,
    /// Tally PEPs by confirmed status
    Pep,
}

impl Commands {
    fn mode(&self) -> &'static str {
        match self {
            Commands::WhatsNew => "whats-new",
            Commands::LatestVersions => "latest-versions",
            Commands::Download => "download",
            Commands::Pep => "pep",
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    info!("Parser started");
    info!("Command line mode: {}", cli.command.mode());

    if let Err(e) = run(&cli).context("parser failed") {
        error!("{:#}", e);
        return Err(e);
    }

    info!("Parser finished in {}", format_duration(t0.elapsed()));
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let conn = cache::connect(Path::new(constants::CACHE_PATH))?;
    let client = CachedClient::new(conn)?;
    if cli.clear_cache {
        client.clear_cache()?;
    }

    let results = match cli.command {
        Commands::WhatsNew => Some(extractors::whats_new::whats_new(&client)?),
        Commands::LatestVersions => Some(extractors::latest_versions::latest_versions(&client)?),
        Commands::Download => {
            extractors::download::download(&client, Path::new(constants::DOWNLOADS_DIR))?;
            None
        }
        Commands::Pep => Some(extractors::pep::pep(&client)?),
    };

    // Nothing to print for modes whose result is a side effect.
    if let Some(rows) = results {
        output::control_output(&rows, cli.command.mode(), cli.output)?;
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
