// Command line front end for the strip preference store.
// Inspects and edits stored dates, favorites and settings, and downloads strips.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use dilbert_prefs::download::{DownloadOrchestrator, DownloadOutcome, HttpDownloader};
use dilbert_prefs::{DateKey, PreferenceStore, Quality};

/// Manage the comic-strip viewer's stored state
#[derive(Parser)]
#[command(name = "dilbert-prefs")]
#[command(about = "Inspect and edit the strip viewer's preference store", long_about = None)]
struct Cli {
    /// Preferences file (defaults to $DILBERT_PREFS or the user config dir)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the last viewed date and its cached URL
    Current,

    /// List favorited strips in date order
    Favorites,

    /// Toggle the favorite flag of a strip
    Toggle { date: DateKey },

    /// Pick a random strip date
    Random,

    /// Remember the resolved URL of a strip
    Cache { date: DateKey, url: String },

    /// Print the cached URL of a strip in the configured quality
    Url {
        date: DateKey,
        /// Force the low quality variant
        #[arg(long)]
        low: bool,
    },

    /// Download a strip into the configured folder
    Download {
        date: DateKey,
        /// Image URL (defaults to the cached URL for the date)
        url: Option<String>,
    },

    /// List staged downloads waiting to be moved
    Moves,

    /// Print every named setting as JSON
    Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = match &cli.prefs {
        Some(path) => PreferenceStore::open(path),
        None => PreferenceStore::open_default(),
    }
    .context("failed to open preference store")?;
    let store = Arc::new(store);

    match cli.command {
        Commands::Current => {
            let date = store.current_date()?;
            match store.cached_url(date) {
                Some(url) => println!("{date} {url}"),
                None => println!("{date}"),
            }
        }
        Commands::Favorites => {
            for date in store.list_favorites() {
                println!("{date}");
            }
        }
        Commands::Toggle { date } => {
            let date = date.validate();
            let state = store.toggle_favorite(date);
            println!("{date} {}", if state { "favorited" } else { "unfavorited" });
        }
        Commands::Random => {
            println!("{}", DateKey::random());
        }
        Commands::Cache { date, url } => {
            let date = date.validate();
            if !store.save_current_url(date, &url) || !store.save_current_date(date) {
                bail!("failed to save {date}");
            }
        }
        Commands::Url { date, low } => {
            let date = date.validate();
            let Some(url) = store.cached_url(date) else {
                bail!("no cached URL for {date}");
            };
            let quality = if low {
                Quality::Low
            } else {
                Quality::from_high_quality_flag(store.is_high_quality_on())
            };
            println!("{}", quality.apply(date, &url));
        }
        Commands::Download { date, url } => {
            let date = date.validate();
            let Some(url) = url.or_else(|| store.cached_url(date)) else {
                bail!("no URL given and none cached for {date}");
            };

            let downloader = Arc::new(HttpDownloader::new()?);
            let orchestrator = DownloadOrchestrator::new(store.clone(), downloader.clone());
            let outcome = orchestrator.download(&url, date)?;
            let id = outcome.id();
            match outcome {
                DownloadOutcome::Direct { destination, .. } => {
                    println!("{id} downloading to {}", destination.display());
                }
                DownloadOutcome::Staged {
                    staged,
                    destination,
                    ..
                } => {
                    println!(
                        "{id} downloading to {} (to be moved to {})",
                        staged.display(),
                        destination.display()
                    );
                }
            }
            downloader.wait_all().await;
        }
        Commands::Moves => {
            for pending in store.pending_moves() {
                println!("{} {}", pending.date, pending.destination);
            }
        }
        Commands::Settings => {
            println!("{}", serde_json::to_string_pretty(&store.settings())?);
        }
    }

    Ok(())
}
