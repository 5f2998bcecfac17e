//! Pinflow CLI, the Pinterest content workflow toolkit.
//!
//! Configuration comes from `PINFLOW_*` environment variables (a `.env`
//! file is honored). Subcommands: ingest, batch, fetch, caption.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pinflow_cli::{init_tracing, summarize_report};
use pinflow_core::Config;
use pinflow_processing::{CaptionRenderer, CaptionStyle, OutlinedCaption};
use pinflow_services::fetch::derive_fetch_filename;
use pinflow_services::{load_batch_csv, BatchProcessor, HttpFetcher, MediaFetcher, PinIngest};
use pinflow_storage::create_drive;

#[derive(Parser)]
#[command(name = "pinflow", about = "Pinterest content workflow toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download pin images for matching JSON files and export CSV summaries
    Ingest {
        /// Override the source JSON folder
        #[arg(long)]
        source_dir: Option<PathBuf>,
    },
    /// Caption a CSV of image URLs and upload the results to the drive
    Batch {
        /// CSV file with url, text, filename columns
        csv: PathBuf,
        /// Seconds to wait between items
        #[arg(long)]
        delay: Option<u64>,
    },
    /// Download a single image URL
    Fetch {
        /// URL of the image to download
        url: String,
        /// Output path; derived from the URL when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Draw an outlined caption onto a local image
    Caption {
        /// Path to the input image
        input: PathBuf,
        /// Path for the captioned output
        output: PathBuf,
        /// Caption text
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config =
        Config::from_env().context("Failed to load configuration from PINFLOW_* environment")?;

    match cli.command {
        Commands::Ingest { source_dir } => {
            if let Some(dir) = source_dir {
                config.source_dir = dir;
            }
            let fetcher = http_fetcher(&config)?;
            let report = PinIngest::new(fetcher, config).run().await?;
            println!(
                "{} file(s) processed, {} image(s) downloaded",
                report.files_processed, report.images_downloaded
            );
        }
        Commands::Batch { csv, delay } => {
            let items = load_batch_csv(&csv)?;
            let fetcher = http_fetcher(&config)?;
            let renderer: Arc<dyn CaptionRenderer> = Arc::new(OutlinedCaption::from_candidates(
                &config.font_candidates,
                CaptionStyle::banner(),
            )?);
            let drive = create_drive(&config).await?;
            let delay = Duration::from_secs(delay.unwrap_or(config.batch_delay_secs));

            let report = BatchProcessor::new(fetcher, renderer, drive, delay)
                .process(&items)
                .await;

            for outcome in &report.outcomes {
                let mark = if outcome.status.is_success() { "ok " } else { "err" };
                match &outcome.drive_file_id {
                    Some(id) => println!("{} {} -> {}", mark, outcome.filename, id),
                    None => println!("{} {} ({})", mark, outcome.filename, outcome.status),
                }
            }
            println!("{}", summarize_report(&report));
        }
        Commands::Fetch { url, output } => {
            let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
            let bytes = fetcher.fetch(&url).await?;
            let output = output.unwrap_or_else(|| PathBuf::from(derive_fetch_filename(&url)));
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Saved {} ({} bytes)", output.display(), bytes.len());
        }
        Commands::Caption {
            input,
            output,
            text,
        } => {
            let bytes = tokio::fs::read(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let renderer =
                OutlinedCaption::from_candidates(&config.font_candidates, CaptionStyle::poster())
                    .context("No usable font found; set PINFLOW_FONTS")?;

            let rendered =
                tokio::task::spawn_blocking(move || renderer.render(&bytes, &text)).await??;
            tokio::fs::write(&output, rendered)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Saved {}", output.display());
        }
    }

    Ok(())
}

fn http_fetcher(config: &Config) -> anyhow::Result<Arc<dyn MediaFetcher>> {
    let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
    Ok(Arc::new(fetcher))
}
