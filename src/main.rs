mod config;
mod download;
mod fetch;
mod output;
mod parser;
mod records;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use config::{Config, Mode};

#[derive(Parser)]
#[command(
    name = "kannapedia_scraper",
    about = "Scrape a single Kannapedia strain report into CSV files"
)]
struct Cli {
    /// Strain page identifier, e.g. rsp10000
    #[arg(short = 'u', long = "url", value_name = "PAGE")]
    page: String,

    /// Download the linked report files instead of listing them in the metadata file
    #[arg(short = 'd', long)]
    download_files: bool,

    /// Directory the per-strain folder is created in
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,

    /// Base URL the page identifier is appended to
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Also print the extracted report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let config = Config::new(
        &cli.page,
        Mode::from_flag(cli.download_files),
        &cli.base_url,
        cli.out_dir,
    )?;

    let client = fetch::build_client()?;

    println!("Getting page...");
    let html = fetch::fetch_page(&client, &config.page_url()).await?;
    let report = parser::extract_page(&html, &config.origin)?;

    println!("Creating directory...");
    let dir = output::create_strain_dir(&config.out_dir, &report.metadata.name, &config.page_id)?;

    match config.mode {
        Mode::DownloadFiles => {
            println!("Downloading files...");
            let stats = download::download_all(&client, &report.links, &dir).await?;
            println!(
                "Downloaded {} files ({} ok, {} failed).",
                stats.total, stats.ok, stats.failed
            );
        }
        Mode::CollectLinks => {
            println!("Saving {} download links to metafile...", report.links.len());
        }
    }

    println!("Writing CSV files...");
    let files = output::write_report(&dir, &report, config.mode)?;
    for path in [&files.metadata, &files.chemicals, &files.variants] {
        println!("  {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    println!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
