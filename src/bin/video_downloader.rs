use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shortgen::api::pexels;
use shortgen::config::{self, Config};
use shortgen::fetch;
use std::path::PathBuf;
use tracing::info;

/// Download stock video clips matching keywords, rotating through the
/// configured API keys.
#[derive(Parser, Debug)]
#[command(name = "video-downloader")]
struct Args {
    /// File containing search keywords, one per line
    #[arg(value_name = "KEYWORDS_FILE")]
    keywords_file: PathBuf,

    /// Directory to save downloaded videos into
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Configuration file path
    #[arg(value_name = "CONFIG_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config_path = config::resolve_config_path(args.config.as_deref());
    info!("Loading configuration from: {}", config_path.display());
    let cfg = Config::load(&config_path).await?;
    info!("Loaded {} Pexels API keys", cfg.pexels_api_keys.len());

    let keywords = pexels::read_keywords(&args.keywords_file).await?;
    if keywords.is_empty() {
        anyhow::bail!("no keywords found in the file");
    }
    info!("Using keywords: {}", keywords);

    let client = reqwest::Client::new();
    let mut rng = StdRng::seed_from_u64(fetch::now_seed());
    let saved = pexels::download_videos(
        &client,
        &cfg.pexels_api_keys,
        &keywords,
        &args.output_dir,
        1,
        &mut rng,
    )
    .await?;

    info!("Downloaded {} clip(s).", saved.len());
    Ok(())
}
