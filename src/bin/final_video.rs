use anyhow::Result;
use clap::Parser;
use shortgen::config::{self, Config};
use shortgen::init;
use shortgen::pipeline;
use shortgen::tts::TtsOptions;
use std::path::PathBuf;
use tracing::warn;

/// Run the whole production pipeline: narration + subtitles, stock clip
/// download, and the final ffmpeg mux.
#[derive(Parser, Debug)]
#[command(name = "final-video")]
struct Args {
    /// Directory holding `<FILENAME>.txt` and `keywords.txt`
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Base filename (without extension) for the narration text and outputs
    #[arg(value_name = "FILENAME")]
    filename: String,

    /// Language for TTS
    #[arg(long, default_value = "en")]
    lang: String,

    /// Voice to use
    #[arg(long, default_value = "")]
    voice: String,

    /// Speech speed
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if !init::check_ffmpeg().await {
        warn!("FFmpeg not found in PATH. Please install FFmpeg.");
    }

    let config_path = config::resolve_config_path(args.config.as_deref());
    let cfg = Config::load(&config_path).await?;

    let opts = TtsOptions {
        language: args.lang,
        voice: args.voice,
        speed: args.speed,
    };

    let client = reqwest::Client::new();
    pipeline::run(&cfg, &client, &args.input_dir, &args.filename, &opts).await
}
