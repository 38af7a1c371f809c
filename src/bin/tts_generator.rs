use anyhow::{Context, Result};
use clap::Parser;
use shortgen::init;
use shortgen::tts::{self, TtsOptions};
use std::path::PathBuf;
use tokio::fs;

/// Synthesize narration audio and estimated-timing subtitles from a text file.
#[derive(Parser, Debug)]
#[command(name = "tts-generator")]
struct Args {
    /// Directory to save output files
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Base filename for output files (without extension)
    #[arg(long, default_value = "output")]
    filename: String,

    /// Name of text file to read (in the output directory)
    #[arg(long, default_value = "input.txt")]
    textfile: String,

    /// Language for TTS
    #[arg(long, default_value = "en")]
    lang: String,

    /// Voice to use
    #[arg(long, default_value = "")]
    voice: String,

    /// Speech speed
    #[arg(long, default_value_t = 1.0)]
    speed: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    init::ensure_dir(&args.output).await?;

    let text_path = args.output.join(&args.textfile);
    let text = fs::read_to_string(&text_path)
        .await
        .with_context(|| format!("error reading text file: {}", text_path.display()))?;
    if text.trim().is_empty() {
        anyhow::bail!("the text file is empty");
    }

    let opts = TtsOptions {
        language: args.lang,
        voice: args.voice,
        speed: args.speed,
    };

    let client = reqwest::Client::new();
    tts::generate_tts_with_subtitles(&client, &text, &args.output, &args.filename, &opts).await
}
