use anyhow::{Context, Result};
use clap::Parser;
use shortgen::api::deepseek::{
    ScriptGenerator, FIRST_SCRIPT_INSTRUCTION, SECOND_SCRIPT_INSTRUCTION,
};
use shortgen::config::{self, Config};
use shortgen::init;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// Generate two short-video script variants from a concept prompt.
#[derive(Parser, Debug)]
#[command(name = "script-writer")]
struct Args {
    /// Text prompt to generate scripts from
    #[arg(long)]
    prompt: String,

    /// Directory to save the generated scripts
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config_path = config::resolve_config_path(args.config.as_deref());
    info!("Loading configuration from: {}", config_path.display());
    let cfg = Config::load(&config_path).await?;
    if cfg.deepseek_api_key.is_empty() {
        anyhow::bail!("DeepSeek API key not found in {}", config_path.display());
    }

    init::ensure_dir(&args.output).await?;

    let generator = ScriptGenerator::new(cfg.deepseek_api_key.clone())?;
    let script1 = generator
        .generate_script(&args.prompt, FIRST_SCRIPT_INSTRUCTION)
        .await
        .context("error generating first script")?;
    let script2 = generator
        .generate_script(&args.prompt, SECOND_SCRIPT_INSTRUCTION)
        .await
        .context("error generating second script")?;

    // Both scripts are generated before either is saved: a failure on the
    // second variant leaves no partial output behind.
    let script1_path = args.output.join("script1.txt");
    let script2_path = args.output.join("script2.txt");
    fs::write(&script1_path, &script1)
        .await
        .with_context(|| format!("error saving {}", script1_path.display()))?;
    fs::write(&script2_path, &script2)
        .await
        .with_context(|| format!("error saving {}", script2_path.display()))?;

    info!("Successfully generated and saved two scripts:");
    info!("1. {}", script1_path.display());
    info!("2. {}", script2_path.display());
    Ok(())
}
