use crate::api::pexels;
use crate::config::Config;
use crate::ffmpeg;
use crate::fetch;
use crate::init;
use crate::tts::{self, TtsOptions};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

const KEYWORDS_FILE: &str = "keywords.txt";

/// End-to-end run: narration + subtitles, stock clip download, final mux.
/// Steps run sequentially in-process; the first failure aborts the rest.
pub async fn run(
    cfg: &Config,
    client: &Client,
    input_dir: &Path,
    filename: &str,
    opts: &TtsOptions,
) -> Result<()> {
    info!("Running TTS generation...");
    let text_path = input_dir.join(format!("{filename}.txt"));
    let text = fs::read_to_string(&text_path)
        .await
        .with_context(|| format!("read narration text: {}", text_path.display()))?;
    tts::generate_tts_with_subtitles(client, &text, input_dir, filename, opts)
        .await
        .context("TTS generation failed")?;

    let keywords_path = input_dir.join(KEYWORDS_FILE);
    if !init::file_exists(&keywords_path).await {
        anyhow::bail!("keywords.txt not found at {}", keywords_path.display());
    }

    info!("Running video downloader...");
    let keywords = pexels::read_keywords(&keywords_path).await?;
    if keywords.is_empty() {
        anyhow::bail!("no keywords found in {}", keywords_path.display());
    }

    let mut rng = StdRng::seed_from_u64(fetch::now_seed());
    let downloaded =
        pexels::download_videos(client, &cfg.pexels_api_keys, &keywords, input_dir, 1, &mut rng)
            .await
            .context("video download failed")?;

    let Some(clip) = downloaded.first() else {
        warn!("No clip was downloaded; skipping final mux.");
        return Ok(());
    };

    let audio = input_dir.join(format!("{filename}.mp3"));
    let srt = input_dir.join(format!("{filename}.srt"));
    let out = input_dir.join(format!("{filename}_final.mp4"));
    info!("Muxing final video -> {}", out.display());
    ffmpeg::mux_video_audio_subtitles(clip, &audio, &srt, &out)
        .await
        .context("ffmpeg mux failed")?;

    info!("Video creation process completed successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_narration_text_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::default();
        let client = Client::new();
        let err = run(&cfg, &client, dir.path(), "story", &TtsOptions::default())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("story.txt"));
    }
}
