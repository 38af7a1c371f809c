use crate::subtitle;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::info;

const TTS_URL: &str = "https://translate.google.com/translate_tts";
const MAX_CHUNK_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct TtsOptions {
    pub language: String,
    /// Accepted for CLI parity; the endpoint picks the voice from the language.
    pub voice: String,
    /// Accepted for CLI parity; the endpoint has no speed control.
    pub speed: f64,
}

impl Default for TtsOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            voice: String::new(),
            speed: 1.0,
        }
    }
}

/// Splits text into whitespace-delimited chunks the TTS endpoint accepts.
/// A single word longer than the limit becomes its own chunk.
pub fn chunk_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !current.is_empty() && current.chars().count() + 1 + word_len > MAX_CHUNK_CHARS {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Fetches narration audio chunk by chunk and appends the MP3 payloads
/// into one output file.
pub async fn synthesize_mp3(
    client: &Client,
    text: &str,
    opts: &TtsOptions,
    out_path: &Path,
) -> Result<()> {
    let chunks = chunk_text(text);
    if chunks.is_empty() {
        anyhow::bail!("no valid text to process");
    }

    let language = if opts.language.is_empty() {
        "en"
    } else {
        opts.language.as_str()
    };

    let mut audio: Vec<u8> = Vec::new();
    for chunk in &chunks {
        let resp = client
            .get(TTS_URL)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk.as_str()),
            ])
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .context("TTS request failed")?;

        if resp.status() != StatusCode::OK {
            anyhow::bail!("TTS generation failed: HTTP {}", resp.status().as_u16());
        }

        let bytes = resp.bytes().await.context("TTS response read failed")?;
        audio.extend_from_slice(&bytes);
    }

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    fs::write(out_path, &audio)
        .await
        .with_context(|| format!("write audio: {}", out_path.display()))?;
    Ok(())
}

/// Creates `<output_dir>/<filename>.mp3` and a matching `.srt` with
/// estimated timings.
pub async fn generate_tts_with_subtitles(
    client: &Client,
    text: &str,
    output_dir: &Path,
    filename: &str,
    opts: &TtsOptions,
) -> Result<()> {
    fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;

    let sentences = subtitle::split_into_sentences(text);
    if sentences.is_empty() {
        anyhow::bail!("no valid text to process");
    }

    let audio_path = output_dir.join(format!("{filename}.mp3"));
    synthesize_mp3(client, text, opts, &audio_path)
        .await
        .context("TTS generation failed")?;

    let srt_path = output_dir.join(format!("{filename}.srt"));
    subtitle::write_srt(&sentences, &srt_path)
        .await
        .context("subtitle generation failed")?;

    info!("TTS audio saved to: {}", audio_path.display());
    info!("Subtitles saved to: {}", srt_path.display());
    Ok(())
}
