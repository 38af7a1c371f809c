use anyhow::{Context, Result};
use std::path::Path;
use tokio::process::Command;

async fn run_cmd(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Ok(());
    }

    let mut cmd = Command::new(&args[0]);
    if args.len() > 1 {
        cmd.args(&args[1..]);
    }

    // Inherits stdout/stderr; blocks until the child exits, no timeout.
    let status = cmd.status().await.context("Command execution failed")?;
    if !status.success() {
        return Err(anyhow::anyhow!("Command failed: {:?}", args));
    }

    Ok(())
}

/// Burns subtitles into the video stream and replaces its audio with the
/// narration track, using fixed encoding parameters.
pub async fn mux_video_audio_subtitles(
    video: &Path,
    audio: &Path,
    subtitles: &Path,
    out: &Path,
) -> Result<()> {
    let args = vec![
        "ffmpeg".to_string(),
        "-y".to_string(),
        "-i".to_string(),
        video.display().to_string(),
        "-i".to_string(),
        audio.display().to_string(),
        "-vf".to_string(),
        format!("subtitles={}", subtitles.display()),
        "-map".to_string(),
        "0:v".to_string(),
        "-map".to_string(),
        "1:a".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-shortest".to_string(),
        out.display().to_string(),
    ];
    run_cmd(&args).await
}
