use crate::errors::AttemptError;
use crate::fetch;
use crate::init;
use anyhow::{Context, Result};
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

const SEARCH_URL: &str = "https://api.pexels.com/videos/search";
const VIDEOS_SUBDIR: &str = "pexels-videos";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    pub user: User,
    #[serde(default)]
    pub video_files: Vec<VideoFile>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VideoFile {
    pub link: String,
}

/// Reads keywords from a file, one per line, joined into one query string.
pub async fn read_keywords(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("read keywords: {}", path.display()))?;

    let keywords: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    Ok(keywords.join(" "))
}

/// Queries the video search endpoint, rotating through the API keys until
/// one succeeds. The key order is shuffled with the caller's RNG.
pub async fn search_videos<R: Rng>(
    client: &Client,
    keys: &[String],
    query: &str,
    per_page: u32,
    rng: &mut R,
) -> Result<SearchResponse> {
    let keys = fetch::shuffled_keys(keys, rng)?;
    let per_page = per_page.to_string();

    let resp = fetch::try_each_key(&keys, |key| {
        let req = client
            .get(SEARCH_URL)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .header("Authorization", key);
        async move {
            let resp = req.send().await?;
            if resp.status() != StatusCode::OK {
                return Err(AttemptError::Status(resp.status()));
            }
            Ok(resp)
        }
    })
    .await?;

    resp.json().await.context("Error decoding response")
}

pub async fn download_video(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let resp = client
        .get(url)
        .send()
        .await
        .context("video download request failed")?;

    if resp.status() != StatusCode::OK {
        anyhow::bail!("received non-200 status code: {}", resp.status().as_u16());
    }

    let bytes = resp
        .bytes()
        .await
        .context("video download read failed")?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create dir: {}", parent.display()))?;
    }
    fs::write(dest, &bytes)
        .await
        .with_context(|| format!("write video: {}", dest.display()))?;
    Ok(())
}

/// Full search-and-download flow: returns the paths of the clips that were
/// saved under `<output_dir>/pexels-videos/`.
pub async fn download_videos<R: Rng>(
    client: &Client,
    keys: &[String],
    keywords: &str,
    output_dir: &Path,
    per_page: u32,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    let videos_dir = output_dir.join(VIDEOS_SUBDIR);
    init::ensure_dir(&videos_dir).await?;
    info!("Videos will be saved to: {}", videos_dir.display());

    let resp = search_videos(client, keys, keywords, per_page, rng).await?;
    if resp.videos.is_empty() {
        anyhow::bail!("no videos found for the given keywords");
    }

    let mut saved = Vec::new();
    for video in &resp.videos {
        info!("Downloading video by {}...", video.user.name);

        let Some(file) = video.video_files.first() else {
            warn!("No video files found for video {}", video.id);
            continue;
        };

        let dest = videos_dir.join(format!("video_{}.mp4", video.id));
        match download_video(client, &file.link, &dest).await {
            Ok(()) => {
                info!("Download completed successfully.");
                saved.push(dest);
            }
            Err(err) => warn!("Error downloading video {}: {:#}", video.id, err),
        }
    }

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn deserializes_a_search_response() {
        let raw = r#"{
            "videos": [{
                "id": 857251,
                "url": "https://www.pexels.com/video/857251/",
                "user": {"name": "Jane Doe"},
                "video_files": [{"link": "https://cdn.example/clip.mp4"}]
            }]
        }"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.videos.len(), 1);
        assert_eq!(resp.videos[0].id, 857251);
        assert_eq!(resp.videos[0].user.name, "Jane Doe");
        assert_eq!(resp.videos[0].video_files[0].link, "https://cdn.example/clip.mp4");
    }

    #[test]
    fn missing_videos_field_is_an_empty_list() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.videos.is_empty());
    }

    #[tokio::test]
    async fn read_keywords_joins_nonempty_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.txt");
        let mut file = fs::File::create(&path).await.unwrap();
        file.write_all(b"ocean\n\n  sunset  \nwaves\n").await.unwrap();
        file.flush().await.unwrap();

        assert_eq!(read_keywords(&path).await.unwrap(), "ocean sunset waves");
    }

    #[tokio::test]
    async fn search_without_keys_makes_no_request() {
        let client = Client::new();
        let mut rng = StdRng::seed_from_u64(1);
        let err = search_videos(&client, &[], "anything", 1, &mut rng)
            .await
            .unwrap_err();
        let fetch_err = err.downcast_ref::<FetchError>().unwrap();
        assert!(matches!(fetch_err, FetchError::NoKeysConfigured));
        assert_eq!(fetch_err.to_string(), "no API keys configured");
    }
}
