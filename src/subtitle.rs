use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

const WORDS_PER_MINUTE: f64 = 150.0;
const CHARS_PER_WORD: f64 = 5.0;
const MIN_CUE_SECONDS: f64 = 1.0;

/// One timed subtitle entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Splits text on `". "`, `"! "` and `"? "` boundaries. Deliberately naive:
/// abbreviations and decimals are not special-cased, timing downstream is an
/// estimate anyway.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let marked = text
        .replace(". ", ".|")
        .replace("! ", "!|")
        .replace("? ", "?|");

    marked
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Estimates how long a sentence takes to read aloud, floored at one second.
pub fn estimate_duration_seconds(sentence: &str) -> f64 {
    let word_count = sentence.chars().count() as f64 / CHARS_PER_WORD;
    let duration = (word_count / WORDS_PER_MINUTE) * 60.0;
    if duration < MIN_CUE_SECONDS {
        MIN_CUE_SECONDS
    } else {
        duration
    }
}

/// Assigns contiguous timings: each cue starts where the previous one ended.
pub fn build_cues(sentences: &[String]) -> Vec<Cue> {
    let mut cues = Vec::with_capacity(sentences.len());
    let mut clock = 0.0;

    for (i, sentence) in sentences.iter().enumerate() {
        let duration = estimate_duration_seconds(sentence);
        let end = clock + duration;
        cues.push(Cue {
            index: i + 1,
            start: clock,
            end,
            text: sentence.clone(),
        });
        clock = end;
    }

    cues
}

/// Formats seconds as `HH:MM:SS,mmm` with truncation semantics.
pub fn format_srt_time(seconds: f64) -> String {
    let whole = seconds as i64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    let millis = ((seconds - whole as f64) * 1000.0) as i64;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

pub fn render_srt(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&format!("{}\n", cue.index));
        out.push_str(&format!(
            "{} --> {}\n",
            format_srt_time(cue.start),
            format_srt_time(cue.end)
        ));
        out.push_str(&format!("{}\n\n", cue.text));
    }
    out
}

pub async fn write_srt(sentences: &[String], path: &Path) -> Result<()> {
    if sentences.is_empty() {
        anyhow::bail!("no valid text to process");
    }

    let cues = build_cues(sentences);
    let mut file = fs::File::create(path)
        .await
        .with_context(|| format!("create srt: {}", path.display()))?;
    file.write_all(render_srt(&cues).as_bytes()).await?;
    file.flush().await.ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminator_followed_by_space() {
        let sentences = split_into_sentences("Hello world. This is great! Are you sure?");
        assert_eq!(
            sentences,
            vec!["Hello world.", "This is great!", "Are you sure?"]
        );
    }

    #[test]
    fn splitting_discards_empty_units() {
        assert!(split_into_sentences("").is_empty());
        assert!(split_into_sentences("   ").is_empty());
        assert_eq!(split_into_sentences(". . "), vec![".", "."]);
    }

    #[test]
    fn splitting_does_not_break_without_trailing_space() {
        let sentences = split_into_sentences("One.Two. Three");
        assert_eq!(sentences, vec!["One.Two.", "Three"]);
    }

    #[test]
    fn duration_follows_reading_rate() {
        // 25 chars -> 5 estimated words -> (5/150)*60 = 2.0s
        let sentence = "a".repeat(25);
        assert_eq!(estimate_duration_seconds(&sentence), 2.0);
    }

    #[test]
    fn duration_is_clamped_to_one_second() {
        assert_eq!(estimate_duration_seconds("Hi."), 1.0);
    }

    #[test]
    fn cues_are_contiguous() {
        let sentences: Vec<String> = vec![
            "a".repeat(25),
            "Hi.".to_string(),
            "b".repeat(50),
        ];
        let cues = build_cues(&sentences);
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].start, 0.0);
        for pair in cues.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(cues[0].index, 1);
        assert_eq!(cues[2].index, 3);
    }

    #[test]
    fn srt_time_formatting() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(3661.5), "01:01:01,500");
        assert_eq!(format_srt_time(90.25), "00:01:30,250");
    }

    #[test]
    fn renders_numbered_blocks_with_blank_separators() {
        let sentences = vec!["a".repeat(25), "Hi.".to_string()];
        let srt = render_srt(&build_cues(&sentences));
        let expected = format!(
            "1\n00:00:00,000 --> 00:00:02,000\n{}\n\n2\n00:00:02,000 --> 00:00:03,000\nHi.\n\n",
            "a".repeat(25)
        );
        assert_eq!(srt, expected);
    }

    #[tokio::test]
    async fn write_srt_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.srt");
        let err = write_srt(&[], &path).await.unwrap_err();
        assert!(err.to_string().contains("no valid text to process"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_srt_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.srt");
        let sentences = vec!["Hello world.".to_string()];
        write_srt(&sentences, &path).await.unwrap();
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.starts_with("1\n00:00:00,000 --> "));
        assert!(content.contains("Hello world."));
    }
}
