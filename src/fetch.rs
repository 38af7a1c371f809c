use crate::errors::{AttemptError, FetchError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

pub fn now_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Partially redacts an API key so it is safe to log.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Returns a shuffled copy of the key list. The caller owns the RNG so
/// shuffle order is reproducible in tests.
pub fn shuffled_keys<R: Rng>(keys: &[String], rng: &mut R) -> Result<Vec<String>, FetchError> {
    if keys.is_empty() {
        return Err(FetchError::NoKeysConfigured);
    }
    let mut shuffled = keys.to_vec();
    shuffled.shuffle(rng);
    Ok(shuffled)
}

/// Runs `attempt` with each key in order until one succeeds. Per-attempt
/// failures are suppressed; only the last one survives into the final error.
pub async fn try_each_key<T, F, Fut>(keys: &[String], mut attempt: F) -> Result<T, FetchError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut last: Option<AttemptError> = None;

    for (i, key) in keys.iter().enumerate() {
        info!("Trying API key {}: {}", i + 1, mask_key(key));

        match attempt(key.clone()).await {
            Ok(value) => {
                info!("Successfully connected using API key {}", i + 1);
                return Ok(value);
            }
            Err(err) => {
                warn!("API key {} failed: {}", i + 1, err);
                last = Some(err);
            }
        }
    }

    match last {
        Some(last) => Err(FetchError::AllKeysFailed { last }),
        None => Err(FetchError::NoKeysConfigured),
    }
}
