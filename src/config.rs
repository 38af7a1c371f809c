use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Keys recognized in config.toml. Field names on the wire match the
/// original config files users already have.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "deepseekapikey", default)]
    pub deepseek_api_key: String,
    #[serde(rename = "plexelsapikeys", default)]
    pub pexels_api_keys: Vec<String>,
}

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to decode config: {}", path.as_ref().display()))?;
        Ok(config)
    }
}

/// Resolution order: explicit path, then ./config.toml, then the per-user
/// config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default.exists() {
        return default;
    }

    if let Some(base) = dirs::config_dir() {
        let alt = base.join("shortgen").join(DEFAULT_CONFIG_FILE);
        if alt.exists() {
            return alt;
        }
    }

    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_field_names() {
        let raw = r#"
            deepseekapikey = "sk-test"
            plexelsapikeys = ["key-one", "key-two"]
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.deepseek_api_key, "sk-test");
        assert_eq!(config.pexels_api_keys, vec!["key-one", "key-two"]);
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.deepseek_api_key.is_empty());
        assert!(config.pexels_api_keys.is_empty());
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/custom.toml");
        assert_eq!(resolve_config_path(Some(&explicit)), explicit);
    }

    #[tokio::test]
    async fn load_reports_the_missing_path() {
        let err = Config::load("/nonexistent/config.toml").await.unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/config.toml"));
    }
}
