use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::filter::CATEGORY_LIMIT;
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub trending: TrendingConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the station list comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// radio-browser mirror, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Fixed allow-list of station names shown under Trending.
/// Matched against the directory's display name exactly, case included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingConfig {
    #[serde(default = "default_trending_names")]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Explicit mpv binary; falls back to beside-exe then PATH lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpv_path: Option<PathBuf>,
    #[serde(default = "default_volume")]
    pub default_volume: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_category_limit")]
    pub category_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            country: default_country(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            names: default_trending_names(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mpv_path: None,
            default_volume: default_volume(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            category_limit: default_category_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://de1.api.radio-browser.info".to_string()
}

fn default_country() -> String {
    "india".to_string()
}

fn default_limit() -> u32 {
    1200
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_user_agent() -> String {
    format!("radiogrid/{}", env!("CARGO_PKG_VERSION"))
}

fn default_volume() -> f32 {
    0.7
}

fn default_category_limit() -> usize {
    CATEGORY_LIMIT
}

fn default_trending_names() -> Vec<String> {
    [
        "Radio Mirchi Hindi",
        "Radio SD 90.8 FM",
        "Bollywood Gaane Purane",
        "Bollywood 2000",
        "Radio City 91.1 FM",
        "Radio BollyFm",
        "Radio Maharani",
        "Radio City Hindi",
        "Ishq Fm",
        "Fnf.Fm Hindi",
        "Radio Aashiqanaa",
        "Hindi Retro",
        "MY CLUB REMIX",
        "Radio Udaan",
        "Suno Sharda - 90.8FM",
        "Goldy Evergreen",
        "Bollyhitsradio",
        "Chillax FM",
        "Bollywood Punjabi Radio",
        "Mirchi Love",
        "Sudarshan News",
        "Bollywood 2010",
        "Hindi Gold Radio",
        "Sandesh Radio",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.directory.country, "india");
        assert_eq!(config.directory.limit, 1200);
        assert!(config.directory.base_url.starts_with("https://"));
        assert_eq!(config.trending.names.len(), 24);
        assert!(config
            .trending
            .names
            .iter()
            .any(|n| n == "Radio City Hindi"));
        assert_eq!(config.ui.category_limit, 15);
        assert!(Config::config_path().ends_with("radiogrid/config.toml"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [directory]
            country = "germany"
            limit = 50

            [trending]
            names = ["Only This"]
            "#,
        )
        .unwrap();
        assert_eq!(config.directory.country, "germany");
        assert_eq!(config.directory.limit, 50);
        assert_eq!(config.directory.timeout_secs, 20);
        assert_eq!(config.trending.names, vec!["Only This".to_string()]);
        assert!((config.player.default_volume - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back.trending.names, config.trending.names);
        assert_eq!(back.directory.base_url, config.directory.base_url);
    }
}
