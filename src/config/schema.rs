//! TOML configuration for the dashboard core.

use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::teams::{StaticTeamRegistry, Team};

/// Top-level configuration, loaded from `config.toml`.
///
/// Resolution order: explicit path → `FUNDINGDESK_CONFIG` env →
/// `~/.fundingdesk/config.toml` → built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was loaded from - computed, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Chat and reply-simulation settings (`[chat]`).
    #[serde(default)]
    pub chat: ChatConfig,

    /// Analytics table settings (`[analytics]`).
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Team roster (`[[teams]]`). Defaults to the shipped Alpha/Beta/Gamma set.
    #[serde(default = "default_teams")]
    pub teams: Vec<Team>,
}

/// Chat settings (`[chat]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulated reply latency in milliseconds. Default: `1500`.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Characters of the first user message kept in the derived session
    /// title. Default: `30`.
    #[serde(default = "default_title_preview_chars")]
    pub title_preview_chars: usize,
    /// Fixed RNG seed for reply selection. Unset means OS entropy.
    #[serde(default)]
    pub reply_seed: Option<u64>,
}

/// Analytics settings (`[analytics]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Rows per analytics page. Default: `5`.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_reply_delay_ms() -> u64 {
    1500
}

fn default_title_preview_chars() -> usize {
    30
}

fn default_page_size() -> usize {
    5
}

fn default_teams() -> Vec<Team> {
    StaticTeamRegistry::default_teams()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            title_preview_chars: default_title_preview_chars(),
            reply_seed: None,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            chat: ChatConfig::default(),
            analytics: AnalyticsConfig::default(),
            teams: default_teams(),
        }
    }
}

impl Config {
    /// Default config file location: `FUNDINGDESK_CONFIG` env override, else
    /// `~/.fundingdesk/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("FUNDINGDESK_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = UserDirs::new().context("could not resolve the home directory")?;
        Ok(dirs.home_dir().join(".fundingdesk").join("config.toml"))
    }

    /// Load configuration, falling back to defaults when no file exists.
    pub async fn load(path_override: Option<&Path>) -> Result<Self> {
        let path = match path_override {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => toml::from_str::<Config>(&raw)
                .with_context(|| format!("invalid config at {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(e).with_context(|| format!("could not read {}", path.display()))
            }
        };
        config.config_path = path;
        Ok(config)
    }

    /// Write the configuration back to its path, creating parent directories.
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("could not serialize config")?;
        tokio::fs::write(&self.config_path, raw)
            .await
            .with_context(|| format!("could not write {}", self.config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_the_shipped_constants() {
        let config = Config::default();
        assert_eq!(config.chat.reply_delay_ms, 1500);
        assert_eq!(config.chat.title_preview_chars, 30);
        assert_eq!(config.chat.reply_seed, None);
        assert_eq!(config.analytics.page_size, 5);
        assert_eq!(config.teams.len(), 3);
        assert_eq!(config.teams[0].name, "Team Alpha");
    }

    #[tokio::test]
    async fn load_missing_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        let config = Config::load(Some(&path)).await.unwrap();
        assert_eq!(config.analytics.page_size, 5);
        assert_eq!(config.config_path, path);
    }

    #[tokio::test]
    async fn load_reads_partial_toml_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[chat]\nreply_delay_ms = 10\nreply_seed = 7\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).await.unwrap();
        assert_eq!(config.chat.reply_delay_ms, 10);
        assert_eq!(config.chat.reply_seed, Some(7));
        // Untouched sections keep their defaults.
        assert_eq!(config.chat.title_preview_chars, 30);
        assert_eq!(config.analytics.page_size, 5);
        assert_eq!(config.teams.len(), 3);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.config_path = path.clone();
        config.analytics.page_size = 9;
        config.save().await.unwrap();

        let back = Config::load(Some(&path)).await.unwrap();
        assert_eq!(back.analytics.page_size, 9);
        assert_eq!(back.teams.len(), 3);
    }

    #[tokio::test]
    async fn invalid_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "not valid [ toml").unwrap();

        let err = Config::load(Some(&path)).await.unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
