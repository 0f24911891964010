//! Configuration loading from TOML files

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for the evisearch server
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Origins echoed back by the CORS layer. `"null"` admits pages opened
    /// from `file://`.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8787,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "https://evisearch.pages.dev".to_string(),
                "null".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_requests: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Generate endpoint for the AI proxy routes. The API key always comes
    /// from the request, never from config.
    pub endpoint: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint:
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
                    .to_string(),
        }
    }
}

impl Config {
    /// Candidate config locations, most specific first: a workspace-local
    /// `evisearch.toml`, then the per-user config directory.
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("evisearch.toml")];
        if let Some(dirs) = directories::ProjectDirs::from("", "", "evisearch") {
            paths.push(dirs.config_dir().join("config.toml"));
        }
        paths
    }

    /// Pick up the first candidate file that exists; with none present the
    /// built-in defaults apply.
    pub fn load() -> Result<Self> {
        match Self::candidate_paths().iter().find(|p| p.exists()) {
            Some(path) => Self::from_file(path),
            None => {
                log::debug!("running on default config, no file found");
                Ok(Self::default())
            }
        }
    }

    /// Parse one specific TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("config file {} is unreadable", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("config file {} is not valid TOML", path.display()))?;
        log::info!("config: {}", path.display());
        Ok(config)
    }
}
