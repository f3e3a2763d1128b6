//! Swell configuration.
//!
//! Config file lookup order:
//! 1. `$SWELL_CONFIG`
//! 2. `~/.config/swell/config.toml`
//! 3. `/etc/swell/config.toml`
//! 4. Defaults
//!
//! `SWELL_SCORER_URL` and `SWELL_SCORER_KIND` override the file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use swell_shared::{Focus, ShellPolicy};

use crate::http_scorer::{DEFAULT_SCORER_URL, DEFAULT_TIMEOUT_MS};
use crate::ollama::{DEFAULT_MODEL, GENERATE_TIMEOUT_MS, OLLAMA_DEFAULT_URL};

/// Which scorer the reward pipeline talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// JSON-over-HTTP scoring endpoint
    #[default]
    Http,
    /// Local Ollama chat model
    Ollama,
    /// No scorer; every scored claim gets the minimal reward
    Offline,
}

impl FromStr for ScorerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ScorerKind::Http),
            "ollama" => Ok(ScorerKind::Ollama),
            "offline" => Ok(ScorerKind::Offline),
            other => bail!("Unknown scorer kind '{}' (expected http, ollama or offline)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    #[serde(default)]
    pub kind: ScorerKind,

    /// Scoring endpoint for `kind = "http"`
    #[serde(default = "default_scorer_url")]
    pub url: String,

    #[serde(default = "default_scorer_timeout")]
    pub timeout_ms: u64,
}

fn default_scorer_url() -> String {
    DEFAULT_SCORER_URL.to_string()
}

fn default_scorer_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            kind: ScorerKind::default(),
            url: default_scorer_url(),
            timeout_ms: default_scorer_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,

    #[serde(default = "default_ollama_model")]
    pub model: String,

    #[serde(default = "default_ollama_timeout")]
    pub timeout_ms: u64,
}

fn default_ollama_url() -> String {
    OLLAMA_DEFAULT_URL.to_string()
}

fn default_ollama_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_ollama_timeout() -> u64 {
    GENERATE_TIMEOUT_MS
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_ollama_model(),
            timeout_ms: default_ollama_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default)]
    pub shell_policy: ShellPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Focus selected when a session starts
    #[serde(default)]
    pub focus: Focus,
}

/// Main Swell configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwellConfig {
    #[serde(default)]
    pub scorer: ScorerConfig,

    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default)]
    pub rewards: RewardsConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl SwellConfig {
    /// `~/.config/swell/config.toml`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("swell").join("config.toml"))
    }

    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/swell/config.toml")
    }

    /// Load from the first config file found, then apply env overrides.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os("SWELL_CONFIG").map(PathBuf::from);

        let mut config = if let Some(path) = explicit {
            Self::load_from(&path)?
        } else if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            Self::load_from(&path)?
        } else if Self::system_config_path().exists() {
            Self::load_from(&Self::system_config_path())?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `SWELL_*` overrides through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SWELL_SCORER_URL").filter(|v| !v.trim().is_empty()) {
            self.scorer.url = url;
        }
        if let Some(kind) = lookup("SWELL_SCORER_KIND").filter(|v| !v.trim().is_empty()) {
            self.scorer.kind = kind.parse().context("Invalid SWELL_SCORER_KIND")?;
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
