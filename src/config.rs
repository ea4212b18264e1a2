use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub on_invalid_file: InvalidFilePolicy,
}

fn default_resources_dir() -> PathBuf { PathBuf::from("./resources") }
fn default_language() -> String { "auto".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            resources_dir: default_resources_dir(),
            language: default_language(),
            on_invalid_file: InvalidFilePolicy::default(),
        }
    }
}

/// What the loader does with a JSON file it cannot use.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvalidFilePolicy {
    /// Warn and keep loading the remaining files.
    #[default]
    Skip,
    /// Fail the whole load on the first bad file.
    Abort,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_fallback_width")]
    pub fallback_width: usize,
}

fn default_fallback_width() -> usize { 80 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fallback_width: default_fallback_width(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("org", "favorites", "favorites")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path(),
    };

    if !config_path.exists() {
        // An explicit path that does not exist is a user error; the default one is optional.
        if path.is_some() {
            anyhow::bail!("config file {:?} does not exist", config_path);
        }
        log::debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {:?}", config_path))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("failed to parse {:?}", config_path))?;
    Ok(config)
}
