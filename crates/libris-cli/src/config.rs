use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Optional user configuration read from `config.toml`.
///
/// Every section and key may be omitted.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LibrisConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub loans: LoansSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoansSection {
    pub default_days: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UiSection {
    pub color: Option<bool>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<LibrisConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    parse_config(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

fn parse_config(contents: &str) -> Result<LibrisConfig, toml::de::Error> {
    toml::from_str(contents)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("libris"));
        }
    }
    Ok(home_dir()?.join(".config").join("libris"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("libris"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("libris"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
