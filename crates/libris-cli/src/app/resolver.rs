//! Path resolution for the config file and the data directory.

use std::path::{Path, PathBuf};

use crate::config::{default_config_path, default_data_dir, read_config, LibrisConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking LIBRIS_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, or defaults when it does not exist.
pub fn load_config() -> anyhow::Result<LibrisConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Ok(LibrisConfig::default());
    }
    read_config(&path)
}

/// Pick the data directory: explicit flag or env, then config, then XDG.
pub fn resolve_data_dir(explicit: Option<&Path>, config: &LibrisConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = config.storage.data_dir.as_deref() {
        if !dir.trim().is_empty() {
            return Ok(expand_home(dir));
        }
    }
    default_data_dir()
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageSection;

    fn config_with_dir(dir: &str) -> LibrisConfig {
        LibrisConfig {
            storage: StorageSection {
                data_dir: Some(dir.to_string()),
            },
            ..LibrisConfig::default()
        }
    }

    #[test]
    fn test_explicit_dir_wins() {
        let config = config_with_dir("/from/config");
        let dir = resolve_data_dir(Some(Path::new("/from/flag")), &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_config_dir_used_without_flag() {
        let config = config_with_dir("/from/config");
        let dir = resolve_data_dir(None, &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));
    }

    #[test]
    fn test_absolute_path_is_not_expanded() {
        assert_eq!(expand_home("/srv/lib"), PathBuf::from("/srv/lib"));
    }
}
