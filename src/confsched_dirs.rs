//! Application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data (cached schedule, stars) | `~/Library/Application Support/confsched/` | `~/.local/share/confsched/` |
//! | Config | `~/Library/Application Support/confsched/` | `~/.config/confsched/` |
//!
//! # Environment Overrides
//!
//! - `CONFSCHED_DATA_DIR`: overrides [`data_dir`]
//! - `CONFSCHED_CONFIG_DIR`: overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the persisted schedule snapshot and the star set.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CONFSCHED_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("confsched"))
        .unwrap_or_else(|| PathBuf::from("/tmp/confsched-data"))
}

/// Application config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CONFSCHED_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("confsched"))
        .unwrap_or_else(|| PathBuf::from("/tmp/confsched-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name_or_override() {
        let dir = data_dir();
        if std::env::var_os("CONFSCHED_DATA_DIR").is_none() {
            assert!(dir.ends_with("confsched") || dir.ends_with("confsched-data"));
        }
    }

    #[test]
    fn config_file_lives_in_config_dir() {
        assert_eq!(config_file().parent(), Some(config_dir().as_path()));
        assert!(config_file().ends_with("config.toml"));
    }
}
