//! TOML-based application configuration.
//!
//! Stores the focus/break timer durations and the driver poll interval.
//! Configuration is stored at `~/.config/studyquest/config.toml`; a missing
//! file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::timer::Cycle;

fn default_focus_secs() -> u64 {
    25 * 60
}

fn default_break_secs() -> u64 {
    5 * 60
}

fn default_poll_ms() -> u64 {
    200
}

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u64,
    #[serde(default = "default_break_secs")]
    pub break_secs: u64,
    /// How often the blocking driver wakes to tick the engine.
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

impl TimerConfig {
    pub fn cycle(&self) -> Cycle {
        Cycle::new(self.focus_secs, self.break_secs)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            break_secs: default_break_secs(),
            poll_ms: default_poll_ms(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyquest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// `~/.config/studyquest/config.toml`, when a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("studyquest").join("config.toml"))
    }

    /// Load from the default location; no config dir yields the defaults.
    pub fn load_default() -> Result<Config> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Config::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::io::Write as _;

    #[test]
    fn defaults_match_production_cycle() {
        let config = Config::default();
        assert_eq!(config.timer.focus_secs, 1500);
        assert_eq!(config.timer.break_secs, 300);
        assert_eq!(config.timer.poll_ms, 200);
        assert_eq!(config.timer.cycle(), Cycle::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.timer.focus_secs, 1500);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[timer]").unwrap();
        writeln!(file, "focus_secs = 3").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.timer.focus_secs, 3);
        assert_eq!(config.timer.break_secs, 300);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = 'not a table'").unwrap();

        match Config::load(&path) {
            Err(CoreError::Config(ConfigError::ParseFailed(_))) => {}
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }
}
