//! Game configuration.
//!
//! [`GameConfig`] is plain data deserialized from JSON. Every field has a
//! default, so a config file only needs the values it changes:
//!
//! ```json
//! { "title": "Rocket", "screen_width": 1024 }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors from reading a config file.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config '{}': {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

/// Window and frame-loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    /// Logical screen size in pixels.
    pub screen_width: u32,
    pub screen_height: u32,
    /// Minimum wall time between frames.
    pub min_frame_ms: u64,
    /// Upper bound on a single simulation step, in seconds.
    pub max_delta_secs: f32,
}

impl GameConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn min_frame(&self) -> Duration {
        Duration::from_millis(self.min_frame_ms)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: String::from("troupe"),
            screen_width: 1280,
            screen_height: 720,
            min_frame_ms: 16,
            max_delta_secs: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{ "title": "Rocket", "screen_width": 1024 }"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.title, "Rocket");
        assert_eq!(config.screen_width, 1024);
        assert_eq!(config.screen_height, 720);
        assert_eq!(config.min_frame(), Duration::from_millis(16));
        assert_eq!(config.max_delta_secs, 0.05);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, "{ screen_width: ").unwrap();
        let err = GameConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("game.json"));
    }
}
