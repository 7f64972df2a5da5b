use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Margin kept around the viewport: a fraction of the visible span,
/// capped at an absolute distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub buffer_fraction: f64,
    pub buffer_cap: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            buffer_fraction: 0.1,
            buffer_cap: 100.0,
        }
    }
}

/// Tunables consumed by the reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    pub buffer_fraction: f64,
    pub buffer_cap: f64,
    /// Cap on real-valued points kept across the whole visible series.
    pub budget: usize,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        let window = WindowConfig::default();
        Self {
            buffer_fraction: window.buffer_fraction,
            buffer_cap: window.buffer_cap,
            budget: 4000,
        }
    }
}

impl ReduceConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.buffer_fraction.is_finite() || self.buffer_fraction < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "buffer_fraction must be finite and non-negative, got {}",
                self.buffer_fraction
            )));
        }
        if !self.buffer_cap.is_finite() || self.buffer_cap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "buffer_cap must be finite and non-negative, got {}",
                self.buffer_cap
            )));
        }
        if self.budget == 0 {
            return Err(ConfigError::Invalid("budget must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn window(&self) -> WindowConfig {
        WindowConfig {
            buffer_fraction: self.buffer_fraction,
            buffer_cap: self.buffer_cap,
        }
    }
}

/// Where the ingestion layer finds a channel's files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// How many of the most recent files are read per channel.
    pub files_per_channel: usize,
    /// Channel id to directory name under the data root.
    pub channels: BTreeMap<String, String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        let channels = (1..=3)
            .map(|ch| (ch.to_string(), format!("Fibra_Espesador_ch{ch}")))
            .collect();
        Self {
            files_per_channel: 17,
            channels,
        }
    }
}

impl LoaderConfig {
    pub fn channel_dir(&self, channel: &str) -> Option<&str> {
        self.channels.get(channel).map(String::as_str)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ReduceConfig = serde_json::from_str(r#"{"budget": 2500}"#).unwrap();
        assert_eq!(config.budget, 2500);
        assert_eq!(config.window(), WindowConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let config = ReduceConfig {
            budget: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn negative_cap_is_rejected() {
        let config = ReduceConfig {
            buffer_cap: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unparsable_file_reports_path() {
        let path = std::env::temp_dir().join(format!("fiberview-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ budget: ").unwrap();
        let err = ReduceConfig::from_json_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("cannot parse config "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_message() {
        let err = ReduceConfig {
            budget: 0,
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid config: budget must be at least 1");
    }

    #[test]
    fn default_channels() {
        let loader = LoaderConfig::default();
        assert_eq!(loader.channel_dir("2"), Some("Fibra_Espesador_ch2"));
        assert_eq!(loader.channel_dir("9"), None);
        assert_eq!(loader.files_per_channel, 17);
    }
}
