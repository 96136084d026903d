//! Polling configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cache::MIN_POLL_INTERVAL;

/// Polling configuration, loaded from `polling.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Draw weight per source name. Empty = always the default source.
    #[serde(default)]
    pub source_weights: BTreeMap<String, u32>,
    /// Bounded perturbation applied to returned quotes, for test setups
    /// where independently running nodes should disagree slightly. 0 = off.
    #[serde(default)]
    pub randomize: f64,
    /// Seconds between source queries.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: i64,
}

fn default_poll_interval() -> i64 {
    MIN_POLL_INTERVAL
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            source_weights: BTreeMap::new(),
            randomize: 0.0,
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl PollingConfig {
    /// Load configuration from the default config file location.
    ///
    /// Falls back to defaults if the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Config file path: `$PRISM_DATA_DIR/polling.toml` when the override
    /// is set, `~/.prism/polling.toml` otherwise.
    fn config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("PRISM_DATA_DIR") {
            return PathBuf::from(dir).join("polling.toml");
        }
        std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".prism").join("polling.toml"))
            .unwrap_or_else(|_| PathBuf::from("/tmp/prism/polling.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PollingConfig::default();
        assert!(config.source_weights.is_empty());
        assert_eq!(config.randomize, 0.0);
        assert_eq!(config.poll_interval_secs, MIN_POLL_INTERVAL);
    }

    #[test]
    fn test_parse_from_toml() {
        let config: PollingConfig = toml::from_str(
            r#"
            randomize = 0.05
            poll_interval_secs = 300

            [source_weights]
            CoinCap = 3
            "#,
        )
        .expect("parse");
        assert_eq!(config.randomize, 0.05);
        assert_eq!(config.poll_interval_secs, 300);
        assert_eq!(config.source_weights["CoinCap"], 3);
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config: PollingConfig = toml::from_str("randomize = 0.1").expect("parse");
        assert_eq!(config.poll_interval_secs, MIN_POLL_INTERVAL);
        assert!(config.source_weights.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = PollingConfig::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        let _parsed: PollingConfig = toml::from_str(&toml_str).expect("parse");
    }
}
