use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Filter, ModelboardError, Result, ViewState};

pub const ENV_TIMEOUT_SECS: &str = "MODELBOARD_TIMEOUT_SECS";
pub const ENV_DB_PATH: &str = "MODELBOARD_DB_PATH";
pub const ENV_SOURCE_URL: &str = "MODELBOARD_SOURCE_URL";
pub const ENV_AUTO_RECONNECT: &str = "MODELBOARD_AUTO_RECONNECT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelboardConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub timeout_secs: u64,
    pub auto_reconnect: bool,
    #[serde(default)]
    pub default_url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 8,
            auto_reconnect: true,
            default_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    pub filter: String,
    pub sort: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            sort: "mmlu".to_string(),
        }
    }
}

impl ViewConfig {
    pub fn view_state(&self) -> Result<ViewState> {
        ViewState::new(Filter::parse(&self.filter), &self.sort)
    }
}

impl ModelboardConfig {
    /// Read an optional JSON file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                serde_json::from_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides from any key lookup, so tests need not touch the process env
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.source.timeout_secs = raw.trim().parse().map_err(|_| {
                ModelboardError::Config(format!("{} must be a whole number, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_AUTO_RECONNECT) {
            self.source.auto_reconnect = match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ModelboardError::Config(format!(
                        "{} must be true or false, got '{}'",
                        ENV_AUTO_RECONNECT, raw
                    )))
                }
            };
        }
        if let Some(url) = lookup(ENV_SOURCE_URL).filter(|u| !u.trim().is_empty()) {
            self.source.default_url = Some(url);
        }
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            self.storage.db_path = Some(PathBuf::from(path));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ModelboardConfig::default();
        assert_eq!(config.source.timeout_secs, 8);
        assert!(config.source.auto_reconnect);
        assert_eq!(config.view.view_state().unwrap(), ViewState::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ModelboardConfig =
            serde_json::from_str(r#"{"view": {"filter": "coding", "sort": "humaneval"}}"#).unwrap();
        assert_eq!(config.source.timeout_secs, 8);
        assert_eq!(config.view.view_state().unwrap().sort(), "humaneval");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_AUTO_RECONNECT, "off"),
            (ENV_DB_PATH, "/tmp/mb.db"),
        ]
        .into_iter()
        .collect();

        let mut config = ModelboardConfig::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.source.timeout_secs, 3);
        assert!(!config.source.auto_reconnect);
        assert_eq!(config.storage.db_path, Some(PathBuf::from("/tmp/mb.db")));
        assert_eq!(config.source.default_url, None);
    }

    #[test]
    fn test_bad_env_value_is_config_error() {
        let mut config = ModelboardConfig::default();
        let err = config
            .apply_env(|k| (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ModelboardError::Config(_)));
    }
}
