use serde::{Deserialize, Serialize};

use crate::catalog::BUILTIN_LAST_UPDATED;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    #[default]
    Neutral,
    Pending,
    Success,
    Error,
}

impl StatusTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTone::Neutral => "neutral",
            StatusTone::Pending => "pending",
            StatusTone::Success => "success",
            StatusTone::Error => "error",
        }
    }
}

/// Text for the four status regions the connector writes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    pub tone: StatusTone,
    pub status: String,
    pub source: String,
    pub last_updated: String,
    pub verification: String,
}

impl SourceStatus {
    pub fn builtin() -> Self {
        Self {
            tone: StatusTone::Neutral,
            status: "Showing built-in benchmark snapshot".to_string(),
            source: "Built-in catalog".to_string(),
            last_updated: BUILTIN_LAST_UPDATED.to_string(),
            verification: "Curated from published model cards".to_string(),
        }
    }

    /// Status while a fetch is outstanding. Other regions keep their text.
    pub fn connecting(&self, url: &str) -> Self {
        Self {
            tone: StatusTone::Pending,
            status: format!("Connecting to {}…", url),
            ..self.clone()
        }
    }

    pub fn connected(url: &str, models: usize, last_updated: &str, verification: &str) -> Self {
        Self {
            tone: StatusTone::Success,
            status: format!("Connected: loaded {} models from {}", models, url),
            source: url.to_string(),
            last_updated: last_updated.to_string(),
            verification: verification.to_string(),
        }
    }

    /// Failure only rewrites the status line; the displayed source stays authoritative
    pub fn failed(&self, url: &str, reason: &str) -> Self {
        Self {
            tone: StatusTone::Error,
            status: format!("Failed to connect to {}: {}", url, reason),
            ..self.clone()
        }
    }
}

impl Default for SourceStatus {
    fn default() -> Self {
        Self::builtin()
    }
}
