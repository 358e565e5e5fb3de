use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One evaluated model and its benchmark scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub name: String,
    pub provider: String,
    pub focus: String,
    pub tag: String,
    /// Free-text recency label, not a parsed date
    pub updated: String,
    pub benchmarks: BTreeMap<String, f64>,
    #[serde(default)]
    pub notes: String,
}

impl ModelRecord {
    pub fn score(&self, key: &str) -> Option<f64> {
        self.benchmarks.get(key).copied()
    }
}
