use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Filterable grouping of benchmarks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Coding,
    Multimodal,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Coding => "coding",
            Category::Multimodal => "multimodal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Coding => "Coding",
            Category::Multimodal => "Multimodal",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Category::General, Category::Coding, Category::Multimodal]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// A fixed benchmark metric shown on every card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub category: Category,
}

pub const BENCHMARKS: [BenchmarkDefinition; 4] = [
    BenchmarkDefinition {
        key: "mmlu",
        label: "MMLU",
        category: Category::General,
    },
    BenchmarkDefinition {
        key: "gpqa",
        label: "GPQA Diamond",
        category: Category::General,
    },
    BenchmarkDefinition {
        key: "humaneval",
        label: "HumanEval",
        category: Category::Coding,
    },
    BenchmarkDefinition {
        key: "mmmu",
        label: "MMMU",
        category: Category::Multimodal,
    },
];

pub const DEFAULT_SORT_KEY: &str = "mmlu";

/// Look up a definition by its benchmark key
pub fn find(key: &str) -> Option<&'static BenchmarkDefinition> {
    BENCHMARKS.iter().find(|b| b.key == key)
}

pub fn keys() -> impl Iterator<Item = &'static str> {
    BENCHMARKS.iter().map(|b| b.key)
}
