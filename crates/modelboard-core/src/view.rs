use std::fmt;

use serde::{Deserialize, Serialize};

use crate::benchmark::{self, BenchmarkDefinition, Category, BENCHMARKS, DEFAULT_SORT_KEY};

pub const FILTER_ALL: &str = "all";

/// Which benchmark rows a card shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Filter {
    #[default]
    All,
    Category(Category),
    /// Any other value. Selects no benchmarks at all.
    Unrecognized(String),
}

impl Filter {
    /// Never fails; unknown values are kept as `Unrecognized`
    pub fn parse(raw: &str) -> Self {
        if raw == FILTER_ALL {
            return Filter::All;
        }
        match raw.parse::<Category>() {
            Ok(c) => Filter::Category(c),
            Err(_) => Filter::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => FILTER_ALL,
            Filter::Category(c) => c.as_str(),
            Filter::Unrecognized(raw) => raw,
        }
    }

    pub fn matches(&self, def: &BenchmarkDefinition) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(c) => def.category == *c,
            Filter::Unrecognized(_) => false,
        }
    }

    /// Definitions selected by this filter, in declaration order
    pub fn definitions(&self) -> Vec<&'static BenchmarkDefinition> {
        BENCHMARKS.iter().filter(|d| self.matches(d)).collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Filter {
    fn from(raw: String) -> Self {
        Filter::parse(&raw)
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.as_str().to_string()
    }
}

/// Current filter and sort selection. Never touches the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub filter: Filter,
    sort: &'static str,
}

impl ViewState {
    pub fn new(filter: Filter, sort: &str) -> crate::Result<Self> {
        let mut view = Self {
            filter,
            ..Default::default()
        };
        view.set_sort(sort)?;
        Ok(view)
    }

    pub fn sort(&self) -> &'static str {
        self.sort
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Only the four known keys are accepted
    pub fn set_sort(&mut self, key: &str) -> crate::Result<()> {
        let def = benchmark::find(key)
            .ok_or_else(|| crate::ModelboardError::UnknownBenchmark(key.to_string()))?;
        self.sort = def.key;
        Ok(())
    }

    pub fn sort_definition(&self) -> &'static BenchmarkDefinition {
        benchmark::find(self.sort).unwrap_or(&BENCHMARKS[0])
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: Filter::All,
            sort: DEFAULT_SORT_KEY,
        }
    }
}
