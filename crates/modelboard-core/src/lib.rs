// Domain modules
pub mod benchmark;
pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod status;
pub mod validate;
pub mod view;

pub use benchmark::{BenchmarkDefinition, Category, BENCHMARKS, DEFAULT_SORT_KEY};
pub use board::Board;
pub use catalog::Catalog;
pub use config::{ModelboardConfig, SourceConfig, StorageConfig, ViewConfig};
pub use error::{ModelboardError, Result};
pub use model::ModelRecord;
pub use render::{format_score, render, score_class, CardDescriptor, MetricView, ScoreClass};
pub use status::{SourceStatus, StatusTone};
pub use validate::{parse_payload, validate_record, SourcePayload, ValidationError};
pub use view::{Filter, ViewState};
