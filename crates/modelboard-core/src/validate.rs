//! Remote payload parsing and per-record validation
//!
//! Expected shape:
//! `{ "models": [ {name, provider, focus, tag, updated, benchmarks, notes}, ... ],
//!    "lastUpdated": "...", "sourceCheck": "..." }`
//!
//! Records failing validation are dropped silently; only an empty result is an error.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{benchmark, ModelRecord};

pub const REQUIRED_FIELDS: [&str; 5] = ["name", "provider", "focus", "tag", "updated"];

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload has no \"models\" list")]
    MissingModels,

    #[error("\"models\" is not a list")]
    ModelsNotArray,

    #[error("no valid models in payload ({rejected} rejected)")]
    NoValidModels { rejected: usize },
}

/// A payload that passed validation: at least one record
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePayload {
    pub models: Vec<ModelRecord>,
    pub rejected: usize,
    pub last_updated: Option<String>,
    pub source_check: Option<String>,
}

pub fn parse_payload(body: &str) -> Result<SourcePayload, ValidationError> {
    let value: Value = serde_json::from_str(body)?;
    validate_payload(&value)
}

pub fn validate_payload(value: &Value) -> Result<SourcePayload, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;
    let candidates = obj
        .get("models")
        .ok_or(ValidationError::MissingModels)?
        .as_array()
        .ok_or(ValidationError::ModelsNotArray)?;

    let models: Vec<ModelRecord> = candidates.iter().filter_map(validate_record).collect();
    let rejected = candidates.len() - models.len();

    if rejected > 0 {
        tracing::warn!("Dropped {} of {} remote records", rejected, candidates.len());
    }
    if models.is_empty() {
        return Err(ValidationError::NoValidModels { rejected });
    }

    Ok(SourcePayload {
        models,
        rejected,
        last_updated: optional_string(obj, "lastUpdated"),
        source_check: optional_string(obj, "sourceCheck"),
    })
}

/// Returns `None` for anything that is not a complete record
pub fn validate_record(value: &Value) -> Option<ModelRecord> {
    let obj = value.as_object()?;

    let mut fields = REQUIRED_FIELDS.iter().map(|f| obj.get(*f)?.as_str());
    let (name, provider, focus, tag, updated) = (
        fields.next()??,
        fields.next()??,
        fields.next()??,
        fields.next()??,
        fields.next()??,
    );
    if name.trim().is_empty() {
        return None;
    }

    let scores = obj.get("benchmarks")?.as_object()?;
    let mut benchmarks = BTreeMap::new();
    for key in benchmark::keys() {
        let score = scores.get(key)?.as_f64()?;
        benchmarks.insert(key.to_string(), score);
    }

    Some(ModelRecord {
        name: name.to_string(),
        provider: provider.to_string(),
        focus: focus.to_string(),
        tag: tag.to_string(),
        updated: updated.to_string(),
        benchmarks,
        notes: obj
            .get("notes")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record(name: &str) -> Value {
        json!({
            "name": name,
            "provider": "Lab",
            "focus": "general",
            "tag": "new",
            "updated": "Oct 2024",
            "benchmarks": { "mmlu": 81.5, "gpqa": 40, "humaneval": 77.25, "mmmu": 52.0 },
            "notes": "fine"
        })
    }

    #[test]
    fn test_complete_record_passes() {
        let record = validate_record(&full_record("m1")).unwrap();
        assert_eq!(record.name, "m1");
        assert_eq!(record.score("gpqa"), Some(40.0));
        assert_eq!(record.notes, "fine");
    }

    #[test]
    fn test_notes_are_optional() {
        let mut value = full_record("m1");
        value.as_object_mut().unwrap().remove("notes");
        assert_eq!(validate_record(&value).unwrap().notes, "");
    }

    #[test]
    fn test_partial_records_rejected() {
        let mut missing_gpqa = full_record("m1");
        missing_gpqa["benchmarks"]
            .as_object_mut()
            .unwrap()
            .remove("gpqa");
        assert!(validate_record(&missing_gpqa).is_none());

        let mut string_score = full_record("m2");
        string_score["benchmarks"]["mmlu"] = json!("81.5");
        assert!(validate_record(&string_score).is_none());

        let mut no_tag = full_record("m3");
        no_tag.as_object_mut().unwrap().remove("tag");
        assert!(validate_record(&no_tag).is_none());

        let mut no_benchmarks = full_record("m4");
        no_benchmarks["benchmarks"] = json!([81.5, 40, 77.25, 52.0]);
        assert!(validate_record(&no_benchmarks).is_none());

        assert!(validate_record(&json!("GPT-4o")).is_none());
    }

    #[test]
    fn test_payload_keeps_only_valid_records() {
        let mut bad = full_record("bad");
        bad["benchmarks"].as_object_mut().unwrap().remove("gpqa");
        let payload = validate_payload(&json!({
            "models": [full_record("a"), bad, full_record("b")],
            "lastUpdated": "2024-10-01"
        }))
        .unwrap();

        let names: Vec<_> = payload.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(payload.rejected, 1);
        assert_eq!(payload.last_updated.as_deref(), Some("2024-10-01"));
        assert_eq!(payload.source_check, None);
    }

    #[test]
    fn test_single_partial_record_fails_payload() {
        let mut bad = full_record("bad");
        bad["benchmarks"].as_object_mut().unwrap().remove("gpqa");
        let err = validate_payload(&json!({ "models": [bad] })).unwrap_err();
        assert!(matches!(err, ValidationError::NoValidModels { rejected: 1 }));
    }

    #[test]
    fn test_payload_shape_errors() {
        assert!(matches!(parse_payload("{not json"), Err(ValidationError::Json(_))));
        assert!(matches!(parse_payload("[]"), Err(ValidationError::NotAnObject)));
        assert!(matches!(parse_payload("{}"), Err(ValidationError::MissingModels)));
        assert!(matches!(
            parse_payload(r#"{"models": {}}"#),
            Err(ValidationError::ModelsNotArray)
        ));
        let err = parse_payload(r#"{"models": []}"#).unwrap_err();
        assert!(err.to_string().contains("no valid models"));
    }
}
