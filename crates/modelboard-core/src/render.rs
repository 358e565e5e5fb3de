//! Pure rendering: (catalog, view) -> card descriptors

use std::cmp::Ordering;

use serde::Serialize;

use crate::{Catalog, ModelRecord, ViewState};

pub const HIGH_THRESHOLD: f64 = 85.0;
pub const MID_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreClass {
    High,
    Mid,
    Low,
}

impl ScoreClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreClass::High => "high",
            ScoreClass::Mid => "mid",
            ScoreClass::Low => "low",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreClass::High => "score-high",
            ScoreClass::Mid => "score-mid",
            ScoreClass::Low => "score-low",
        }
    }
}

pub fn score_class(score: f64) -> ScoreClass {
    if score >= HIGH_THRESHOLD {
        ScoreClass::High
    } else if score >= MID_THRESHOLD {
        ScoreClass::Mid
    } else {
        ScoreClass::Low
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}%", score)
}

/// One benchmark row on a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub key: &'static str,
    pub label: &'static str,
    pub score: f64,
    pub display: String,
    pub class: ScoreClass,
}

/// Rendering-ready summary of one model under the current view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDescriptor {
    pub name: String,
    pub provider: String,
    pub focus: String,
    pub tag: String,
    pub metrics: Vec<MetricView>,
    pub notes: String,
    pub updated: String,
}

/// Records sorted by the view's sort key, highest first. Ties keep catalog order.
pub fn sorted<'a>(catalog: &'a Catalog, view: &ViewState) -> Vec<&'a ModelRecord> {
    let key = view.sort();
    let mut records: Vec<&ModelRecord> = catalog.iter().collect();
    // sort_by is stable
    records.sort_by(|a, b| compare_desc(a.score(key), b.score(key)));
    records
}

fn compare_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn render(catalog: &Catalog, view: &ViewState) -> Vec<CardDescriptor> {
    let defs = view.filter.definitions();

    let cards: Vec<CardDescriptor> = sorted(catalog, view)
        .into_iter()
        .map(|record| CardDescriptor {
            name: record.name.clone(),
            provider: record.provider.clone(),
            focus: record.focus.clone(),
            tag: record.tag.clone(),
            metrics: defs
                .iter()
                .filter_map(|def| {
                    let score = record.score(def.key)?;
                    Some(MetricView {
                        key: def.key,
                        label: def.label,
                        score,
                        display: format_score(score),
                        class: score_class(score),
                    })
                })
                .collect(),
            notes: record.notes.clone(),
            updated: record.updated.clone(),
        })
        .collect();

    tracing::debug!(
        "Rendered {} cards (filter={}, sort={})",
        cards.len(),
        view.filter,
        view.sort()
    );
    cards
}
