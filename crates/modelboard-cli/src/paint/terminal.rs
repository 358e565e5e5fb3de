use std::fmt::Write;

use modelboard_core::{
    CardDescriptor, ScoreClass, SourceStatus, StatusTone, ViewState, BENCHMARKS,
};

fn class_marker(class: ScoreClass) -> &'static str {
    match class {
        ScoreClass::High => "▲",
        ScoreClass::Mid => "■",
        ScoreClass::Low => "▼",
    }
}

fn tone_marker(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Neutral => "•",
        StatusTone::Pending => "…",
        StatusTone::Success => "✅",
        StatusTone::Error => "❌",
    }
}

pub fn status(status: &SourceStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", tone_marker(status.tone), status.status);
    let _ = writeln!(out, "  Source:        {}", status.source);
    let _ = writeln!(out, "  Last updated:  {}", status.last_updated);
    let _ = writeln!(out, "  Verification:  {}", status.verification);
    out
}

pub fn view(view: &ViewState) -> String {
    format!(
        "Filter: {}  |  Sorted by: {} (highest first)",
        view.filter,
        view.sort_definition().label
    )
}

pub fn cards(cards: &[CardDescriptor]) -> String {
    if cards.is_empty() {
        return "  No models to show.\n".to_string();
    }

    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        let _ = writeln!(out, "{:-<65}", "");
        let _ = writeln!(
            out,
            "  {}. {}  [{}]  {}",
            i + 1,
            card.name,
            card.provider,
            card.tag
        );
        let _ = writeln!(out, "     {}", card.focus);
        if card.metrics.is_empty() {
            let _ = writeln!(out, "     (no benchmarks match this filter)");
        }
        for m in &card.metrics {
            let _ = writeln!(
                out,
                "     {:<14} {:>7}  {} {}",
                m.label,
                m.display,
                class_marker(m.class),
                m.class.as_str()
            );
        }
        if !card.notes.is_empty() {
            let _ = writeln!(out, "     {}", card.notes);
        }
        let _ = writeln!(out, "     Updated: {}", card.updated);
    }
    let _ = writeln!(out, "{:-<65}", "");
    out
}

pub fn benchmarks() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:<12} {:<14} {}", "Key", "Label", "Category");
    let _ = writeln!(out, "{:-<45}", "");
    for def in BENCHMARKS.iter() {
        let _ = writeln!(out, "  {:<12} {:<14} {}", def.key, def.label, def.category);
    }
    out
}
