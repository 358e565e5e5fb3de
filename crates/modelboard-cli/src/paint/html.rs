use std::fmt::Write;

use modelboard_core::{CardDescriptor, SourceStatus, ViewState};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;background:#f6f7f9;color:#1d2330}\
.status{margin-bottom:1.5rem}.status-error{color:#b42318}.status-success{color:#067647}\
.cards{display:grid;grid-template-columns:repeat(auto-fill,minmax(280px,1fr));gap:1rem}\
.model-card{background:#fff;border-radius:12px;padding:1rem;box-shadow:0 1px 3px #0002}\
.badge{font-size:.75rem;background:#eef2ff;border-radius:999px;padding:.1rem .5rem}\
.metric{display:flex;justify-content:space-between}\
.score-high{color:#067647}.score-mid{color:#b54708}.score-low{color:#b42318}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn card(card: &CardDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<article class=\"model-card\">");
    let _ = writeln!(out, "  <header>");
    let _ = writeln!(out, "    <h3>{}</h3>", escape(&card.name));
    let _ = writeln!(
        out,
        "    <span class=\"badge\">{}</span>",
        escape(&card.provider)
    );
    let _ = writeln!(out, "  </header>");
    let _ = writeln!(out, "  <p class=\"focus\">{}</p>", escape(&card.focus));
    let _ = writeln!(out, "  <span class=\"tag\">{}</span>", escape(&card.tag));
    let _ = writeln!(out, "  <div class=\"metrics\">");
    for m in &card.metrics {
        let _ = writeln!(
            out,
            "    <div class=\"metric\"><span>{}</span><strong class=\"{}\">{}</strong></div>",
            escape(m.label),
            m.class.css_class(),
            escape(&m.display)
        );
    }
    let _ = writeln!(out, "  </div>");
    let _ = writeln!(out, "  <p class=\"notes\">{}</p>", escape(&card.notes));
    let _ = writeln!(
        out,
        "  <footer class=\"updated\">Updated {}</footer>",
        escape(&card.updated)
    );
    let _ = writeln!(out, "</article>");
    out
}

pub fn cards(cards: &[CardDescriptor]) -> String {
    let mut out = String::from("<section class=\"cards\">\n");
    for c in cards {
        out.push_str(&card(c));
    }
    out.push_str("</section>\n");
    out
}

pub fn status(status: &SourceStatus) -> String {
    format!(
        "<section class=\"status status-{}\">\n  <p id=\"status-text\">{}</p>\n  <p id=\"source-text\">{}</p>\n  <p id=\"last-updated\">{}</p>\n  <p id=\"source-check\">{}</p>\n</section>\n",
        status.tone.as_str(),
        escape(&status.status),
        escape(&status.source),
        escape(&status.last_updated),
        escape(&status.verification)
    )
}

/// Standalone page with status, view summary and cards
pub fn page(source: &SourceStatus, view: &ViewState, all: &[CardDescriptor]) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Model benchmarks</title>\n<style>{}</style>\n</head>\n<body>\n<h1>Model benchmarks</h1>\n{}<p class=\"view\">Filter: {} &middot; Sorted by {}</p>\n{}</body>\n</html>\n",
        STYLE,
        status(source),
        escape(view.filter.as_str()),
        escape(view.sort_definition().label),
        cards(all)
    )
}
