use std::fmt::Write;
use tera::{Context, Tera};

use super::views::{render_details, render_summary};
use crate::models::MetadataRecord;

const REPORT_TEMPLATE: &str = include_str!("../../templates/report.html");

/// Plain-text rendering of the summary and detail cards.
pub fn render_text(record: &MetadataRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Summary");
    for field in render_summary(record) {
        let _ = writeln!(out, "  {:20}: {}", field.label, field.value);
    }

    for group in render_details(record) {
        let _ = writeln!(out, "\n{}", group.title);
        for field in group.fields {
            let _ = writeln!(out, "  {:20}: {}", field.label, field.value);
        }
    }

    out
}

/// Standalone HTML page with the same card markup as the browser front-end.
pub fn render_html(record: &MetadataRecord, title: &str) -> Result<String, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("report.html", REPORT_TEMPLATE)?;

    let mut context = Context::new();
    context.insert("title", title);
    context.insert("summary", &render_summary(record));
    context.insert("groups", &render_details(record));

    tera.render("report.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MetadataRecord {
        json!({ "Make": "Canon", "Model": "EOS R5", "Software": "<script>" })
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_text_report_lists_cards() {
        let text = render_text(&sample());
        assert!(text.starts_with("Summary\n"));
        assert!(text.contains("Camera              : Canon EOS R5"));
        assert!(text.contains("\nTime & Dates\n"));
    }

    #[test]
    fn test_html_report_escapes_values() {
        let html = render_html(&sample(), "IMG_0001.JPG").unwrap();
        assert!(html.contains("<title>IMG_0001.JPG</title>"));
        assert!(html.contains("<div>Canon EOS R5</div>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Temperature &amp; Hardware"));
    }
}
