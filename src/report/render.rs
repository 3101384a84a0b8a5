//! Markdown rendering of aggregated reports.
//!
//! A pure projection: the same report always renders to the same bytes.
//! Printing or writing the result is the caller's business.

use super::aggregate::AggregatedReport;
use crate::extract::{ExtractedRecord, FieldValue};

/// Render an aggregated report as a Markdown document.
///
/// One `##` section per field, in the order fields were first recorded; one
/// list entry per value, in stored order, attributed to its 1-based source
/// position.
pub fn render_markdown(report: &AggregatedReport, title: &str) -> String {
    let mut out = format!("# {}\n\n", title);

    for (field, entries) in report.iter() {
        out.push_str(&format!("## {}\n\n", humanize_field_name(field)));
        for entry in entries {
            out.push_str(&format!(
                "- {} [{}]\n",
                format_value(&entry.value),
                entry.source_index + 1
            ));
        }
        out.push('\n');
    }

    out
}

/// Turn a field name into a section heading, e.g. "must_do" -> "Must Do".
fn humanize_field_name(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_value(value: &FieldValue) -> String {
    match value {
        // Collapse newlines so one value stays one list entry
        FieldValue::Text(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
        FieldValue::List(items) => items.join(", "),
        FieldValue::Record(record) => format_record(record),
        FieldValue::Records(records) => records
            .iter()
            .map(format_record)
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn format_record(record: &ExtractedRecord) -> String {
    record
        .fields()
        .map(|(name, value)| format!("{}: {}", humanize_field_name(name), format_value(value)))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_field_name() {
        assert_eq!(humanize_field_name("must_do"), "Must Do");
        assert_eq!(humanize_field_name("park_updates"), "Park Updates");
        assert_eq!(humanize_field_name("best-time"), "Best Time");
        assert_eq!(humanize_field_name("tips"), "Tips");
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut record = ExtractedRecord::new();
        record.set_text("summary", "a summary");
        let report = AggregatedReport::fold(&[Some(record)]).unwrap();

        let first = render_markdown(&report, "Report");
        let second = render_markdown(&report, "Report");
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_empty_report() {
        let report = AggregatedReport::fold(&[]).unwrap();
        let rendered = render_markdown(&report, "Trip Notes");

        assert_eq!(rendered, "# Trip Notes\n\n");
    }

    #[test]
    fn test_render_scenario() {
        let mut a = ExtractedRecord::new();
        a.set(
            "must_do",
            FieldValue::List(vec!["Space Mountain".to_string()]),
        );

        let mut c = ExtractedRecord::new();
        c.set("must_do", FieldValue::List(vec!["Test Track".to_string()]));

        // Middle item failed at fetch
        let report = AggregatedReport::fold(&[Some(a), None, Some(c)]).unwrap();
        let rendered = render_markdown(&report, "Trip Tips");

        assert!(rendered.contains("## Must Do\n"));
        let space = rendered.find("Space Mountain [1]").unwrap();
        let track = rendered.find("Test Track [3]").unwrap();
        assert!(space < track);
    }

    #[test]
    fn test_render_ragged_fields() {
        let mut a = ExtractedRecord::new();
        a.set_text("x", "ax");
        a.set_text("y", "ay");
        let mut b = ExtractedRecord::new();
        b.set_text("x", "bx");
        b.set_text("z", "bz");

        let report = AggregatedReport::fold(&[Some(a), Some(b)]).unwrap();
        let rendered = render_markdown(&report, "Report");

        assert!(rendered.contains("## X\n"));
        assert!(rendered.contains("## Y\n"));
        assert!(rendered.contains("## Z\n"));
        assert!(rendered.contains("- ax [1]"));
        assert!(rendered.contains("- bz [2]"));
    }

    #[test]
    fn test_render_nested_record() {
        let mut attraction = ExtractedRecord::new();
        attraction.set_text("name", "Space Mountain");
        attraction.set_text("description", "Indoor coaster.");

        let mut record = ExtractedRecord::new();
        record.set("attractions", FieldValue::Records(vec![attraction]));

        let report = AggregatedReport::fold(&[Some(record)]).unwrap();
        let rendered = render_markdown(&report, "Guide");

        assert!(rendered.contains("## Attractions\n"));
        assert!(rendered.contains("- Name: Space Mountain; Description: Indoor coaster. [1]"));
    }

    #[test]
    fn test_render_collapses_newlines_in_text() {
        let mut record = ExtractedRecord::new();
        record.set_text("notes", "line one\nline two");

        let report = AggregatedReport::fold(&[Some(record)]).unwrap();
        let rendered = render_markdown(&report, "Report");

        assert!(rendered.contains("- line one line two [1]"));
    }
}
