//! Field-wise aggregation of extracted records.

use crate::error::{Result, SankeError};
use crate::extract::{ExtractedRecord, FieldValue};

/// One aggregated value, attributed to the source item that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub value: FieldValue,
    /// Zero-based position of the source item in the input batch.
    pub source_index: usize,
}

/// Field name to ordered values, across all successfully extracted records.
///
/// Fields appear in the order they were first recorded; values within a
/// field appear in source order. Built once by [`AggregatedReport::fold`]
/// and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AggregatedReport {
    fields: Vec<FieldEntries>,
}

#[derive(Debug, Clone)]
struct FieldEntries {
    name: String,
    entries: Vec<ReportEntry>,
}

impl AggregatedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for a field.
    ///
    /// Values for a field must arrive in non-decreasing source order; a
    /// violation means the runner's index alignment is broken and is
    /// reported as an aggregation error.
    pub fn record(&mut self, field: &str, value: FieldValue, source_index: usize) -> Result<()> {
        let position = match self.fields.iter().position(|f| f.name == field) {
            Some(position) => position,
            None => {
                self.fields.push(FieldEntries {
                    name: field.to_string(),
                    entries: Vec::new(),
                });
                self.fields.len() - 1
            }
        };
        let entries = &mut self.fields[position].entries;

        if let Some(last) = entries.last() {
            if source_index < last.source_index {
                return Err(SankeError::Aggregation(format!(
                    "Field '{}' received source {} after source {}",
                    field, source_index, last.source_index
                )));
            }
        }

        entries.push(ReportEntry {
            value,
            source_index,
        });
        Ok(())
    }

    /// Fold an index-aligned batch of records into a report.
    ///
    /// Absent positions are skipped. List-valued fields contribute one entry
    /// per element, all attributed to the same source item.
    pub fn fold(records: &[Option<ExtractedRecord>]) -> Result<Self> {
        let mut report = Self::new();

        for (source_index, record) in records.iter().enumerate() {
            let Some(record) = record else {
                continue;
            };

            for (name, value) in record.fields() {
                match value {
                    FieldValue::List(items) => {
                        for item in items {
                            report.record(name, FieldValue::Text(item.clone()), source_index)?;
                        }
                    }
                    FieldValue::Records(nested) => {
                        for nested_record in nested {
                            report.record(
                                name,
                                FieldValue::Record(nested_record.clone()),
                                source_index,
                            )?;
                        }
                    }
                    other => report.record(name, other.clone(), source_index)?,
                }
            }
        }

        Ok(report)
    }

    /// Iterate fields in first-recorded order, with their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReportEntry])> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.entries.as_slice()))
    }

    /// Entries for one field, if any were recorded.
    pub fn entries(&self, field: &str) -> Option<&[ReportEntry]> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.entries.as_slice())
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    #[test]
    fn test_record_preserves_order() {
        let mut report = AggregatedReport::new();
        report.record("tips", text("a"), 0).unwrap();
        report.record("tips", text("b"), 2).unwrap();
        report.record("tips", text("c"), 2).unwrap();

        let entries = report.entries("tips").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].value, text("b"));
        assert_eq!(entries[2].source_index, 2);
    }

    #[test]
    fn test_record_rejects_out_of_order_source() {
        let mut report = AggregatedReport::new();
        report.record("tips", text("late"), 3).unwrap();

        let err = report.record("tips", text("early"), 1).unwrap_err();
        assert!(matches!(err, SankeError::Aggregation(_)));
    }

    #[test]
    fn test_fold_heterogeneous_field_sets() {
        let mut a = ExtractedRecord::new();
        a.set_text("x", "ax");
        a.set_text("y", "ay");

        let mut b = ExtractedRecord::new();
        b.set_text("x", "bx");
        b.set_text("z", "bz");

        let report = AggregatedReport::fold(&[Some(a), Some(b)]).unwrap();

        assert_eq!(report.entries("x").unwrap().len(), 2);
        assert_eq!(report.entries("y").unwrap().len(), 1);
        assert_eq!(report.entries("z").unwrap().len(), 1);
        assert_eq!(report.field_count(), 3);
    }

    #[test]
    fn test_fold_skips_absent_records() {
        let mut a = ExtractedRecord::new();
        a.set("must_do", FieldValue::List(vec!["Space Mountain".to_string()]));

        let mut c = ExtractedRecord::new();
        c.set("must_do", FieldValue::List(vec!["Test Track".to_string()]));

        let report = AggregatedReport::fold(&[Some(a), None, Some(c)]).unwrap();

        let entries = report.entries("must_do").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, text("Space Mountain"));
        assert_eq!(entries[0].source_index, 0);
        assert_eq!(entries[1].value, text("Test Track"));
        assert_eq!(entries[1].source_index, 2);
    }

    #[test]
    fn test_fold_flattens_lists_per_element() {
        let mut record = ExtractedRecord::new();
        record.set(
            "packing",
            FieldValue::List(vec!["sunscreen".to_string(), "ponchos".to_string()]),
        );

        let report = AggregatedReport::fold(&[Some(record)]).unwrap();
        let entries = report.entries("packing").unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.source_index == 0));
    }

    #[test]
    fn test_fold_keeps_duplicate_values() {
        let mut a = ExtractedRecord::new();
        a.set_text("tip", "arrive early");
        let mut b = ExtractedRecord::new();
        b.set_text("tip", "arrive early");

        let report = AggregatedReport::fold(&[Some(a), Some(b)]).unwrap();
        let entries = report.entries("tip").unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source_index, 0);
        assert_eq!(entries[1].source_index, 1);
    }

    #[test]
    fn test_fold_empty_batch() {
        let report = AggregatedReport::fold(&[]).unwrap();
        assert!(report.is_empty());
    }
}
