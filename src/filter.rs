//! Pre-analysis row filtering
//!
//! Optional selection of records by function-name regex and/or exact
//! environment match, applied before the pipeline runs so every derived
//! metric (totals, percentages, ranking) reflects the filtered slice.

use crate::record::FunctionRecord;
use anyhow::{Context, Result};
use regex::Regex;

/// Row filter built from the CLI selection flags
#[derive(Debug, Clone)]
pub struct RecordFilter {
    name_pattern: Option<Regex>,
    environment: Option<String>,
}

impl RecordFilter {
    /// A filter that keeps every record
    pub fn all() -> Self {
        Self {
            name_pattern: None,
            environment: None,
        }
    }

    /// Build a filter from an optional name regex and environment
    pub fn new(name_pattern: Option<&str>, environment: Option<&str>) -> Result<Self> {
        let name_pattern = name_pattern
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid function-name pattern: {}", pattern))
            })
            .transpose()?;

        Ok(Self {
            name_pattern,
            environment: environment.map(str::to_string),
        })
    }

    /// Whether a record passes the filter
    pub fn matches(&self, record: &FunctionRecord) -> bool {
        if let Some(ref pattern) = self.name_pattern {
            if !pattern.is_match(&record.function_name) {
                return false;
            }
        }
        if let Some(ref environment) = self.environment {
            if &record.environment != environment {
                return false;
            }
        }
        true
    }

    /// Keep matching records, preserving input order
    pub fn apply(&self, records: Vec<FunctionRecord>) -> Vec<FunctionRecord> {
        if self.name_pattern.is_none() && self.environment.is_none() {
            return records;
        }
        let before = records.len();
        let kept: Vec<FunctionRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();
        tracing::debug!("row filter kept {} of {} records", kept.len(), before);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, environment: &str) -> FunctionRecord {
        FunctionRecord {
            function_name: name.to_string(),
            environment: environment.to_string(),
            ..FunctionRecord::default()
        }
    }

    #[test]
    fn test_all_keeps_everything() {
        let filter = RecordFilter::all();
        let records = vec![record("a", "production"), record("b", "dev")];
        assert_eq!(filter.apply(records).len(), 2);
    }

    #[test]
    fn test_name_pattern() {
        let filter = RecordFilter::new(Some("^api-"), None).unwrap();
        assert!(filter.matches(&record("api-users", "production")));
        assert!(!filter.matches(&record("batch-etl", "production")));
    }

    #[test]
    fn test_environment_exact_match() {
        let filter = RecordFilter::new(None, Some("production")).unwrap();
        assert!(filter.matches(&record("a", "production")));
        assert!(!filter.matches(&record("a", "pre-production")));
    }

    #[test]
    fn test_combined_filters_are_conjunctive() {
        let filter = RecordFilter::new(Some("etl"), Some("staging")).unwrap();
        assert!(filter.matches(&record("nightly-etl", "staging")));
        assert!(!filter.matches(&record("nightly-etl", "production")));
        assert!(!filter.matches(&record("api-users", "staging")));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = RecordFilter::new(None, Some("production")).unwrap();
        let records = vec![
            record("c", "production"),
            record("a", "dev"),
            record("b", "production"),
        ];
        let kept = filter.apply(records);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].function_name, "c");
        assert_eq!(kept[1].function_name, "b");
    }

    #[test]
    fn test_invalid_regex_errors() {
        assert!(RecordFilter::new(Some("["), None).is_err());
    }
}
