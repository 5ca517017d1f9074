//! Quoted-CSV loader for function telemetry exports
//!
//! The telemetry export wraps every line in one outer pair of double quotes.
//! The loader strips that pair when present, splits on commas, trims every
//! field, and resolves columns by header name so column order and extra
//! columns do not matter.
//!
//! Field-level problems never abort a load: a malformed numeric becomes an
//! absent value, and a row shorter than the header is dropped with a warning.
//! Only structural problems (empty input, a missing required column) error.

use crate::record::{coerce_numeric, FunctionRecord, REQUIRED_COLUMNS};
use thiserror::Error;

/// Structural errors while loading a telemetry table
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoadError {
    #[error("input contains no header row")]
    Empty,

    #[error("required column missing from header: {0}")]
    MissingColumn(String),
}

/// Positions of the required columns within a header row
#[derive(Debug, Clone)]
struct ColumnIndex {
    function_name: usize,
    environment: usize,
    invocations_per_month: usize,
    avg_duration_ms: usize,
    memory_mb: usize,
    cold_start_rate: usize,
    provisioned_concurrency: usize,
    gb_seconds: usize,
    data_transfer_gb: usize,
    cost_usd: usize,
}

impl ColumnIndex {
    fn resolve(header: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| -> Result<usize, LoadError> {
            header
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            function_name: find(REQUIRED_COLUMNS[0])?,
            environment: find(REQUIRED_COLUMNS[1])?,
            invocations_per_month: find(REQUIRED_COLUMNS[2])?,
            avg_duration_ms: find(REQUIRED_COLUMNS[3])?,
            memory_mb: find(REQUIRED_COLUMNS[4])?,
            cold_start_rate: find(REQUIRED_COLUMNS[5])?,
            provisioned_concurrency: find(REQUIRED_COLUMNS[6])?,
            gb_seconds: find(REQUIRED_COLUMNS[7])?,
            data_transfer_gb: find(REQUIRED_COLUMNS[8])?,
            cost_usd: find(REQUIRED_COLUMNS[9])?,
        })
    }

    /// Width a data row needs to cover every required column
    fn min_fields(&self) -> usize {
        [
            self.function_name,
            self.environment,
            self.invocations_per_month,
            self.avg_duration_ms,
            self.memory_mb,
            self.cold_start_rate,
            self.provisioned_concurrency,
            self.gb_seconds,
            self.data_transfer_gb,
            self.cost_usd,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// Strip one outer pair of double quotes from a line, if present
fn strip_outer_quotes(line: &str) -> &str {
    let trimmed = line.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Split a (possibly quote-wrapped) line into trimmed fields
fn split_fields(line: &str) -> Vec<String> {
    strip_outer_quotes(line)
        .split(',')
        .map(|field| field.trim().to_string())
        .collect()
}

/// Parse telemetry CSV text into function records
///
/// Input row order is preserved. Blank lines are skipped; short rows are
/// dropped with a warning; extra trailing fields and unknown columns are
/// ignored.
pub fn parse_records(input: &str) -> Result<Vec<FunctionRecord>, LoadError> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());

    let header = split_fields(lines.next().ok_or(LoadError::Empty)?);
    let index = ColumnIndex::resolve(&header)?;
    let min_fields = index.min_fields();

    let mut records = Vec::new();
    for (line_number, line) in lines.enumerate() {
        let fields = split_fields(line);
        if fields.len() < min_fields {
            tracing::warn!(
                "dropping row {}: {} fields, header needs {}",
                line_number + 2,
                fields.len(),
                min_fields
            );
            continue;
        }

        records.push(FunctionRecord {
            function_name: fields[index.function_name].clone(),
            environment: fields[index.environment].clone(),
            invocations_per_month: coerce_numeric(&fields[index.invocations_per_month]),
            avg_duration_ms: coerce_numeric(&fields[index.avg_duration_ms]),
            memory_mb: coerce_numeric(&fields[index.memory_mb]),
            cold_start_rate: coerce_numeric(&fields[index.cold_start_rate]),
            provisioned_concurrency: coerce_numeric(&fields[index.provisioned_concurrency]),
            gb_seconds: coerce_numeric(&fields[index.gb_seconds]),
            data_transfer_gb: coerce_numeric(&fields[index.data_transfer_gb]),
            cost_usd: coerce_numeric(&fields[index.cost_usd]),
        });
    }

    tracing::debug!("loaded {} function records", records.len());
    Ok(records)
}
