//! Typed function telemetry records
//!
//! One record per serverless function, with every numeric field kept as
//! numeric-or-absent. Absent is never silently coerced to zero; stages that
//! impute must say so.

/// Required input columns, in the canonical export order
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "FunctionName",
    "Environment",
    "InvocationsPerMonth",
    "AvgDurationMs",
    "MemoryMB",
    "ColdStartRate",
    "ProvisionedConcurrency",
    "GBSeconds",
    "DataTransferGB",
    "CostUSD",
];

/// One row of serverless-function telemetry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionRecord {
    /// Function identifier (not guaranteed unique)
    pub function_name: String,
    /// Deployment environment category (e.g. "production")
    pub environment: String,
    pub invocations_per_month: Option<f64>,
    pub avg_duration_ms: Option<f64>,
    pub memory_mb: Option<f64>,
    pub cold_start_rate: Option<f64>,
    pub provisioned_concurrency: Option<f64>,
    pub gb_seconds: Option<f64>,
    pub data_transfer_gb: Option<f64>,
    pub cost_usd: Option<f64>,
}

/// Coerce a textual field to a numeric value
///
/// The documented coercion rule: trim, parse as f64, and treat parse
/// failures, empty fields, and non-finite values as absent. Never errors.
pub fn coerce_numeric(field: &str) -> Option<f64> {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_number() {
        assert_eq!(coerce_numeric("42.5"), Some(42.5));
    }

    #[test]
    fn test_coerce_trims_whitespace() {
        assert_eq!(coerce_numeric("  128 "), Some(128.0));
    }

    #[test]
    fn test_coerce_negative_and_exponent() {
        assert_eq!(coerce_numeric("-3.5"), Some(-3.5));
        assert_eq!(coerce_numeric("1e3"), Some(1000.0));
    }

    #[test]
    fn test_coerce_malformed_is_absent() {
        assert_eq!(coerce_numeric("N/A"), None);
        assert_eq!(coerce_numeric("12abc"), None);
    }

    #[test]
    fn test_coerce_empty_is_absent() {
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("   "), None);
    }

    #[test]
    fn test_coerce_non_finite_is_absent() {
        assert_eq!(coerce_numeric("inf"), None);
        assert_eq!(coerce_numeric("NaN"), None);
    }

    #[test]
    fn test_record_default_all_absent() {
        let record = FunctionRecord::default();
        assert!(record.cost_usd.is_none());
        assert!(record.memory_mb.is_none());
        assert!(record.function_name.is_empty());
    }
}
