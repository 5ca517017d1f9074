//! CSV export of the enriched table
//!
//! Emits every input column plus the derived columns and the model
//! prediction, one row per function in input order. Absent values become
//! empty fields.

use crate::analysis::CostAnalysis;

const HEADER: &str = "FunctionName,Environment,InvocationsPerMonth,AvgDurationMs,MemoryMB,ColdStartRate,ProvisionedConcurrency,GBSeconds,DataTransferGB,CostUSD,DurationPerMB,InvocationPercentage,CalculatedGBSeconds,CumulativeCost,CumulativePercentage,PredictedCost";

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn numeric_field(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Generate the enriched-table CSV as a string
pub fn to_csv(analysis: &CostAnalysis) -> String {
    let table = &analysis.table;
    let rank = table.rank_of();

    let mut output = String::new();
    output.push_str(HEADER);
    output.push('\n');

    for (row, r) in table.rows.iter().enumerate() {
        let fields = [
            escape_field(&r.record.function_name),
            escape_field(&r.record.environment),
            numeric_field(r.record.invocations_per_month),
            numeric_field(r.record.avg_duration_ms),
            numeric_field(r.record.memory_mb),
            numeric_field(r.record.cold_start_rate),
            numeric_field(r.record.provisioned_concurrency),
            numeric_field(r.record.gb_seconds),
            numeric_field(r.record.data_transfer_gb),
            numeric_field(r.record.cost_usd),
            numeric_field(r.duration_per_mb),
            numeric_field(r.invocation_percentage),
            numeric_field(r.calculated_gb_seconds),
            numeric_field(Some(table.ranking.cumulative_cost[rank[row]])),
            numeric_field(table.ranking.cumulative_percentage[rank[row]]),
            numeric_field(
                analysis
                    .model
                    .as_ref()
                    .ok()
                    .map(|fit| fit.predictions[row]),
            ),
        ];
        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output
}
