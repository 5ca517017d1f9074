//! JSON output format for cost analysis reports

use crate::analysis::CostAnalysis;
use crate::config::Thresholds;
use serde::{Deserialize, Serialize};

/// One enriched function row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFunction {
    pub function_name: String,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocations_per_month: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_start_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_concurrency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gb_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_transfer_gb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_per_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculated_gb_seconds: Option<f64>,
    /// Running cost sum at this row's position in the cost-sorted order
    pub cumulative_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_cost: Option<f64>,
}

/// Cost-distribution summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDistribution {
    pub mean: f32,
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32,
    pub p90: f32,
    pub p95: f32,
    pub p99: f32,
}

/// Run-level summary scalars
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub functions: usize,
    pub total_monthly_cost: f64,
    pub total_invocations: f64,
    /// Functions whose cumulative cost share stays within the Pareto cutoff
    pub eighty_percent_count: usize,
    pub pareto_cutoff_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_distribution: Option<JsonDistribution>,
}

/// Classified candidate views, by function name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonViews {
    pub top_cost_contributors: Vec<String>,
    pub rightsizing_candidates: Vec<String>,
    pub provisioned_concurrency_functions: Vec<String>,
    pub low_value_workloads: Vec<String>,
    pub container_candidates: Vec<String>,
}

/// Fitted cost model coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonModel {
    pub intercept: f64,
    pub coef_gb_seconds: f64,
    pub coef_data_transfer: f64,
    pub r_squared: f64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub summary: JsonSummary,
    pub functions: Vec<JsonFunction>,
    pub views: JsonViews,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<JsonModel>,
    /// Reportable reason the model fit failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_error: Option<String>,
}

fn names(analysis: &CostAnalysis, rows: &[usize]) -> Vec<String> {
    rows.iter()
        .map(|&row| analysis.table.rows[row].record.function_name.clone())
        .collect()
}

impl JsonReport {
    /// Build the JSON report from one analysis run
    pub fn from_analysis(analysis: &CostAnalysis, thresholds: &Thresholds) -> Self {
        let table = &analysis.table;
        let rank = table.rank_of();

        let functions = table
            .rows
            .iter()
            .enumerate()
            .map(|(row, r)| JsonFunction {
                function_name: r.record.function_name.clone(),
                environment: r.record.environment.clone(),
                invocations_per_month: r.record.invocations_per_month,
                avg_duration_ms: r.record.avg_duration_ms,
                memory_mb: r.record.memory_mb,
                cold_start_rate: r.record.cold_start_rate,
                provisioned_concurrency: r.record.provisioned_concurrency,
                gb_seconds: r.record.gb_seconds,
                data_transfer_gb: r.record.data_transfer_gb,
                cost_usd: r.record.cost_usd,
                duration_per_mb: r.duration_per_mb,
                invocation_percentage: r.invocation_percentage,
                calculated_gb_seconds: r.calculated_gb_seconds,
                cumulative_cost: table.ranking.cumulative_cost[rank[row]],
                cumulative_percentage: table.ranking.cumulative_percentage[rank[row]],
                predicted_cost: analysis
                    .model
                    .as_ref()
                    .ok()
                    .map(|fit| fit.predictions[row]),
            })
            .collect();

        Self {
            version: "1.0".to_string(),
            format: "costar-json-v1".to_string(),
            summary: JsonSummary {
                functions: table.rows.len(),
                total_monthly_cost: table.total_monthly_cost,
                total_invocations: table.total_invocations,
                eighty_percent_count: analysis.views.eighty_percent_count,
                pareto_cutoff_pct: thresholds.pareto_cutoff_pct,
                cost_distribution: analysis.distribution.as_ref().map(|d| JsonDistribution {
                    mean: d.mean,
                    stddev: d.stddev,
                    min: d.min,
                    max: d.max,
                    median: d.median,
                    p90: d.p90,
                    p95: d.p95,
                    p99: d.p99,
                }),
            },
            functions,
            views: JsonViews {
                top_cost_contributors: names(analysis, &analysis.views.top_cost_contributors),
                rightsizing_candidates: names(analysis, &analysis.views.rightsizing_candidates),
                provisioned_concurrency_functions: names(
                    analysis,
                    &analysis.views.provisioned_concurrency_functions,
                ),
                low_value_workloads: names(analysis, &analysis.views.low_value_workloads),
                container_candidates: names(analysis, &analysis.views.container_candidates),
            },
            model: analysis.model.as_ref().ok().map(|fit| JsonModel {
                intercept: fit.intercept,
                coef_gb_seconds: fit.coef_gb_seconds,
                coef_data_transfer: fit.coef_data_transfer,
                r_squared: fit.r_squared,
            }),
            model_error: analysis
                .model
                .as_ref()
                .err()
                .map(|error| error.to_string()),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
