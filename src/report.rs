//! Plain-text report rendering
//!
//! Builds the section-headed text report from one analysis run. Every
//! section renders even when the cost model fails; the failure becomes a
//! note in the model section.

use crate::analysis::CostAnalysis;
use crate::config::Thresholds;
use crate::record::REQUIRED_COLUMNS;

/// Render an absent-able value with two decimals
fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

fn fmt_opt4(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

fn section(report: &mut String, title: &str) {
    report.push('\n');
    report.push_str(title);
    report.push('\n');
    report.push_str(&"-".repeat(title.len()));
    report.push('\n');
}

fn overview(report: &mut String, analysis: &CostAnalysis) {
    let table = &analysis.table;
    report.push_str(&format!("Functions analyzed: {}\n", table.rows.len()));
    report.push_str(&format!("Columns: {}\n", REQUIRED_COLUMNS.join(", ")));
    report.push_str(&format!(
        "Total monthly cost: ${:.2}\n",
        table.total_monthly_cost
    ));
    report.push_str(&format!(
        "Total monthly invocations: {:.0}\n",
        table.total_invocations
    ));

    if let Some(ref dist) = analysis.distribution {
        report.push_str(&format!(
            "Cost per function: mean ${:.2}, stddev ${:.2}, min ${:.2}, max ${:.2}\n",
            dist.mean, dist.stddev, dist.min, dist.max
        ));
        report.push_str(&format!(
            "Cost percentiles: median ${:.2}, p90 ${:.2}, p95 ${:.2}, p99 ${:.2}\n",
            dist.median, dist.p90, dist.p95, dist.p99
        ));
    }
}

fn top_cost_contributors(
    report: &mut String,
    analysis: &CostAnalysis,
    thresholds: &Thresholds,
    top: usize,
) {
    let table = &analysis.table;
    report.push_str(&format!(
        "{} functions account for {:.0}% of ${:.2}\n\n",
        analysis.views.eighty_percent_count,
        thresholds.pareto_cutoff_pct,
        table.total_monthly_cost
    ));

    report.push_str(&format!(
        "{:<32} {:>12} {:>14} {:>12}\n",
        "function", "cost ($)", "cum. cost ($)", "cum. %"
    ));
    for (position, &row) in table.ranking.order.iter().take(top).enumerate() {
        report.push_str(&format!(
            "{:<32} {:>12} {:>14.2} {:>12}\n",
            table.rows[row].record.function_name,
            fmt_opt(table.rows[row].record.cost_usd),
            table.ranking.cumulative_cost[position],
            fmt_opt(table.ranking.cumulative_percentage[position]),
        ));
    }
}

fn rightsizing(report: &mut String, analysis: &CostAnalysis) {
    let rows = &analysis.views.rightsizing_candidates;
    report.push_str(&format!("Found {} over-provisioned candidates\n", rows.len()));
    if rows.is_empty() {
        return;
    }
    report.push('\n');
    report.push_str(&format!(
        "{:<32} {:>12} {:>10} {:>12} {:>10}\n",
        "function", "avg ms", "memory MB", "ms/MB", "cost ($)"
    ));
    for &row in rows {
        let r = &analysis.table.rows[row];
        report.push_str(&format!(
            "{:<32} {:>12} {:>10} {:>12} {:>10}\n",
            r.record.function_name,
            fmt_opt(r.record.avg_duration_ms),
            fmt_opt(r.record.memory_mb),
            fmt_opt4(r.duration_per_mb),
            fmt_opt(r.record.cost_usd),
        ));
    }
}

fn provisioned_concurrency(report: &mut String, analysis: &CostAnalysis) {
    let rows = &analysis.views.provisioned_concurrency_functions;
    report.push_str(&format!(
        "{} functions with provisioned concurrency\n",
        rows.len()
    ));
    if rows.is_empty() {
        return;
    }
    report.push('\n');
    report.push_str(&format!(
        "{:<32} {:>16} {:>14} {:>10}\n",
        "function", "cold start rate", "provisioned", "cost ($)"
    ));
    for &row in rows {
        let r = &analysis.table.rows[row];
        report.push_str(&format!(
            "{:<32} {:>16} {:>14} {:>10}\n",
            r.record.function_name,
            fmt_opt4(r.record.cold_start_rate),
            fmt_opt(r.record.provisioned_concurrency),
            fmt_opt(r.record.cost_usd),
        ));
    }
}

fn low_value(report: &mut String, analysis: &CostAnalysis) {
    let rows = &analysis.views.low_value_workloads;
    report.push_str(&format!("{} low-value functions\n", rows.len()));
    if rows.is_empty() {
        return;
    }
    report.push('\n');
    report.push_str(&format!(
        "{:<32} {:>14} {:>14} {:>10}\n",
        "function", "invocations", "invocation %", "cost ($)"
    ));
    for &row in rows {
        let r = &analysis.table.rows[row];
        report.push_str(&format!(
            "{:<32} {:>14} {:>14} {:>10}\n",
            r.record.function_name,
            fmt_opt(r.record.invocations_per_month),
            fmt_opt(r.invocation_percentage),
            fmt_opt(r.record.cost_usd),
        ));
    }
}

fn cost_model(report: &mut String, analysis: &CostAnalysis, top: usize) {
    match &analysis.model {
        Ok(fit) => {
            report.push_str(&format!(
                "Compute coef: {:.8}, DataTransfer coef: {:.4}\n",
                fit.coef_gb_seconds, fit.coef_data_transfer
            ));
            report.push_str(&format!("Intercept: {:.4}\n", fit.intercept));
            report.push_str(&format!("R squared: {:.4}\n\n", fit.r_squared));

            report.push_str(&format!(
                "{:<32} {:>12} {:>14}\n",
                "function", "cost ($)", "predicted ($)"
            ));
            for (row, r) in analysis.table.rows.iter().enumerate().take(top) {
                report.push_str(&format!(
                    "{:<32} {:>12} {:>14.2}\n",
                    r.record.function_name,
                    fmt_opt(r.record.cost_usd),
                    fit.predictions[row],
                ));
            }
        }
        Err(error) => {
            report.push_str(&format!("Cost model unavailable: {}\n", error));
        }
    }
}

fn container_candidates(report: &mut String, analysis: &CostAnalysis) {
    let rows = &analysis.views.container_candidates;
    report.push_str(&format!("{} containerization candidates\n", rows.len()));
    if rows.is_empty() {
        return;
    }
    report.push('\n');
    report.push_str(&format!(
        "{:<32} {:>12} {:>10} {:>14} {:>10}\n",
        "function", "avg ms", "memory MB", "invocations", "cost ($)"
    ));
    for &row in rows {
        let r = &analysis.table.rows[row];
        report.push_str(&format!(
            "{:<32} {:>12} {:>10} {:>14} {:>10}\n",
            r.record.function_name,
            fmt_opt(r.record.avg_duration_ms),
            fmt_opt(r.record.memory_mb),
            fmt_opt(r.record.invocations_per_month),
            fmt_opt(r.record.cost_usd),
        ));
    }
}

/// Generate the full human-readable report
pub fn to_report_string(
    analysis: &CostAnalysis,
    thresholds: &Thresholds,
    top: usize,
) -> String {
    let mut report = String::new();
    report.push_str("Serverless Cost Analysis\n");
    report.push_str("========================\n");

    overview(&mut report, analysis);

    section(&mut report, "Top Cost Contributors");
    top_cost_contributors(&mut report, analysis, thresholds, top);

    section(&mut report, "Memory Right-Sizing Candidates");
    rightsizing(&mut report, analysis);

    section(&mut report, "Provisioned Concurrency");
    provisioned_concurrency(&mut report, analysis);

    section(&mut report, "Low-Value Workloads");
    low_value(&mut report, analysis);

    section(&mut report, "Cost Model");
    cost_model(&mut report, analysis, top);

    section(&mut report, "Container Candidates");
    container_candidates(&mut report, analysis);

    report
}
