//! HTML output format for cost analysis reports
//!
//! Single self-contained page with embedded CSS, one styled table per
//! report section, and escaped cell content.

use crate::analysis::CostAnalysis;
use crate::config::Thresholds;
use crate::metrics::EnrichedRecord;

/// Escape HTML special characters to prevent XSS
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate embedded CSS styles
fn generate_styles() -> &'static str {
    r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        tr:hover {
            background-color: #f0f0f0;
        }
        .function {
            color: #0066cc;
            font-weight: bold;
            font-family: monospace;
        }
        .numeric {
            font-family: monospace;
            text-align: right;
        }
        .note {
            color: #cc0000;
        }
        .summary {
            background-color: white;
            padding: 12px 16px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => String::new(),
    }
}

fn fmt_opt4(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => String::new(),
    }
}

fn header_row(columns: &[&str]) -> String {
    let cells: Vec<String> = columns.iter().map(|c| format!("<th>{}</th>", c)).collect();
    format!("        <tr>{}</tr>\n", cells.join(""))
}

fn data_row(name: &str, values: &[String]) -> String {
    let mut cells = vec![format!(
        r#"<td class="function">{}</td>"#,
        escape_html(name)
    )];
    cells.extend(
        values
            .iter()
            .map(|v| format!(r#"<td class="numeric">{}</td>"#, escape_html(v))),
    );
    format!("        <tr>{}</tr>\n", cells.join(""))
}

fn view_table<F>(
    html: &mut String,
    title: &str,
    columns: &[&str],
    rows: &[usize],
    table: &[EnrichedRecord],
    cells: F,
) where
    F: Fn(&EnrichedRecord) -> Vec<String>,
{
    html.push_str(&format!("    <h2>{}</h2>\n", title));
    html.push_str(&format!("    <p>{} functions</p>\n", rows.len()));
    if rows.is_empty() {
        return;
    }
    html.push_str("    <table>\n");
    html.push_str(&header_row(columns));
    for &row in rows {
        html.push_str(&data_row(&table[row].record.function_name, &cells(&table[row])));
    }
    html.push_str("    </table>\n");
}

fn render_overview(html: &mut String, analysis: &CostAnalysis, thresholds: &Thresholds) {
    let table = &analysis.table;
    html.push_str("    <div class=\"summary\">\n");
    html.push_str(&format!(
        "        <p>Functions analyzed: {}</p>\n",
        table.rows.len()
    ));
    html.push_str(&format!(
        "        <p>Total monthly cost: ${:.2}</p>\n",
        table.total_monthly_cost
    ));
    html.push_str(&format!(
        "        <p>Total monthly invocations: {:.0}</p>\n",
        table.total_invocations
    ));
    html.push_str(&format!(
        "        <p>{} functions account for {:.0}% of total cost</p>\n",
        analysis.views.eighty_percent_count, thresholds.pareto_cutoff_pct
    ));
    if let Some(ref dist) = analysis.distribution {
        html.push_str(&format!(
            "        <p>Cost per function: mean ${:.2}, stddev ${:.2}, median ${:.2}, p90 ${:.2}, p95 ${:.2}, p99 ${:.2}, min ${:.2}, max ${:.2}</p>\n",
            dist.mean, dist.stddev, dist.median, dist.p90, dist.p95, dist.p99, dist.min, dist.max
        ));
    }
    html.push_str("    </div>\n");
}

fn render_top_contributors(html: &mut String, analysis: &CostAnalysis, top: usize) {
    let table = &analysis.table;
    html.push_str("    <h2>Top Cost Contributors</h2>\n");
    html.push_str("    <table>\n");
    html.push_str(&header_row(&[
        "Function",
        "Cost ($)",
        "Cumulative Cost ($)",
        "Cumulative %",
    ]));
    for (position, &row) in table.ranking.order.iter().take(top).enumerate() {
        html.push_str(&data_row(
            &table.rows[row].record.function_name,
            &[
                fmt_opt(table.rows[row].record.cost_usd),
                format!("{:.2}", table.ranking.cumulative_cost[position]),
                fmt_opt(table.ranking.cumulative_percentage[position]),
            ],
        ));
    }
    html.push_str("    </table>\n");
}

fn render_cost_model(html: &mut String, analysis: &CostAnalysis, top: usize) {
    html.push_str("    <h2>Cost Model</h2>\n");
    match &analysis.model {
        Ok(fit) => {
            html.push_str(&format!(
                "    <p>Compute coef: {:.8}, DataTransfer coef: {:.4}, intercept: {:.4}, R&sup2;: {:.4}</p>\n",
                fit.coef_gb_seconds, fit.coef_data_transfer, fit.intercept, fit.r_squared
            ));
            html.push_str("    <table>\n");
            html.push_str(&header_row(&["Function", "Cost ($)", "Predicted ($)"]));
            for (row, r) in analysis.table.rows.iter().enumerate().take(top) {
                html.push_str(&data_row(
                    &r.record.function_name,
                    &[
                        fmt_opt(r.record.cost_usd),
                        format!("{:.2}", fit.predictions[row]),
                    ],
                ));
            }
            html.push_str("    </table>\n");
        }
        Err(error) => {
            html.push_str(&format!(
                "    <p class=\"note\">Cost model unavailable: {}</p>\n",
                escape_html(&error.to_string())
            ));
        }
    }
}

/// Generate the complete HTML report document
pub fn to_html(analysis: &CostAnalysis, thresholds: &Thresholds, top: usize) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>Serverless Cost Analysis</title>\n");
    html.push_str("    <style>");
    html.push_str(generate_styles());
    html.push_str("</style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str("    <h1>Serverless Cost Analysis</h1>\n");

    render_overview(&mut html, analysis, thresholds);
    render_top_contributors(&mut html, analysis, top);

    let rows = &analysis.table.rows;
    view_table(
        &mut html,
        "Memory Right-Sizing Candidates",
        &["Function", "Avg Duration (ms)", "Memory (MB)", "ms/MB", "Cost ($)"],
        &analysis.views.rightsizing_candidates,
        rows,
        |r| {
            vec![
                fmt_opt(r.record.avg_duration_ms),
                fmt_opt(r.record.memory_mb),
                fmt_opt4(r.duration_per_mb),
                fmt_opt(r.record.cost_usd),
            ]
        },
    );
    view_table(
        &mut html,
        "Provisioned Concurrency",
        &["Function", "Cold Start Rate", "Provisioned", "Cost ($)"],
        &analysis.views.provisioned_concurrency_functions,
        rows,
        |r| {
            vec![
                fmt_opt4(r.record.cold_start_rate),
                fmt_opt(r.record.provisioned_concurrency),
                fmt_opt(r.record.cost_usd),
            ]
        },
    );
    view_table(
        &mut html,
        "Low-Value Workloads",
        &["Function", "Invocations", "Invocation %", "Cost ($)"],
        &analysis.views.low_value_workloads,
        rows,
        |r| {
            vec![
                fmt_opt(r.record.invocations_per_month),
                fmt_opt(r.invocation_percentage),
                fmt_opt(r.record.cost_usd),
            ]
        },
    );

    render_cost_model(&mut html, analysis, top);

    view_table(
        &mut html,
        "Container Candidates",
        &["Function", "Avg Duration (ms)", "Memory (MB)", "Invocations", "Cost ($)"],
        &analysis.views.container_candidates,
        rows,
        |r| {
            vec![
                fmt_opt(r.record.avg_duration_ms),
                fmt_opt(r.record.memory_mb),
                fmt_opt(r.record.invocations_per_month),
                fmt_opt(r.record.cost_usd),
            ]
        },
    );

    html.push_str("    <div class=\"footer\">\n");
    html.push_str("        Generated by Costar - Serverless Cost Analyzer\n");
    html.push_str("    </div>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::record::FunctionRecord;

    fn record(name: &str, cost: f64) -> FunctionRecord {
        FunctionRecord {
            function_name: name.to_string(),
            environment: "production".to_string(),
            invocations_per_month: Some(1000.0),
            avg_duration_ms: Some(200.0),
            memory_mb: Some(512.0),
            data_transfer_gb: Some(cost / 10.0),
            cost_usd: Some(cost),
            ..FunctionRecord::default()
        }
    }

    fn sample_html() -> String {
        let analysis = analyze(
            vec![record("alpha", 100.0), record("beta", 50.0), record("gamma", 10.0)],
            &Thresholds::default(),
        );
        to_html(&analysis, &Thresholds::default(), 20)
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"test\""), "&quot;test&quot;");
        assert_eq!(escape_html("'test'"), "&#39;test&#39;");
    }

    #[test]
    fn test_html_basic_structure() {
        let html = sample_html();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("<table"));
    }

    #[test]
    fn test_html_contains_sections() {
        let html = sample_html();
        assert!(html.contains("Top Cost Contributors"));
        assert!(html.contains("Memory Right-Sizing Candidates"));
        assert!(html.contains("Provisioned Concurrency"));
        assert!(html.contains("Low-Value Workloads"));
        assert!(html.contains("Cost Model"));
        assert!(html.contains("Container Candidates"));
    }

    #[test]
    fn test_html_escapes_function_names() {
        let analysis = analyze(
            vec![
                record("<script>alert('x')</script>", 100.0),
                record("b", 50.0),
                record("c", 10.0),
            ],
            &Thresholds::default(),
        );
        let html = to_html(&analysis, &Thresholds::default(), 20);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_html_model_failure_note() {
        let analysis = analyze(vec![record("only", 5.0)], &Thresholds::default());
        let html = to_html(&analysis, &Thresholds::default(), 20);
        assert!(html.contains("Cost model unavailable"));
        assert!(html.contains("class=\"note\""));
    }

    #[test]
    fn test_html_overview_totals() {
        let html = sample_html();
        assert!(html.contains("Functions analyzed: 3"));
        assert!(html.contains("Total monthly cost: $160.00"));
    }
}
