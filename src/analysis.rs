//! Analysis orchestration
//!
//! Runs the pipeline stages in order (derive metrics, classify, summarize,
//! fit the cost model) and bundles every section output. A model-fit failure
//! is carried as data in the result so the other sections still render.

use crate::classify::{classify, CandidateViews};
use crate::config::Thresholds;
use crate::cost_model::{fit_cost_model, CostModelFit, ModelFitError};
use crate::metrics::{derive_metrics, EnrichedTable};
use crate::record::FunctionRecord;
use crate::stats::{cost_distribution, CostDistribution};

/// All section outputs of one analysis run
#[derive(Debug, Clone)]
pub struct CostAnalysis {
    pub table: EnrichedTable,
    pub views: CandidateViews,
    /// Distribution of the present cost values; `None` when every cost is absent
    pub distribution: Option<CostDistribution>,
    /// The fitted model, or the reportable reason the fit failed
    pub model: Result<CostModelFit, ModelFitError>,
}

/// Run the full pipeline over a loaded table
///
/// Pure and deterministic: the same records and thresholds always produce
/// the same analysis.
pub fn analyze(records: Vec<FunctionRecord>, thresholds: &Thresholds) -> CostAnalysis {
    let table = derive_metrics(records);
    let views = classify(&table, thresholds);

    let costs: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|row| row.record.cost_usd)
        .collect();
    let distribution = cost_distribution(&costs);

    let model = fit_cost_model(&table);
    if let Err(ref error) = model {
        tracing::warn!("cost model fit failed: {}", error);
    }

    CostAnalysis {
        table,
        views,
        distribution,
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, invocations: f64, duration_ms: f64, memory_mb: f64, dt: f64, cost: f64) -> FunctionRecord {
        FunctionRecord {
            function_name: name.to_string(),
            environment: "production".to_string(),
            invocations_per_month: Some(invocations),
            avg_duration_ms: Some(duration_ms),
            memory_mb: Some(memory_mb),
            data_transfer_gb: Some(dt),
            cost_usd: Some(cost),
            ..FunctionRecord::default()
        }
    }

    #[test]
    fn test_analyze_bundles_all_sections() {
        let records = vec![
            record("a", 1000.0, 200.0, 512.0, 5.0, 100.0),
            record("b", 500.0, 400.0, 1024.0, 2.0, 50.0),
            record("c", 200.0, 800.0, 2048.0, 1.0, 10.0),
            record("d", 100.0, 1600.0, 4096.0, 0.5, 5.0),
        ];
        let analysis = analyze(records, &Thresholds::default());

        assert_eq!(analysis.table.rows.len(), 4);
        assert_eq!(analysis.views.top_cost_contributors.len(), 4);
        assert!(analysis.distribution.is_some());
        assert!(analysis.model.is_ok());
    }

    #[test]
    fn test_model_failure_does_not_block_other_sections() {
        // Two rows: too few for the model, fine for everything else
        let records = vec![
            record("a", 1000.0, 200.0, 512.0, 5.0, 100.0),
            record("b", 500.0, 400.0, 1024.0, 2.0, 50.0),
        ];
        let analysis = analyze(records, &Thresholds::default());

        assert!(matches!(
            analysis.model,
            Err(ModelFitError::NotEnoughRows { rows: 2, .. })
        ));
        assert_eq!(analysis.views.top_cost_contributors, vec![0, 1]);
        assert!(analysis.distribution.is_some());
        assert_eq!(analysis.table.total_monthly_cost, 150.0);
    }

    #[test]
    fn test_analyze_deterministic() {
        let records = vec![
            record("a", 1000.0, 200.0, 512.0, 5.0, 100.0),
            record("b", 500.0, 400.0, 1024.0, 2.0, 50.0),
            record("c", 200.0, 800.0, 2048.0, 1.0, 10.0),
        ];
        let thresholds = Thresholds::default();
        let first = analyze(records.clone(), &thresholds);
        let second = analyze(records, &thresholds);

        assert_eq!(first.table, second.table);
        assert_eq!(first.views, second.views);
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn test_analyze_empty_table() {
        let analysis = analyze(vec![], &Thresholds::default());
        assert!(analysis.table.rows.is_empty());
        assert!(analysis.distribution.is_none());
        assert!(analysis.model.is_err());
    }
}
