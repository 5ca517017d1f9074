//! Threshold-based candidate classification
//!
//! Five independent views over the enriched table, each a filtered
//! subsequence of row indices. Views only read; they can be computed in any
//! order. A row with an absent value in any field a predicate references
//! fails that predicate -- it is excluded, never an error.

use crate::config::Thresholds;
use crate::metrics::{EnrichedRecord, EnrichedTable};

/// The classified candidate views, as row indices into the enriched table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateViews {
    /// Whole table in cost-descending order
    pub top_cost_contributors: Vec<usize>,
    /// Rows whose cumulative cost share stays within the Pareto cutoff
    pub eighty_percent_count: usize,
    /// Over-provisioned production functions, cost-descending
    pub rightsizing_candidates: Vec<usize>,
    /// Functions with provisioned concurrency, input order
    pub provisioned_concurrency_functions: Vec<usize>,
    /// Rarely invoked but expensive functions, input order
    pub low_value_workloads: Vec<usize>,
    /// Long-running, memory-heavy, rarely invoked functions, input order
    pub container_candidates: Vec<usize>,
}

fn is_rightsizing_candidate(row: &EnrichedRecord, thresholds: &Thresholds) -> bool {
    matches!(row.duration_per_mb, Some(d) if d < thresholds.rightsizing_duration_per_mb)
        && matches!(row.record.memory_mb, Some(m) if m > thresholds.rightsizing_min_memory_mb)
        && row.record.environment == thresholds.rightsizing_environment
}

fn is_low_value_workload(row: &EnrichedRecord, thresholds: &Thresholds) -> bool {
    matches!(row.invocation_percentage, Some(p) if p < thresholds.low_value_invocation_pct)
        && matches!(row.record.cost_usd, Some(c) if c > thresholds.low_value_min_cost_usd)
}

fn is_container_candidate(row: &EnrichedRecord, thresholds: &Thresholds) -> bool {
    matches!(row.record.avg_duration_ms, Some(d) if d > thresholds.container_min_duration_ms)
        && matches!(row.record.memory_mb, Some(m) if m > thresholds.container_min_memory_mb)
        && matches!(row.record.invocations_per_month, Some(i) if i < thresholds.container_max_invocations)
}

fn filter_rows<F>(table: &EnrichedTable, predicate: F) -> Vec<usize>
where
    F: Fn(&EnrichedRecord) -> bool,
{
    (0..table.rows.len())
        .filter(|&i| predicate(&table.rows[i]))
        .collect()
}

/// Apply all classification predicates to the enriched table
pub fn classify(table: &EnrichedTable, thresholds: &Thresholds) -> CandidateViews {
    let eighty_percent_count = table
        .ranking
        .cumulative_percentage
        .iter()
        .filter(|p| matches!(p, Some(pct) if *pct <= thresholds.pareto_cutoff_pct))
        .count();

    // Cost-descending views reuse the ranking order so ties stay stable
    let rightsizing_candidates: Vec<usize> = table
        .ranking
        .order
        .iter()
        .copied()
        .filter(|&i| is_rightsizing_candidate(&table.rows[i], thresholds))
        .collect();

    let views = CandidateViews {
        top_cost_contributors: table.ranking.order.clone(),
        eighty_percent_count,
        rightsizing_candidates,
        provisioned_concurrency_functions: filter_rows(table, |row| {
            matches!(row.record.provisioned_concurrency, Some(pc) if pc > 0.0)
        }),
        low_value_workloads: filter_rows(table, |row| is_low_value_workload(row, thresholds)),
        container_candidates: filter_rows(table, |row| is_container_candidate(row, thresholds)),
    };

    tracing::debug!(
        rightsizing = views.rightsizing_candidates.len(),
        provisioned = views.provisioned_concurrency_functions.len(),
        low_value = views.low_value_workloads.len(),
        containers = views.container_candidates.len(),
        "classified candidate views"
    );

    views
}
