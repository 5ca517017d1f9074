//! Cost-distribution summary statistics for the report overview
//!
//! Uses trueno's SIMD vector primitives for the moment statistics and
//! aprender's DescriptiveStats (R-7 quantiles via QuickSelect) for the
//! percentiles, the same split the rest of the stack uses.

use aprender::stats::DescriptiveStats;
use trueno::Vector;

/// Summary of the per-function cost distribution
#[derive(Debug, Clone, PartialEq)]
pub struct CostDistribution {
    pub mean: f32,
    pub stddev: f32,
    pub min: f32,
    pub max: f32,
    pub median: f32, // P50
    pub p90: f32,
    pub p95: f32,
    pub p99: f32,
}

/// Summarize the present cost values; `None` when no row carries a cost
pub fn cost_distribution(costs: &[f64]) -> Option<CostDistribution> {
    if costs.is_empty() {
        return None;
    }

    let values: Vec<f32> = costs.iter().map(|&c| c as f32).collect();
    let v = Vector::from_slice(&values);
    let quantiles = DescriptiveStats::new(&v);

    Some(CostDistribution {
        mean: v.mean().unwrap_or(0.0),
        stddev: v.stddev().unwrap_or(0.0),
        min: v.min().unwrap_or(0.0),
        max: v.max().unwrap_or(0.0),
        median: quantiles.quantile(0.5).unwrap_or(0.0),
        p90: quantiles.quantile(0.9).unwrap_or(0.0),
        p95: quantiles.quantile(0.95).unwrap_or(0.0),
        p99: quantiles.quantile(0.99).unwrap_or(0.0),
    })
}
