//! Metrics deriver: per-row derived fields, totals, and cost ranking
//!
//! Pure stage: consumes the loaded records and returns an enriched table.
//! Input fields are never mutated; every derived field is an explicit
//! `Option<f64>` so that absent values stay absent instead of turning into
//! NaN or infinity inside downstream predicates.

use crate::record::FunctionRecord;

/// A record plus its derived per-row fields
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: FunctionRecord,
    /// AvgDurationMs / MemoryMB; absent if memory is absent or zero
    pub duration_per_mb: Option<f64>,
    /// Share of total monthly invocations, in percent
    pub invocation_percentage: Option<f64>,
    /// InvocationsPerMonth * (AvgDurationMs/1000) * (MemoryMB/1024)
    pub calculated_gb_seconds: Option<f64>,
}

/// Cost ordering and running sums, defined over the cost-sorted order only
#[derive(Debug, Clone, PartialEq)]
pub struct CostRanking {
    /// Row indices sorted by cost descending; ties and absent-cost rows keep
    /// input order, absent costs after all present costs
    pub order: Vec<usize>,
    /// Running cost sum along `order`; absent cost contributes 0
    pub cumulative_cost: Vec<f64>,
    /// Running share of the total cost; all-absent when the total is 0
    pub cumulative_percentage: Vec<Option<f64>>,
}

/// The enriched table handed to the classifier, cost model, and reporter
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTable {
    pub rows: Vec<EnrichedRecord>,
    pub total_monthly_cost: f64,
    pub total_invocations: f64,
    pub ranking: CostRanking,
}

impl EnrichedTable {
    /// Position of each row within the cost-sorted order
    pub fn rank_of(&self) -> Vec<usize> {
        let mut rank = vec![0; self.rows.len()];
        for (position, &row) in self.ranking.order.iter().enumerate() {
            rank[row] = position;
        }
        rank
    }
}

fn duration_per_mb(record: &FunctionRecord) -> Option<f64> {
    let duration = record.avg_duration_ms?;
    let memory = record.memory_mb?;
    if memory == 0.0 {
        None
    } else {
        Some(duration / memory)
    }
}

fn calculated_gb_seconds(record: &FunctionRecord) -> Option<f64> {
    let invocations = record.invocations_per_month?;
    let duration = record.avg_duration_ms?;
    let memory = record.memory_mb?;
    Some(invocations * (duration / 1000.0) * (memory / 1024.0))
}

fn cost_ranking(records: &[FunctionRecord], total_monthly_cost: f64) -> CostRanking {
    let mut order: Vec<usize> = (0..records.len()).collect();
    // Stable sort: ties and absent-cost rows keep input order
    order.sort_by(|&a, &b| match (records[a].cost_usd, records[b].cost_usd) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut cumulative_cost = Vec::with_capacity(order.len());
    let mut cumulative_percentage = Vec::with_capacity(order.len());
    let mut running = 0.0;
    for &row in &order {
        running += records[row].cost_usd.unwrap_or(0.0);
        cumulative_cost.push(running);
        cumulative_percentage.push(if total_monthly_cost == 0.0 {
            None
        } else {
            Some(100.0 * running / total_monthly_cost)
        });
    }

    CostRanking {
        order,
        cumulative_cost,
        cumulative_percentage,
    }
}

/// Derive all per-row metrics, totals, and the cost ranking
pub fn derive_metrics(records: Vec<FunctionRecord>) -> EnrichedTable {
    let total_monthly_cost: f64 = records.iter().filter_map(|r| r.cost_usd).sum();
    let total_invocations: f64 = records.iter().filter_map(|r| r.invocations_per_month).sum();

    let ranking = cost_ranking(&records, total_monthly_cost);

    let rows = records
        .into_iter()
        .map(|record| {
            let invocation_percentage = match (record.invocations_per_month, total_invocations) {
                (Some(invocations), total) if total != 0.0 => Some(100.0 * invocations / total),
                _ => None,
            };
            EnrichedRecord {
                duration_per_mb: duration_per_mb(&record),
                invocation_percentage,
                calculated_gb_seconds: calculated_gb_seconds(&record),
                record,
            }
        })
        .collect();

    tracing::debug!(
        total_monthly_cost,
        total_invocations,
        "derived metrics for enriched table"
    );

    EnrichedTable {
        rows,
        total_monthly_cost,
        total_invocations,
        ranking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cost: Option<f64>) -> FunctionRecord {
        FunctionRecord {
            function_name: name.to_string(),
            environment: "production".to_string(),
            cost_usd: cost,
            ..FunctionRecord::default()
        }
    }

    fn full_record(
        name: &str,
        invocations: f64,
        duration_ms: f64,
        memory_mb: f64,
        cost: f64,
    ) -> FunctionRecord {
        FunctionRecord {
            function_name: name.to_string(),
            environment: "production".to_string(),
            invocations_per_month: Some(invocations),
            avg_duration_ms: Some(duration_ms),
            memory_mb: Some(memory_mb),
            cost_usd: Some(cost),
            ..FunctionRecord::default()
        }
    }

    #[test]
    fn test_duration_per_mb() {
        let table = derive_metrics(vec![full_record("a", 100.0, 300.0, 1000.0, 5.0)]);
        assert_eq!(table.rows[0].duration_per_mb, Some(0.3));
    }

    #[test]
    fn test_duration_per_mb_zero_memory_is_absent() {
        let table = derive_metrics(vec![full_record("a", 100.0, 300.0, 0.0, 5.0)]);
        assert_eq!(table.rows[0].duration_per_mb, None);
    }

    #[test]
    fn test_duration_per_mb_absent_memory_is_absent() {
        let mut r = full_record("a", 100.0, 300.0, 512.0, 5.0);
        r.memory_mb = None;
        let table = derive_metrics(vec![r]);
        assert_eq!(table.rows[0].duration_per_mb, None);
    }

    #[test]
    fn test_calculated_gb_seconds() {
        // 1000 invocations * 2 s * 0.5 GB = 1000 GB-seconds
        let table = derive_metrics(vec![full_record("a", 1000.0, 2000.0, 512.0, 5.0)]);
        assert_eq!(table.rows[0].calculated_gb_seconds, Some(1000.0));
    }

    #[test]
    fn test_calculated_gb_seconds_absent_factor_propagates() {
        let mut r = full_record("a", 1000.0, 2000.0, 512.0, 5.0);
        r.invocations_per_month = None;
        let table = derive_metrics(vec![r]);
        assert_eq!(table.rows[0].calculated_gb_seconds, None);
    }

    #[test]
    fn test_invocation_percentage_sums_to_100() {
        let table = derive_metrics(vec![
            full_record("a", 300.0, 1.0, 1.0, 1.0),
            full_record("b", 700.0, 1.0, 1.0, 1.0),
        ]);
        assert_eq!(table.rows[0].invocation_percentage, Some(30.0));
        assert_eq!(table.rows[1].invocation_percentage, Some(70.0));
    }

    #[test]
    fn test_invocation_percentage_zero_total_is_absent() {
        let mut r = full_record("a", 0.0, 1.0, 1.0, 1.0);
        r.invocations_per_month = Some(0.0);
        let table = derive_metrics(vec![r]);
        assert_eq!(table.rows[0].invocation_percentage, None);
    }

    #[test]
    fn test_totals_treat_absent_as_zero() {
        let table = derive_metrics(vec![
            record("a", Some(100.0)),
            record("b", None),
            record("c", Some(60.0)),
        ]);
        assert_eq!(table.total_monthly_cost, 160.0);
        assert_eq!(table.total_invocations, 0.0);
    }

    #[test]
    fn test_cost_ranking_scenario() {
        // Costs [100, 50, 10]: order unchanged, cumulative [100, 150, 160]
        let table = derive_metrics(vec![
            record("a", Some(100.0)),
            record("b", Some(50.0)),
            record("c", Some(10.0)),
        ]);
        assert_eq!(table.ranking.order, vec![0, 1, 2]);
        assert_eq!(table.ranking.cumulative_cost, vec![100.0, 150.0, 160.0]);
        let pct: Vec<f64> = table
            .ranking
            .cumulative_percentage
            .iter()
            .map(|p| p.unwrap())
            .collect();
        assert!((pct[0] - 62.5).abs() < 1e-9);
        assert!((pct[1] - 93.75).abs() < 1e-9);
        assert!((pct[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cost_ranking_sorts_descending() {
        let table = derive_metrics(vec![
            record("low", Some(10.0)),
            record("high", Some(100.0)),
            record("mid", Some(50.0)),
        ]);
        assert_eq!(table.ranking.order, vec![1, 2, 0]);
    }

    #[test]
    fn test_cost_ranking_ties_stable() {
        let table = derive_metrics(vec![
            record("first", Some(50.0)),
            record("second", Some(50.0)),
            record("third", Some(50.0)),
        ]);
        assert_eq!(table.ranking.order, vec![0, 1, 2]);
    }

    #[test]
    fn test_cost_ranking_absent_costs_last() {
        let table = derive_metrics(vec![
            record("absent", None),
            record("cheap", Some(1.0)),
            record("pricey", Some(9.0)),
        ]);
        assert_eq!(table.ranking.order, vec![2, 1, 0]);
        // Absent cost contributes 0, so the last cumulative equals the total
        assert_eq!(*table.ranking.cumulative_cost.last().unwrap(), 10.0);
        assert_eq!(
            *table.ranking.cumulative_percentage.last().unwrap(),
            Some(100.0)
        );
    }

    #[test]
    fn test_cumulative_percentage_absent_when_total_zero() {
        let table = derive_metrics(vec![record("a", None), record("b", None)]);
        assert_eq!(table.total_monthly_cost, 0.0);
        assert!(table
            .ranking
            .cumulative_percentage
            .iter()
            .all(|p| p.is_none()));
    }

    #[test]
    fn test_rank_of_inverts_order() {
        let table = derive_metrics(vec![
            record("low", Some(10.0)),
            record("high", Some(100.0)),
        ]);
        let rank = table.rank_of();
        assert_eq!(rank[1], 0);
        assert_eq!(rank[0], 1);
    }

    #[test]
    fn test_empty_table() {
        let table = derive_metrics(vec![]);
        assert!(table.rows.is_empty());
        assert!(table.ranking.order.is_empty());
        assert_eq!(table.total_monthly_cost, 0.0);
    }
}
