//! Two-feature linear cost model
//!
//! Fits `CostUSD ~ b0 + b1 * CalculatedGBSeconds + b2 * DataTransferGB` by
//! ordinary least squares over the whole table. Absent values in the two
//! feature columns and in the target are imputed to 0 before fitting; this
//! is the one place in the pipeline where absent is coerced, and it is
//! deliberate so the fit sees every row.
//!
//! The normal equations are solved directly: the design is only 3x3, so
//! Gaussian elimination with partial pivoting is exact enough in f64 and
//! makes the degenerate cases (too few rows, collinear features) first-class
//! errors instead of silent garbage.

use crate::metrics::EnrichedTable;
use thiserror::Error;

/// Minimum rows required to fit three coefficients
pub const MIN_ROWS: usize = 3;

/// Pivot cutoff relative to the largest normal-matrix entry
const PIVOT_EPSILON: f64 = 1e-12;

/// Errors from fitting the cost model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelFitError {
    #[error("not enough rows to fit the cost model: need at least {required}, got {rows}")]
    NotEnoughRows { rows: usize, required: usize },

    #[error("degenerate design matrix: feature columns are constant or collinear")]
    Degenerate,
}

/// A fitted cost model with per-row predictions
#[derive(Debug, Clone, PartialEq)]
pub struct CostModelFit {
    pub intercept: f64,
    /// Coefficient on CalculatedGBSeconds
    pub coef_gb_seconds: f64,
    /// Coefficient on DataTransferGB
    pub coef_data_transfer: f64,
    /// Predicted cost per row, in input order, from the imputed features
    pub predictions: Vec<f64>,
    /// Coefficient of determination over the imputed target; 0 when the
    /// target has no variance
    pub r_squared: f64,
}

impl CostModelFit {
    /// Apply the fitted model to one (imputed) feature pair
    pub fn predict(&self, calculated_gb_seconds: f64, data_transfer_gb: f64) -> f64 {
        self.intercept
            + self.coef_gb_seconds * calculated_gb_seconds
            + self.coef_data_transfer * data_transfer_gb
    }
}

/// Solve a 3x3 linear system by Gaussian elimination with partial pivoting
fn solve_3x3(mut a: [[f64; 3]; 3], mut b: [f64; 3]) -> Result<[f64; 3], ModelFitError> {
    let scale = a
        .iter()
        .flatten()
        .fold(0.0_f64, |acc, &entry| acc.max(entry.abs()));
    if scale == 0.0 {
        return Err(ModelFitError::Degenerate);
    }
    let cutoff = PIVOT_EPSILON * scale;

    for column in 0..3 {
        let pivot_row = (column..3)
            .max_by(|&r, &s| {
                a[r][column]
                    .abs()
                    .partial_cmp(&a[s][column].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or(ModelFitError::Degenerate)?;
        if a[pivot_row][column].abs() <= cutoff {
            return Err(ModelFitError::Degenerate);
        }
        a.swap(column, pivot_row);
        b.swap(column, pivot_row);

        for row in (column + 1)..3 {
            let factor = a[row][column] / a[column][column];
            for k in column..3 {
                a[row][k] -= factor * a[column][k];
            }
            b[row] -= factor * b[column];
        }
    }

    let mut x = [0.0; 3];
    for row in (0..3).rev() {
        let mut sum = b[row];
        for k in (row + 1)..3 {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Ok(x)
}

/// Fit the cost model over every row of the enriched table
pub fn fit_cost_model(table: &EnrichedTable) -> Result<CostModelFit, ModelFitError> {
    let n = table.rows.len();
    if n < MIN_ROWS {
        return Err(ModelFitError::NotEnoughRows {
            rows: n,
            required: MIN_ROWS,
        });
    }

    // Imputed design: [1, gb_seconds, data_transfer] per row
    let features: Vec<(f64, f64)> = table
        .rows
        .iter()
        .map(|row| {
            (
                row.calculated_gb_seconds.unwrap_or(0.0),
                row.record.data_transfer_gb.unwrap_or(0.0),
            )
        })
        .collect();
    let targets: Vec<f64> = table
        .rows
        .iter()
        .map(|row| row.record.cost_usd.unwrap_or(0.0))
        .collect();

    // Normal equations: (X^T X) beta = X^T y
    let mut xtx = [[0.0_f64; 3]; 3];
    let mut xty = [0.0_f64; 3];
    for (&(gbs, dt), &cost) in features.iter().zip(&targets) {
        let x = [1.0, gbs, dt];
        for i in 0..3 {
            for j in 0..3 {
                xtx[i][j] += x[i] * x[j];
            }
            xty[i] += x[i] * cost;
        }
    }

    let [intercept, coef_gb_seconds, coef_data_transfer] = solve_3x3(xtx, xty)?;

    let fit = CostModelFit {
        intercept,
        coef_gb_seconds,
        coef_data_transfer,
        predictions: Vec::new(),
        r_squared: 0.0,
    };

    let predictions: Vec<f64> = features
        .iter()
        .map(|&(gbs, dt)| fit.predict(gbs, dt))
        .collect();

    let mean = targets.iter().sum::<f64>() / n as f64;
    let ss_total: f64 = targets.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_residual: f64 = targets
        .iter()
        .zip(&predictions)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    let r_squared = if ss_total > 0.0 {
        1.0 - ss_residual / ss_total
    } else {
        0.0
    };

    tracing::debug!(
        intercept,
        coef_gb_seconds,
        coef_data_transfer,
        r_squared,
        "fitted cost model"
    );

    Ok(CostModelFit {
        predictions,
        r_squared,
        ..fit
    })
}
