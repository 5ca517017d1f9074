//! Classification threshold configuration
//!
//! The candidate views are driven by fixed business-rule thresholds. The
//! defaults are the established rules; a TOML file passed via `--config`
//! can override any of them without touching the predicates.

use serde::{Deserialize, Serialize};

/// Thresholds for the candidate classification views
///
/// # Example
/// ```
/// use costar::config::Thresholds;
///
/// let thresholds = Thresholds::default();
/// assert_eq!(thresholds.pareto_cutoff_pct, 80.0);
/// assert!(thresholds.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Right-sizing: flag functions running under this many ms per MB
    pub rightsizing_duration_per_mb: f64,

    /// Right-sizing: only consider functions above this memory allocation
    pub rightsizing_min_memory_mb: f64,

    /// Right-sizing: only consider functions in this environment
    pub rightsizing_environment: String,

    /// Low-value: invocation share below this percentage of the total
    pub low_value_invocation_pct: f64,

    /// Low-value: monthly cost above this many USD
    pub low_value_min_cost_usd: f64,

    /// Containerization: average duration above this many ms
    pub container_min_duration_ms: f64,

    /// Containerization: memory allocation above this many MB
    pub container_min_memory_mb: f64,

    /// Containerization: fewer monthly invocations than this
    pub container_max_invocations: f64,

    /// Cumulative-cost percentage counted as the "top" contributors
    pub pareto_cutoff_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            rightsizing_duration_per_mb: 0.3,
            rightsizing_min_memory_mb: 1024.0,
            rightsizing_environment: "production".to_string(),
            low_value_invocation_pct: 1.0,
            low_value_min_cost_usd: 10.0,
            container_min_duration_ms: 3000.0,
            container_min_memory_mb: 2048.0,
            container_max_invocations: 1000.0,
            pareto_cutoff_pct: 80.0,
        }
    }
}

impl Thresholds {
    /// Validate threshold values
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("rightsizing_duration_per_mb", self.rightsizing_duration_per_mb),
            ("rightsizing_min_memory_mb", self.rightsizing_min_memory_mb),
            ("low_value_invocation_pct", self.low_value_invocation_pct),
            ("low_value_min_cost_usd", self.low_value_min_cost_usd),
            ("container_min_duration_ms", self.container_min_duration_ms),
            ("container_min_memory_mb", self.container_min_memory_mb),
            ("container_max_invocations", self.container_max_invocations),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be non-negative, got {}", name, value));
            }
        }

        if !self.pareto_cutoff_pct.is_finite()
            || self.pareto_cutoff_pct <= 0.0
            || self.pareto_cutoff_pct > 100.0
        {
            return Err(format!(
                "pareto_cutoff_pct must be in (0, 100], got {}",
                self.pareto_cutoff_pct
            ));
        }

        if self.rightsizing_environment.trim().is_empty() {
            return Err("rightsizing_environment must not be empty".to_string());
        }

        Ok(())
    }
}
