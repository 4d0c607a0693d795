use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning for the prediction engine. Immutable once handed to a `Predictor`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PredictorConfig {
    /// Per-step decay applied to older gaps in the weighted average.
    pub weight_decay_factor: f64,
    /// Most recent gaps considered by the weighted average.
    pub max_history_window: usize,
    /// Valid gaps needed before the default cycle length is abandoned.
    ///
    /// Also the boundary of the `low` confidence tier: a history that falls
    /// back to the default length is always `low`, so the two move together.
    pub min_observations_for_non_default: usize,
    /// Valid gaps needed (with regular cycles) for high confidence.
    pub high_confidence_observations: usize,
    pub luteal_phase_length: i64,
    pub fertile_window_span_days: i64,
    /// Days added on each side of the fertile window for irregular cycles.
    pub irregular_widening_days: i64,
    pub irregularity_cv_threshold: f64,
    pub default_cycle_length: i64,
    pub default_period_length: i64,
    /// Gaps outside `[min_valid_gap, max_valid_gap]` are discarded.
    pub min_valid_gap: i64,
    pub max_valid_gap: i64,
    /// Closed records used for the period length mean.
    pub period_history: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            weight_decay_factor: 0.85,
            max_history_window: 12,
            min_observations_for_non_default: 2,
            high_confidence_observations: 6,
            luteal_phase_length: 14,
            fertile_window_span_days: 6,
            irregular_widening_days: 2,
            irregularity_cv_threshold: 0.15,
            default_cycle_length: 28,
            default_period_length: 5,
            min_valid_gap: 10,
            max_valid_gap: 60,
            period_history: 6,
        }
    }
}

impl PredictorConfig {
    /// Parse a JSON override on top of the defaults, then validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn out_of_range(field: &'static str, value: f64) -> ConfigError {
            ConfigError::OutOfRange { field, value }
        }

        if !(self.weight_decay_factor > 0.0 && self.weight_decay_factor <= 1.0) {
            return Err(out_of_range("weight_decay_factor", self.weight_decay_factor));
        }
        if self.max_history_window == 0 {
            return Err(out_of_range("max_history_window", 0.0));
        }
        if self.min_observations_for_non_default == 0 {
            return Err(out_of_range("min_observations_for_non_default", 0.0));
        }
        if self.high_confidence_observations < self.min_observations_for_non_default {
            return Err(out_of_range(
                "high_confidence_observations",
                self.high_confidence_observations as f64,
            ));
        }
        if self.luteal_phase_length < 0 {
            return Err(out_of_range("luteal_phase_length", self.luteal_phase_length as f64));
        }
        if self.fertile_window_span_days < 1 {
            return Err(out_of_range(
                "fertile_window_span_days",
                self.fertile_window_span_days as f64,
            ));
        }
        if self.irregular_widening_days < 0 {
            return Err(out_of_range(
                "irregular_widening_days",
                self.irregular_widening_days as f64,
            ));
        }
        // The widened window must still close before the predicted start.
        if self.irregular_widening_days > self.luteal_phase_length {
            return Err(out_of_range(
                "irregular_widening_days",
                self.irregular_widening_days as f64,
            ));
        }
        if !(self.irregularity_cv_threshold >= 0.0 && self.irregularity_cv_threshold.is_finite()) {
            return Err(out_of_range(
                "irregularity_cv_threshold",
                self.irregularity_cv_threshold,
            ));
        }
        if self.default_cycle_length < 1 {
            return Err(out_of_range(
                "default_cycle_length",
                self.default_cycle_length as f64,
            ));
        }
        if self.default_period_length < 1 {
            return Err(out_of_range(
                "default_period_length",
                self.default_period_length as f64,
            ));
        }
        if self.min_valid_gap < 1 {
            return Err(out_of_range("min_valid_gap", self.min_valid_gap as f64));
        }
        if self.max_valid_gap < self.min_valid_gap {
            return Err(out_of_range("max_valid_gap", self.max_valid_gap as f64));
        }
        if self.period_history == 0 {
            return Err(out_of_range("period_history", 0.0));
        }
        Ok(())
    }
}
