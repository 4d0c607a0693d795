use chrono::NaiveDate;

use crate::config::{ConfigError, PredictorConfig};
use crate::lengths;
use crate::models::{shift_days, CyclePrediction, CycleRecord, CycleStats};
use crate::variability;
use crate::weighting;

/// Stateless prediction engine bound to one tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct Predictor {
    config: PredictorConfig,
}

impl Predictor {
    /// Bind a validated tuning. `Predictor::default()` is the infallible path.
    pub fn new(config: PredictorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Forecast the next cycle from every known record, in any order.
    ///
    /// Never fails: with no usable history it returns a low confidence
    /// guess built from the default lengths, anchored to `today` when there
    /// are no records at all.
    pub fn predict(&self, records: &[CycleRecord], today: NaiveDate) -> CyclePrediction {
        let config = &self.config;

        let gaps = lengths::cycle_gaps(records, config);
        let cycle_length = weighting::weighted_cycle_length(&gaps, config);
        let period_lengths = lengths::recent_period_lengths(records, config);
        let period_length = weighting::mean_period_length(&period_lengths, config);

        let variability = variability::classify(&gaps, config);

        let anchor = records.iter().map(|r| r.start_date).max();
        let predicted_next_start = match anchor {
            Some(last_start) => shift_days(last_start, cycle_length),
            None => shift_days(today, config.default_cycle_length),
        };

        let ovulation = shift_days(predicted_next_start, -config.luteal_phase_length);
        let mut fertile_start = shift_days(ovulation, -(config.fertile_window_span_days - 1));
        let mut fertile_end = ovulation;
        if variability.is_irregular {
            fertile_start = shift_days(fertile_start, -config.irregular_widening_days);
            fertile_end = shift_days(fertile_end, config.irregular_widening_days);
        }

        tracing::debug!(
            records = records.len(),
            valid_gaps = variability.observations,
            cv = ?variability.cv,
            cycle_length,
            period_length,
            next_start = %predicted_next_start,
            confidence = ?variability.confidence,
            irregular = variability.is_irregular,
            "cycle prediction computed"
        );

        CyclePrediction {
            predicted_next_start,
            predicted_cycle_length: cycle_length,
            predicted_period_length: period_length,
            estimated_ovulation_date: ovulation,
            fertile_window_start: fertile_start,
            fertile_window_end: fertile_end,
            confidence: variability.confidence,
            is_irregular: variability.is_irregular,
        }
    }

    /// Irregularity flag alone, without building a full prediction.
    pub fn is_irregular(&self, records: &[CycleRecord]) -> bool {
        let gaps = lengths::cycle_gaps(records, &self.config);
        variability::classify(&gaps, &self.config).is_irregular
    }

    /// Summary figures for the stats view.
    pub fn cycle_stats(&self, records: &[CycleRecord]) -> CycleStats {
        let Some(last) = records.iter().max_by_key(|r| r.start_date) else {
            return CycleStats {
                total_cycles: 0,
                avg_cycle_length: None,
                avg_period_length: None,
                shortest_cycle: None,
                longest_cycle: None,
                last_period_start: None,
                last_period_end: None,
            };
        };

        let gaps = lengths::cycle_gaps(records, &self.config);
        let period_lengths: Vec<i64> = records.iter().filter_map(|r| r.period_length()).collect();

        CycleStats {
            total_cycles: records.len(),
            avg_cycle_length: average(&gaps),
            avg_period_length: average(&period_lengths),
            shortest_cycle: gaps.iter().copied().min(),
            longest_cycle: gaps.iter().copied().max(),
            last_period_start: Some(last.start_date),
            last_period_end: last.end_date,
        }
    }
}

/// Predict with the default tuning.
pub fn predict(records: &[CycleRecord], today: NaiveDate) -> CyclePrediction {
    Predictor::default().predict(records, today)
}

pub fn is_irregular(records: &[CycleRecord]) -> bool {
    Predictor::default().is_irregular(records)
}

pub fn cycle_stats(records: &[CycleRecord]) -> CycleStats {
    Predictor::default().cycle_stats(records)
}

fn average(values: &[i64]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<i64>() as f32 / values.len() as f32)
    }
}
