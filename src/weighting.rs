use crate::config::PredictorConfig;

/// Exponentially weighted mean of the most recent gaps, rounded half away from zero.
///
/// Gaps are oldest first. The newest gap in the window weighs `1.0` and each
/// step back multiplies by `weight_decay_factor`. Falls back to the default
/// cycle length when fewer than `min_observations_for_non_default` gaps exist.
pub fn weighted_cycle_length(gaps: &[i64], config: &PredictorConfig) -> i64 {
    if gaps.len() < config.min_observations_for_non_default {
        tracing::trace!(gaps = gaps.len(), "too few cycle gaps, using default cycle length");
        return config.default_cycle_length;
    }

    let window = &gaps[gaps.len().saturating_sub(config.max_history_window)..];
    match weighted_mean(window, config.weight_decay_factor) {
        Some(avg) => (avg.round() as i64).max(1),
        None => config.default_cycle_length,
    }
}

/// Raw weighted mean over `values` (oldest first), or `None` when empty.
pub fn weighted_mean(values: &[i64], decay: f64) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (i, &value) in values.iter().enumerate() {
        let weight = decay.powi((n - 1 - i) as i32);
        weighted_sum += value as f64 * weight;
        weight_total += weight;
    }

    Some(weighted_sum / weight_total)
}

/// Plain mean of recent period durations, or the default when none were logged.
pub fn mean_period_length(period_lengths: &[i64], config: &PredictorConfig) -> i64 {
    if period_lengths.is_empty() {
        return config.default_period_length;
    }
    let avg = period_lengths.iter().sum::<i64>() as f64 / period_lengths.len() as f64;
    (avg.round() as i64).max(1)
}
