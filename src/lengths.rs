//! Turning a record history into day-count gaps and period durations.

use crate::config::PredictorConfig;
use crate::models::CycleRecord;

/// Gaps between consecutive start dates, oldest first.
///
/// Records are sorted by start date first. Gaps outside the configured sanity
/// bounds (duplicate or missed logs) are dropped, not clamped.
pub fn cycle_gaps(records: &[CycleRecord], config: &PredictorConfig) -> Vec<i64> {
    let mut starts: Vec<_> = records.iter().map(|r| r.start_date).collect();
    starts.sort();

    starts
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .filter(|&gap| {
            let valid = gap >= config.min_valid_gap && gap <= config.max_valid_gap;
            if !valid {
                tracing::trace!(gap, "discarding cycle gap outside sanity bounds");
            }
            valid
        })
        .collect()
}

/// Inclusive period durations of the most recent closed records, newest first.
pub fn recent_period_lengths(records: &[CycleRecord], config: &PredictorConfig) -> Vec<i64> {
    let mut closed: Vec<&CycleRecord> = records.iter().filter(|r| r.end_date.is_some()).collect();
    closed.sort_by_key(|r| r.start_date);

    closed
        .iter()
        .rev()
        .take(config.period_history)
        .filter_map(|r| r.period_length())
        .collect()
}
