//! On-demand questions the app asks about a prediction.

use chrono::NaiveDate;

use crate::config::PredictorConfig;
use crate::models::{shift_days, Confidence, CyclePrediction, DateInterval, Phase};

/// 1-based day of the current cycle. Never below 1, even for a future start.
pub fn cycle_day(period_start: NaiveDate, today: NaiveDate) -> i64 {
    ((today - period_start).num_days() + 1).max(1)
}

/// Days past the predicted start, or `None` when on time or early.
pub fn days_late(prediction: &CyclePrediction, today: NaiveDate) -> Option<i64> {
    if today <= prediction.predicted_next_start {
        None
    } else {
        Some((today - prediction.predicted_next_start).num_days())
    }
}

/// Phase of the cycle that began on `period_start`, using the default luteal length.
pub fn current_phase(
    period_start: NaiveDate,
    prediction: &CyclePrediction,
    today: NaiveDate,
) -> Phase {
    current_phase_with(period_start, prediction, today, &PredictorConfig::default())
}

pub fn current_phase_with(
    period_start: NaiveDate,
    prediction: &CyclePrediction,
    today: NaiveDate,
    config: &PredictorConfig,
) -> Phase {
    let day = cycle_day(period_start, today);
    let ovulation_day = prediction.predicted_cycle_length - config.luteal_phase_length;

    if day <= prediction.predicted_period_length {
        Phase::Menstrual
    } else if (ovulation_day - 1..=ovulation_day + 1).contains(&day) {
        Phase::Ovulation
    } else if day < ovulation_day - 1 {
        Phase::Follicular
    } else {
        Phase::Luteal
    }
}

/// Fertile window, hidden when a low confidence guess has nothing to back it.
pub fn fertile_window_interval(prediction: &CyclePrediction) -> Option<DateInterval> {
    if !shows_fertility(prediction) {
        return None;
    }
    Some(DateInterval {
        start: prediction.fertile_window_start,
        end: prediction.fertile_window_end,
    })
}

/// Peak fertility: the two days before estimated ovulation and the day itself.
pub fn peak_fertility_interval(prediction: &CyclePrediction) -> Option<DateInterval> {
    if !shows_fertility(prediction) {
        return None;
    }
    let ovulation = prediction.estimated_ovulation_date;
    Some(DateInterval {
        start: shift_days(ovulation, -2).max(prediction.fertile_window_start),
        end: ovulation,
    })
}

fn shows_fertility(prediction: &CyclePrediction) -> bool {
    !(prediction.confidence == Confidence::Low && !prediction.is_irregular)
}
