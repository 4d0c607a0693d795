//! Deterministic cycle prediction for the cykel tracker.
//!
//! Feed [`predict`] every known [`CycleRecord`] and the current date; it
//! returns a [`CyclePrediction`] that the query helpers in [`queries`]
//! interpret (phase, days late, cycle day, fertile window).

pub mod config;
pub mod lengths;
pub mod models;
pub mod prediction;
pub mod queries;
pub mod records;
pub mod variability;
pub mod weighting;

pub use config::{ConfigError, PredictorConfig};
pub use models::{
    Confidence, CyclePrediction, CycleRecord, CycleStats, DateInterval, DayLog, FlowLevel, Phase,
    RecordError,
};
pub use prediction::{cycle_stats, is_irregular, predict, Predictor};
pub use queries::{
    current_phase, current_phase_with, cycle_day, days_late, fertile_window_interval,
    peak_fertility_interval,
};
