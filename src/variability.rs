//! Irregularity and confidence classification over all valid cycle gaps.

use crate::config::PredictorConfig;
use crate::models::Confidence;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variability {
    pub observations: usize,
    /// Coefficient of variation, when at least two gaps exist.
    pub cv: Option<f64>,
    pub is_irregular: bool,
    pub confidence: Confidence,
}

pub fn classify(gaps: &[i64], config: &PredictorConfig) -> Variability {
    let observations = gaps.len();
    let cv = coefficient_of_variation(gaps);
    let is_irregular = cv.is_some_and(|cv| cv > config.irregularity_cv_threshold);

    let confidence = if observations < config.min_observations_for_non_default {
        Confidence::Low
    } else if observations < config.high_confidence_observations || is_irregular {
        Confidence::Medium
    } else {
        Confidence::High
    };

    Variability {
        observations,
        cv,
        is_irregular,
        confidence,
    }
}

/// Population standard deviation over mean; `None` below two values.
pub fn coefficient_of_variation(values: &[i64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values);
    if avg <= 0.0 {
        return None;
    }
    Some(std_deviation(values, avg) / avg)
}

fn mean(values: &[i64]) -> f64 {
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

fn std_deviation(values: &[i64], avg: f64) -> f64 {
    let variance = values
        .iter()
        .map(|&v| (v as f64 - avg).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
