use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Move `date` by `days`, saturating at the ends of the supported calendar.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(chrono::Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("cycle end {end} is before its start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("invalid record data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlowLevel {
    None,
    Light,
    Medium,
    Heavy,
}

/// One logged day, as recorded by the tracker's day entry form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayLog {
    pub date: NaiveDate,
    pub flow_level: FlowLevel,
}

/// One observed cycle, starting on the first day of bleeding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleRecord {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_confirmed: bool,
}

impl CycleRecord {
    /// Create a confirmed record, rejecting an end date before the start.
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>) -> Result<Self, RecordError> {
        let record = Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            is_confirmed: true,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        match self.end_date {
            Some(end) if end < self.start_date => Err(RecordError::EndBeforeStart {
                start: self.start_date,
                end,
            }),
            _ => Ok(()),
        }
    }

    /// Inclusive number of bleeding days, if the record has been closed.
    pub fn period_length(&self) -> Option<i64> {
        self.end_date.map(|end| (end - self.start_date).num_days() + 1)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

/// Closed range of calendar days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Forecast derived from a record history. Rebuilt on every call, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CyclePrediction {
    pub predicted_next_start: NaiveDate,
    pub predicted_cycle_length: i64,
    pub predicted_period_length: i64,
    pub estimated_ovulation_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
    pub confidence: Confidence,
    pub is_irregular: bool,
}

impl CyclePrediction {
    /// Last expected bleeding day of the predicted period.
    pub fn predicted_period_end(&self) -> NaiveDate {
        shift_days(self.predicted_next_start, (self.predicted_period_length - 1).max(0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleStats {
    pub total_cycles: usize,
    pub avg_cycle_length: Option<f32>,
    pub avg_period_length: Option<f32>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub last_period_start: Option<NaiveDate>,
    pub last_period_end: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn shift_days_saturates() {
        assert_eq!(shift_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(shift_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(shift_days(date("2026-03-10"), -9), date("2026-03-01"));
    }

    #[test]
    fn rejects_end_before_start() {
        let result = CycleRecord::new(date("2026-03-10"), Some(date("2026-03-09")));
        assert!(matches!(result, Err(RecordError::EndBeforeStart { .. })));
    }

    #[test]
    fn same_day_end_is_one_day_period() {
        let record = CycleRecord::new(date("2026-03-10"), Some(date("2026-03-10"))).unwrap();
        assert_eq!(record.period_length(), Some(1));
        assert!(record.is_confirmed);
    }

    #[test]
    fn open_record_has_no_period_length() {
        let record = CycleRecord::new(date("2026-03-10"), None).unwrap();
        assert_eq!(record.period_length(), None);
    }

    #[test]
    fn confidence_serializes_lowercase() {
        let json = serde_json::to_string(&Confidence::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let phase: Phase = serde_json::from_str("\"luteal\"").unwrap();
        assert_eq!(phase, Phase::Luteal);
    }

    #[test]
    fn interval_counts_both_ends() {
        let interval = DateInterval {
            start: date("2026-02-07"),
            end: date("2026-02-12"),
        };
        assert_eq!(interval.len_days(), 6);
        assert!(interval.contains(date("2026-02-12")));
        assert!(!interval.contains(date("2026-02-13")));
    }
}
