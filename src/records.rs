//! Boundary helpers for the collaborators that own record storage.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{CycleRecord, DayLog, FlowLevel, RecordError};

/// Flow days at most this far apart belong to the same period.
const MAX_FLOW_GAP_DAYS: i64 = 2;

/// Parse a JSON array of records, rejecting any that end before they start.
pub fn from_json(json: &str) -> Result<Vec<CycleRecord>, RecordError> {
    let records: Vec<CycleRecord> = serde_json::from_str(json)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

pub fn to_json(records: &[CycleRecord]) -> Result<String, RecordError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Rebuild cycle records from logged flow days.
///
/// The latest period stays open while its last flow day is within two days of `today`.
pub fn rebuild_from_flow(day_logs: &[DayLog], today: NaiveDate) -> Vec<CycleRecord> {
    let mut flow_days: Vec<NaiveDate> = day_logs
        .iter()
        .filter(|l| l.flow_level != FlowLevel::None)
        .map(|l| l.date)
        .collect();
    flow_days.sort();
    flow_days.dedup();

    let Some((&first, rest)) = flow_days.split_first() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    let mut cycle_start = first;
    let mut cycle_end = first;

    for &day in rest {
        if (day - cycle_end).num_days() <= MAX_FLOW_GAP_DAYS {
            cycle_end = day;
        } else {
            records.push(confirmed(cycle_start, Some(cycle_end)));
            cycle_start = day;
            cycle_end = day;
        }
    }

    let last_end = if (today - cycle_end).num_days() <= MAX_FLOW_GAP_DAYS {
        None
    } else {
        Some(cycle_end)
    };
    records.push(confirmed(cycle_start, last_end));

    tracing::debug!(
        flow_days = flow_days.len(),
        records = records.len(),
        "rebuilt cycle records from flow logs"
    );
    records
}

/// The most recent confirmed record that has not been closed yet.
pub fn active_cycle(records: &[CycleRecord]) -> Option<&CycleRecord> {
    records
        .iter()
        .filter(|r| r.is_confirmed && r.end_date.is_none())
        .max_by_key(|r| r.start_date)
}

fn confirmed(start_date: NaiveDate, end_date: Option<NaiveDate>) -> CycleRecord {
    CycleRecord {
        id: Uuid::new_v4(),
        start_date,
        end_date,
        is_confirmed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn flow(s: &str, flow_level: FlowLevel) -> DayLog {
        DayLog {
            date: date(s),
            flow_level,
        }
    }

    #[test]
    fn groups_flow_days_into_periods() {
        let logs = vec![
            flow("2026-01-01", FlowLevel::Heavy),
            flow("2026-01-02", FlowLevel::Medium),
            flow("2026-01-04", FlowLevel::Light),
            flow("2026-01-15", FlowLevel::None),
            flow("2026-01-29", FlowLevel::Heavy),
            flow("2026-01-31", FlowLevel::Light),
        ];
        let records = rebuild_from_flow(&logs, date("2026-03-01"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].start_date, date("2026-01-01"));
        assert_eq!(records[0].end_date, Some(date("2026-01-04")));
        assert_eq!(records[1].start_date, date("2026-01-29"));
        assert_eq!(records[1].end_date, Some(date("2026-01-31")));
        assert!(records.iter().all(|r| r.is_confirmed));
    }

    #[test]
    fn recent_flow_keeps_last_period_open() {
        let logs = vec![
            flow("2026-03-01", FlowLevel::Heavy),
            flow("2026-03-02", FlowLevel::Medium),
        ];
        let records = rebuild_from_flow(&logs, date("2026-03-04"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].end_date, None);
        assert_eq!(active_cycle(&records), Some(&records[0]));
    }

    #[test]
    fn no_flow_no_records() {
        let logs = vec![flow("2026-03-01", FlowLevel::None)];
        assert!(rebuild_from_flow(&logs, date("2026-03-04")).is_empty());
    }

    #[test]
    fn active_cycle_skips_unconfirmed() {
        let mut open = CycleRecord::new(date("2026-02-01"), None).unwrap();
        open.is_confirmed = false;
        let closed = CycleRecord::new(date("2026-01-01"), Some(date("2026-01-05"))).unwrap();
        assert_eq!(active_cycle(&[closed, open]), None);
    }

    #[test]
    fn json_import_validates_dates() {
        let json = r#"[
            {"id": "8d7f3c1e-2b4a-4f6e-9c1d-0a1b2c3d4e5f",
             "start_date": "2026-03-10", "end_date": "2026-03-08"}
        ]"#;
        assert!(matches!(
            from_json(json),
            Err(RecordError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn json_export_reimports() {
        let records = vec![
            CycleRecord::new(date("2026-01-01"), Some(date("2026-01-05"))).unwrap(),
            CycleRecord::new(date("2026-01-29"), None).unwrap(),
        ];
        let json = to_json(&records).unwrap();
        assert_eq!(from_json(&json).unwrap(), records);
    }

    #[test]
    fn json_import_rejects_garbage_dates() {
        let json = r#"[{"id": "8d7f3c1e-2b4a-4f6e-9c1d-0a1b2c3d4e5f", "start_date": "not-a-date"}]"#;
        assert!(matches!(from_json(json), Err(RecordError::Parse(_))));
    }
}
