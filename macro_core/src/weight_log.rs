//! Ordered, user-editable log of dated weight observations.
//!
//! Entries are kept newest-first, which is also the display order; positions
//! passed to [`WeightLog::remove`] refer to that order.

use crate::form::{check_positive, normalize_notes};
use crate::{Error, LogEntry, Result, TrendPoint};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// The weight log, newest entry first
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightLog {
    entries: Vec<LogEntry>,
}

impl WeightLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a weight stamped with today's local date
    pub fn append(&mut self, weight: f64, notes: Option<&str>) -> Result<LogEntry> {
        self.append_on(Local::now().date_naive(), weight, notes)
    }

    /// Record a weight for an explicit date
    ///
    /// Notes are trimmed and dropped when blank. The new entry goes to the
    /// front of the log.
    pub fn append_on(
        &mut self,
        date: NaiveDate,
        weight: f64,
        notes: Option<&str>,
    ) -> Result<LogEntry> {
        let weight = check_positive("weight", weight)
            .map_err(|_| Error::validation("Please enter a valid weight for the log."))?;

        let entry = LogEntry {
            date,
            weight,
            notes: normalize_notes(notes),
        };
        self.entries.insert(0, entry.clone());

        tracing::info!("Logged {} kg on {}", entry.weight, entry.date);
        Ok(entry)
    }

    /// Delete the entry at a display position
    ///
    /// # Errors
    ///
    /// `Error::Index` when `index` is out of range; the log is left unchanged.
    pub fn remove(&mut self, index: usize) -> Result<LogEntry> {
        if index >= self.entries.len() {
            return Err(Error::Index {
                index,
                len: self.entries.len(),
            });
        }

        let removed = self.entries.remove(index);
        tracing::info!("Removed log entry {} ({} kg)", index, removed.weight);
        Ok(removed)
    }

    /// Entries oldest-first as (date, weight) pairs
    pub fn to_chronological_series(&self) -> Vec<TrendPoint> {
        self.entries
            .iter()
            .rev()
            .map(|e| TrendPoint {
                date: e.date,
                weight: e.weight,
            })
            .collect()
    }

    /// Entries newest-first
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_append_prepends() {
        let mut log = WeightLog::new();
        log.append_on(day(1), 80.0, None).unwrap();
        log.append_on(day(2), 79.5, Some("  light dinner ")).unwrap();

        assert_eq!(log.len(), 2);
        let latest = log.latest().unwrap();
        assert_eq!(latest.weight, 79.5);
        assert_eq!(latest.notes.as_deref(), Some("light dinner"));
        assert_eq!(log.entries()[1].date, day(1));
    }

    #[test]
    fn test_append_stamps_today() {
        let mut log = WeightLog::new();
        let entry = log.append(70.0, Some("")).unwrap();
        assert_eq!(entry.date, Local::now().date_naive());
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_append_rejects_invalid_weight() {
        let mut log = WeightLog::new();
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = log.append_on(day(1), weight, None).unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_append_then_remove_restores_log() {
        let mut log = WeightLog::new();
        log.append_on(day(1), 80.0, None).unwrap();
        log.append_on(day(2), 79.0, Some("note")).unwrap();
        let before = log.clone();

        log.append_on(day(3), 78.4, None).unwrap();
        let removed = log.remove(0).unwrap();

        assert_eq!(removed.weight, 78.4);
        assert_eq!(log, before);
    }

    #[test]
    fn test_remove_by_display_position() {
        let mut log = WeightLog::new();
        log.append_on(day(1), 80.0, None).unwrap();
        log.append_on(day(2), 79.0, None).unwrap();
        log.append_on(day(3), 78.0, None).unwrap();

        let removed = log.remove(1).unwrap();
        assert_eq!(removed.date, day(2));

        let weights: Vec<f64> = log.entries().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![78.0, 80.0]);
    }

    #[test]
    fn test_remove_out_of_range_leaves_log_unchanged() {
        let mut log = WeightLog::new();
        log.append_on(day(1), 80.0, None).unwrap();
        let before = log.clone();

        match log.remove(5) {
            Err(Error::Index { index, len }) => {
                assert_eq!(index, 5);
                assert_eq!(len, 1);
            }
            other => panic!("Expected index error, got {:?}", other),
        }
        assert_eq!(log, before);

        assert!(WeightLog::new().remove(0).is_err());
    }

    #[test]
    fn test_chronological_series_is_oldest_first() {
        let mut log = WeightLog::new();
        log.append_on(day(1), 81.0, None).unwrap(); // A
        log.append_on(day(2), 80.5, None).unwrap(); // B
        log.append_on(day(3), 80.1, None).unwrap(); // C

        let series = log.to_chronological_series();
        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
        assert_eq!(series[0].weight, 81.0);

        // Storage order is untouched
        assert_eq!(log.latest().unwrap().date, day(3));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut log = WeightLog::new();
        log.append_on(day(4), 75.0, None).unwrap();
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"[{"date":"2024-01-04","weight":75.0}]"#);

        let parsed: WeightLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }
}
