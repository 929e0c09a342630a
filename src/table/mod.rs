//! Tabular views over normalized measurement records.

use crate::types::measurement::MeasurementRecord;
use chrono::{DateTime, Utc};
use log::warn;
use std::collections::{BTreeMap, HashSet};

/// The most recent reading for one parameter, averaged across the stations
/// that reported at the latest timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestMeasurement {
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

/// Timestamp to parameter to mean value mapping.
pub type PivotTable = BTreeMap<DateTime<Utc>, BTreeMap<String, f64>>;

/// An ordered collection of measurement records, unique on
/// `(timestamp, parameter, location)` and sorted ascending by timestamp.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    records: Vec<MeasurementRecord>,
}

impl MeasurementTable {
    /// Builds a table from normalized records: duplicates on
    /// `(timestamp, parameter, location)` are dropped keeping the first
    /// occurrence, and rows are stably sorted by timestamp. Returns `None`
    /// when no rows remain.
    pub fn from_records(records: Vec<MeasurementRecord>) -> Option<Self> {
        if records.is_empty() {
            warn!("No measurement records to tabulate");
            return None;
        }

        let mut seen: HashSet<(DateTime<Utc>, String, i64)> = HashSet::new();
        let mut rows: Vec<MeasurementRecord> = records
            .into_iter()
            .filter(|record| {
                seen.insert((record.timestamp, record.parameter.clone(), record.location_id))
            })
            .collect();
        rows.sort_by_key(|record| record.timestamp);

        Some(Self { records: rows })
    }

    /// The deduplicated rows, ascending by timestamp.
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The latest reading per parameter: only rows at the table's maximum
    /// timestamp count, and same-timestamp readings of one parameter are
    /// averaged. The unit is taken from the first row of each group.
    pub fn latest_by_parameter(&self) -> BTreeMap<String, LatestMeasurement> {
        let Some(latest) = self.records.iter().map(|record| record.timestamp).max() else {
            return BTreeMap::new();
        };

        let mut groups: BTreeMap<&str, (f64, usize, &str)> = BTreeMap::new();
        for record in self.records.iter().filter(|record| record.timestamp == latest) {
            let entry = groups
                .entry(record.parameter.as_str())
                .or_insert((0.0, 0, record.unit.as_str()));
            entry.0 += record.value;
            entry.1 += 1;
        }

        groups
            .into_iter()
            .map(|(parameter, (sum, count, unit))| {
                (
                    parameter.to_string(),
                    LatestMeasurement {
                        value: sum / count as f64,
                        unit: unit.to_string(),
                        timestamp: latest,
                    },
                )
            })
            .collect()
    }

    /// Pivots the table: one row per timestamp, one column per parameter,
    /// mean-aggregating value collisions.
    pub fn pivot_by_parameter(&self) -> PivotTable {
        let mut sums: BTreeMap<DateTime<Utc>, BTreeMap<String, (f64, usize)>> = BTreeMap::new();
        for record in &self.records {
            let cell = sums
                .entry(record.timestamp)
                .or_default()
                .entry(record.parameter.clone())
                .or_insert((0.0, 0));
            cell.0 += record.value;
            cell.1 += 1;
        }

        sums.into_iter()
            .map(|(timestamp, parameters)| {
                (
                    timestamp,
                    parameters
                        .into_iter()
                        .map(|(parameter, (sum, count))| (parameter, sum / count as f64))
                        .collect(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 7, hour, 0, 0).unwrap()
    }

    fn record(parameter: &str, value: f64, timestamp: DateTime<Utc>, location_id: i64) -> MeasurementRecord {
        MeasurementRecord {
            parameter: parameter.to_string(),
            value,
            unit: "μg/m³".to_string(),
            timestamp,
            location_name: format!("station {location_id}"),
            location_id,
            city: "São Paulo".to_string(),
            country_code: "BR".to_string(),
        }
    }

    #[test]
    fn empty_input_yields_no_table() {
        assert!(MeasurementTable::from_records(Vec::new()).is_none());
    }

    #[test]
    fn deduplicates_on_timestamp_parameter_location() {
        let table = MeasurementTable::from_records(vec![
            record("pm25", 10.0, at(12), 1),
            record("pm25", 99.0, at(12), 1),
            record("pm25", 11.0, at(12), 2),
            record("pm10", 20.0, at(12), 1),
        ])
        .unwrap();

        assert_eq!(table.len(), 3);
        let mut keys: Vec<_> = table
            .records()
            .iter()
            .map(|r| (r.timestamp, r.parameter.clone(), r.location_id))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), table.len());

        // First occurrence wins.
        let kept = table
            .records()
            .iter()
            .find(|r| r.parameter == "pm25" && r.location_id == 1)
            .unwrap();
        assert_eq!(kept.value, 10.0);
    }

    #[test]
    fn rows_are_sorted_ascending_by_timestamp() {
        let table = MeasurementTable::from_records(vec![
            record("pm25", 18.2, at(14), 1),
            record("pm25", 15.5, at(12), 1),
            record("o3", 0.03, at(13), 1),
        ])
        .unwrap();

        let timestamps: Vec<_> = table.records().iter().map(|r| r.timestamp).collect();
        let mut sorted = timestamps.clone();
        sorted.sort();
        assert_eq!(timestamps, sorted);
    }

    #[test]
    fn latest_by_parameter_uses_only_the_latest_timestamp() {
        let table = MeasurementTable::from_records(vec![
            record("pm25", 15.5, at(12), 1),
            record("pm25", 18.2, at(14), 1),
        ])
        .unwrap();

        let latest = table.latest_by_parameter();
        assert_eq!(latest["pm25"].value, 18.2);
        assert_eq!(latest["pm25"].timestamp, at(14));
    }

    #[test]
    fn latest_by_parameter_averages_same_timestamp_readings() {
        let table = MeasurementTable::from_records(vec![
            record("pm25", 10.0, at(14), 1),
            record("pm25", 20.0, at(14), 2),
        ])
        .unwrap();

        let latest = table.latest_by_parameter();
        assert_eq!(latest["pm25"].value, 15.0);
        assert_eq!(latest["pm25"].unit, "μg/m³");
    }

    #[test]
    fn parameters_absent_at_latest_timestamp_are_omitted() {
        let table = MeasurementTable::from_records(vec![
            record("o3", 0.03, at(12), 1),
            record("pm25", 18.2, at(14), 1),
        ])
        .unwrap();

        let latest = table.latest_by_parameter();
        assert_eq!(latest.len(), 1);
        assert!(latest.contains_key("pm25"));
    }

    #[test]
    fn pivot_has_one_row_per_timestamp_and_one_column_per_parameter() {
        let table = MeasurementTable::from_records(vec![
            record("pm25", 15.5, at(12), 1),
            record("o3", 0.03, at(12), 1),
            record("pm25", 18.2, at(14), 1),
        ])
        .unwrap();

        let pivot = table.pivot_by_parameter();
        assert_eq!(pivot.len(), 2);
        assert_eq!(pivot[&at(12)].len(), 2);
        assert_eq!(pivot[&at(12)]["pm25"], 15.5);
        assert_eq!(pivot[&at(14)]["pm25"], 18.2);
        assert!(!pivot[&at(14)].contains_key("o3"));
    }

    #[test]
    fn pivot_averages_value_collisions() {
        let table = MeasurementTable::from_records(vec![
            record("pm25", 10.0, at(12), 1),
            record("pm25", 30.0, at(12), 2),
        ])
        .unwrap();

        let pivot = table.pivot_by_parameter();
        assert_eq!(pivot[&at(12)]["pm25"], 20.0);
    }
}
