//! The canonical measurement record produced by the normalization pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One normalized air-quality measurement.
///
/// Assembled by reconciling a raw latest reading with its location's sensor
/// metadata. `parameter` and `unit` are never empty (they fall back to
/// `"unknown"` and `"μg/m³"` when the sensor metadata is missing), and
/// `timestamp` is always a valid instant: readings whose timestamp cannot be
/// parsed are dropped during assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// Pollutant/measurement type (e.g. "pm25", "o3").
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
    /// Display name of the monitoring station the reading came from.
    pub location_name: String,
    pub location_id: i64,
    /// City the station belongs to, as best the upstream metadata allows.
    pub city: String,
    pub country_code: String,
}
