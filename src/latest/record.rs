//! Assembly of canonical measurement records from raw latest readings.

use crate::types::latest::RawLatest;
use crate::types::location::LocationRecord;
use crate::types::measurement::MeasurementRecord;
use chrono::{DateTime, Utc};
use log::warn;

/// Parameter name used when a reading's sensor cannot be resolved.
pub(crate) const UNKNOWN_PARAMETER: &str = "unknown";

/// Unit used when sensor metadata carries none. Assumes the dominant
/// mass-concentration unit; readings with real metadata keep their own.
pub(crate) const DEFAULT_UNIT: &str = "μg/m³";

/// Builds one canonical record from a raw reading and its location.
///
/// Metadata gaps degrade gracefully instead of failing: the parameter and
/// unit come from the sensor matching the reading's `sensorsId`, falling
/// back to `"unknown"` / the default unit; the city falls back through
/// `locality`, then `name`, then the originally requested city; the country falls
/// back to the requested country code. The only drop condition is a missing
/// or unparseable timestamp, which is logged and yields `None`.
pub(crate) fn build_record(
    raw: &RawLatest,
    location: &LocationRecord,
    requested_city: &str,
    requested_country: &str,
) -> Option<MeasurementRecord> {
    let raw_timestamp = raw
        .datetime
        .as_ref()
        .and_then(|datetime| datetime.utc.as_deref())
        .unwrap_or("");
    let timestamp: DateTime<Utc> = match DateTime::parse_from_rfc3339(raw_timestamp) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => {
            warn!(
                "Dropping reading with invalid timestamp '{}' from location {}",
                raw_timestamp, location.id
            );
            return None;
        }
    };

    let sensor_parameter = raw
        .sensors_id
        .and_then(|sensor_id| location.sensors.iter().find(|sensor| sensor.id == sensor_id))
        .and_then(|sensor| sensor.parameter.as_ref());
    let (parameter, unit) = match sensor_parameter {
        Some(parameter) => (
            parameter
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_PARAMETER.to_string()),
            parameter
                .units
                .clone()
                .filter(|units| !units.is_empty())
                .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        ),
        None => (UNKNOWN_PARAMETER.to_string(), DEFAULT_UNIT.to_string()),
    };

    let city = location
        .locality
        .clone()
        .filter(|locality| !locality.is_empty())
        .or_else(|| location.name.clone().filter(|name| !name.is_empty()))
        .unwrap_or_else(|| requested_city.to_string());
    let country_code = location
        .country
        .as_ref()
        .and_then(|country| country.code.clone())
        .unwrap_or_else(|| requested_country.to_string());

    Some(MeasurementRecord {
        parameter,
        value: raw.value.unwrap_or(0.0),
        unit,
        timestamp,
        location_name: location.name.clone().unwrap_or_default(),
        location_id: location.id,
        city,
        country_code,
    })
}
