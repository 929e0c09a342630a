//! Serde models for the `/locations/{id}/latest` endpoint.
//!
//! The latest-reading payload is treated as untrusted input: every field is
//! optional and the reading is only usable after it has been reconciled with
//! the owning location's sensor metadata.

use serde::{Deserialize, Serialize};

/// One raw latest reading for a single sensor at a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLatest {
    #[serde(default)]
    pub datetime: Option<DatetimeField>,
    pub value: Option<f64>,
    pub sensors_id: Option<i64>,
    pub locations_id: Option<i64>,
}

/// The nested datetime object carried by a raw reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatetimeField {
    pub utc: Option<String>,
    pub local: Option<String>,
}
