//! Serde models for the OpenAQ v3 directory endpoints (`/countries` and
//! `/locations`). Every field the upstream may omit is optional; unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};

/// One entry from the `/countries` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRecord {
    pub id: i64,
    /// ISO 3166-1 alpha-2 code (e.g. "BR").
    #[serde(default)]
    pub code: String,
    pub name: Option<String>,
}

/// A monitoring station as reported by the `/locations` directory.
///
/// The directory has no canonical city field; city resolution works off
/// `name`, `locality` and `provider.name`, all of which are inconsistently
/// populated upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: i64,
    pub name: Option<String>,
    pub locality: Option<String>,
    #[serde(default)]
    pub country: Option<CountryRef>,
    #[serde(default)]
    pub provider: Option<ProviderRef>,
    #[serde(default)]
    pub sensors: Vec<SensorDescriptor>,
}

/// The country object embedded in a location record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRef {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
}

/// The provider object embedded in a location record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRef {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// One instrument at a location, measuring a single parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorDescriptor {
    pub id: i64,
    #[serde(default)]
    pub parameter: Option<ParameterInfo>,
}

/// Parameter metadata attached to a sensor (e.g. pm25 in µg/m³).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: Option<String>,
    pub units: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_deserializes_from_full_payload() {
        let location: LocationRecord = serde_json::from_value(json!({
            "id": 123,
            "name": "São Paulo",
            "locality": "São Paulo",
            "country": {"id": 26, "code": "BR", "name": "Brazil"},
            "provider": {"id": 7, "name": "CETESB"},
            "sensors": [
                {"id": 1, "parameter": {"name": "pm25", "units": "μg/m³"}}
            ]
        }))
        .unwrap();

        assert_eq!(location.id, 123);
        assert_eq!(location.locality.as_deref(), Some("São Paulo"));
        assert_eq!(location.sensors.len(), 1);
        let parameter = location.sensors[0].parameter.as_ref().unwrap();
        assert_eq!(parameter.name.as_deref(), Some("pm25"));
    }

    #[test]
    fn location_tolerates_sparse_payload() {
        let location: LocationRecord =
            serde_json::from_value(json!({"id": 9, "name": null, "locality": null})).unwrap();
        assert_eq!(location.id, 9);
        assert!(location.name.is_none());
        assert!(location.country.is_none());
        assert!(location.sensors.is_empty());
    }
}
