//! This module provides the main entry point for the OpenAQ air-quality
//! client. It resolves a free-text Brazilian city name against the OpenAQ
//! location directory, fetches the latest readings for the matched
//! monitoring stations, and returns them as a normalized measurement table.

use crate::directory::city_search::find_locations_for_city;
use crate::directory::client::DirectoryClient;
use crate::directory::discovery::{group_candidates, CityListing};
use crate::error::OpenAqError;
use crate::latest::client::LatestClient;
use crate::policy::SearchPolicy;
use crate::table::MeasurementTable;
use bon::bon;
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderValue};

/// Production OpenAQ v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openaq.org/v3";

const API_KEY_HEADER: &str = "X-API-Key";
const DEFAULT_COUNTRY: &str = "BR";

/// The main client for fetching air-quality data.
///
/// The client owns a single HTTP connection pool carrying the API key as a
/// default header; nothing is cached between calls, so every query reflects
/// the live state of the upstream directory.
///
/// Create an instance with [`OpenAq::new()`] for default search behavior, or
/// [`OpenAq::with_policy()`] to tune the bounded-search limits.
///
/// # Examples
///
/// ```no_run
/// # use openaq_br::{OpenAq, OpenAqError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), OpenAqError> {
/// let client = OpenAq::new("my-api-key")?;
/// let table = client.measurements().city("São Paulo").call().await?;
/// for (parameter, latest) in table.latest_by_parameter() {
///     println!("{}: {} {}", parameter, latest.value, latest.unit);
/// }
/// # Ok(())
/// # }
/// ```
pub struct OpenAq {
    http: reqwest::Client,
    base_url: String,
    policy: SearchPolicy,
}

#[bon]
impl OpenAq {
    /// Creates a client with the default [`SearchPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`OpenAqError::InvalidApiKey`] if the key is not a valid
    /// HTTP header value, or [`OpenAqError::HttpClient`] if the underlying
    /// HTTP client cannot be constructed.
    pub fn new(api_key: &str) -> Result<Self, OpenAqError> {
        Self::with_policy(api_key, SearchPolicy::default())
    }

    /// Creates a client with a custom [`SearchPolicy`].
    ///
    /// Use this to tighten or widen the bounded-search limits (page
    /// ceilings, probe counts, timeouts) when the defaults don't fit.
    pub fn with_policy(api_key: &str, policy: SearchPolicy) -> Result<Self, OpenAqError> {
        let mut api_key_value =
            HeaderValue::from_str(api_key).map_err(|_| OpenAqError::InvalidApiKey)?;
        api_key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(policy.request_timeout)
            .build()
            .map_err(OpenAqError::HttpClient)?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            policy,
        })
    }

    /// Fetches the latest air-quality measurements for a city.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.city(&str)`: **Required.** Free-text city name; matching is
    ///   accent-insensitive and alias-aware ("SP", "Rio", "poa" all work).
    /// * `.country(&str)`: Optional. ISO country code. Defaults to `"BR"`.
    ///
    /// # Returns
    ///
    /// A [`MeasurementTable`] of deduplicated, time-sorted records from up
    /// to [`SearchPolicy::max_latest_locations`] matched stations.
    ///
    /// # Errors
    ///
    /// * [`OpenAqError::Directory`]: directory failures: rejected API key,
    ///   unknown country, network or server errors. Fatal for the run.
    /// * [`OpenAqError::Latest`]: a rejected key or rate limit while
    ///   fetching readings. Individual stations that fail for other reasons
    ///   are skipped, not fatal.
    /// * [`OpenAqError::CityUnresolved`]: no directory location matched
    ///   the requested city.
    /// * [`OpenAqError::NoData`]: locations matched, but none produced a
    ///   usable reading.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use openaq_br::{OpenAq, OpenAqError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), OpenAqError> {
    /// let client = OpenAq::new("my-api-key")?;
    /// let table = client
    ///     .measurements()
    ///     .city("Rio de Janeiro")
    ///     .country("BR")
    ///     .call()
    ///     .await?;
    /// println!("{} measurements", table.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn measurements(
        &self,
        city: &str,
        country: Option<&str>,
    ) -> Result<MeasurementTable, OpenAqError> {
        let country = country.unwrap_or(DEFAULT_COUNTRY);
        let directory = DirectoryClient::new(&self.http, &self.base_url, &self.policy);
        let latest = LatestClient::new(&self.http, &self.base_url, &self.policy);

        let country_id = directory.resolve_country_id(country).await?;
        info!("Resolved country {} to directory id {}", country, country_id);

        let locations = find_locations_for_city(&directory, city, country_id, &self.policy).await?;
        if locations.is_empty() {
            warn!("No locations matched city '{}'", city);
            self.log_available_cities(&directory, &latest, country_id).await;
            return Err(OpenAqError::CityUnresolved {
                city: city.to_string(),
            });
        }

        let records = latest.latest_for_locations(&locations, city, country).await?;
        match MeasurementTable::from_records(records) {
            Some(table) => {
                info!("Assembled {} measurements for '{}'", table.len(), city);
                Ok(table)
            }
            None => Err(OpenAqError::NoData {
                city: city.to_string(),
            }),
        }
    }

    /// Discovers up to [`SearchPolicy::city_target`] cities that currently
    /// have live data, for selection UIs.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.country(&str)`: Optional. ISO country code. Defaults to `"BR"`.
    ///
    /// # Returns
    ///
    /// Confirmed-live cities, the well-known large cities first (by fixed
    /// rank) and the rest alphabetically.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use openaq_br::{OpenAq, OpenAqError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), OpenAqError> {
    /// let client = OpenAq::new("my-api-key")?;
    /// for city in client.available_cities().call().await? {
    ///     println!("{}", city.display);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn available_cities(
        &self,
        country: Option<&str>,
    ) -> Result<Vec<CityListing>, OpenAqError> {
        let country = country.unwrap_or(DEFAULT_COUNTRY);
        let directory = DirectoryClient::new(&self.http, &self.base_url, &self.policy);
        let latest = LatestClient::new(&self.http, &self.base_url, &self.policy);

        let country_id = directory.resolve_country_id(country).await?;
        self.discover_cities(&directory, &latest, country_id).await
    }

    /// Full-directory scan followed by bounded existence probing.
    async fn discover_cities(
        &self,
        directory: &DirectoryClient<'_>,
        latest: &LatestClient<'_>,
        country_id: i64,
    ) -> Result<Vec<CityListing>, OpenAqError> {
        let locations = directory.scan_all(country_id).await?;
        let candidates = group_candidates(&locations);
        info!(
            "Grouped {} locations into {} city candidates",
            locations.len(),
            candidates.len()
        );

        let mut cities = Vec::new();
        let mut probed = 0usize;
        for candidate in candidates {
            if cities.len() >= self.policy.city_target || probed >= self.policy.max_probe {
                break;
            }
            let Some(&probe_id) = candidate.location_ids.first() else {
                continue;
            };
            probed += 1;

            match latest.has_live_data(probe_id).await {
                Ok(true) => cities.push(candidate.into_listing()),
                Ok(false) => {}
                Err(error) if error.is_fatal() => return Err(error.into()),
                Err(error) => {
                    warn!("Existence probe failed for location {}: {}", probe_id, error);
                }
            }
        }

        info!("Confirmed {} cities with live data", cities.len());
        Ok(cities)
    }

    /// Best-effort help for an unresolvable city: log what is available.
    /// Failures here are logged and ignored; the caller's error stands.
    async fn log_available_cities(
        &self,
        directory: &DirectoryClient<'_>,
        latest: &LatestClient<'_>,
        country_id: i64,
    ) {
        match self.discover_cities(directory, latest, country_id).await {
            Ok(cities) if !cities.is_empty() => {
                let names: Vec<&str> = cities.iter().map(|city| city.display.as_str()).collect();
                info!("Cities with live data: {}", names.join(", "));
            }
            Ok(_) => {}
            Err(error) => warn!("Could not list available cities: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::latest::record::build_record;
    use crate::table::MeasurementTable;
    use crate::types::latest::RawLatest;
    use crate::types::location::LocationRecord;
    use serde_json::json;

    // The full data path minus HTTP: a directory record and a raw latest
    // reading flow through normalization and tabulation.
    #[test]
    fn directory_record_and_raw_reading_produce_single_row_table() {
        let location: LocationRecord = serde_json::from_value(json!({
            "id": 123,
            "name": "São Paulo",
            "locality": "São Paulo",
            "country": {"id": 26, "code": "BR"},
            "sensors": [{"id": 1, "parameter": {"name": "pm25", "units": "μg/m³"}}]
        }))
        .unwrap();
        let raw: RawLatest = serde_json::from_value(json!({
            "datetime": {"utc": "2024-05-07T19:00:00Z"},
            "value": 15.5,
            "sensorsId": 1,
            "locationsId": 123
        }))
        .unwrap();

        let record = build_record(&raw, &location, "São Paulo", "BR").unwrap();
        let table = MeasurementTable::from_records(vec![record]).unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.records()[0];
        assert_eq!(row.parameter, "pm25");
        assert_eq!(row.value, 15.5);
        assert_eq!(row.unit, "μg/m³");
        assert_eq!(row.city, "São Paulo");
        assert_eq!(row.location_id, 123);
        assert_eq!(row.country_code, "BR");

        let latest = table.latest_by_parameter();
        assert_eq!(latest["pm25"].value, 15.5);
        assert_eq!(latest["pm25"].timestamp, row.timestamp);
    }
}
