//! HTTP access to the per-location latest-readings endpoint.

use crate::latest::error::LatestError;
use crate::latest::record::build_record;
use crate::policy::SearchPolicy;
use crate::types::latest::RawLatest;
use crate::types::location::LocationRecord;
use crate::types::measurement::MeasurementRecord;
use crate::types::page::Page;
use log::{info, warn};
use reqwest::{Client, StatusCode};

pub(crate) struct LatestClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    policy: &'a SearchPolicy,
}

impl<'a> LatestClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, policy: &'a SearchPolicy) -> Self {
        Self {
            http,
            base_url,
            policy,
        }
    }

    /// Fetches and normalizes the latest readings for a bounded set of
    /// resolved locations.
    ///
    /// Each location is an independent unit of work with an explicit
    /// outcome: an invalid key or a rate limit aborts the whole batch,
    /// anything else (404, server hiccup, malformed body) skips just that
    /// location so one bad station never sinks the rest.
    pub(crate) async fn latest_for_locations(
        &self,
        locations: &[LocationRecord],
        requested_city: &str,
        requested_country: &str,
    ) -> Result<Vec<MeasurementRecord>, LatestError> {
        let capped = &locations[..locations.len().min(self.policy.max_latest_locations)];
        info!(
            "Fetching latest readings for {} of {} matched locations",
            capped.len(),
            locations.len()
        );

        let mut records = Vec::new();
        for location in capped {
            match self.fetch_latest(location.id).await {
                Ok(readings) => {
                    records.extend(readings.iter().filter_map(|raw| {
                        build_record(raw, location, requested_city, requested_country)
                    }));
                }
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => warn!("Skipping location {}: {}", location.id, error),
            }
        }

        info!(
            "Collected {} measurement records from {} locations",
            records.len(),
            capped.len()
        );
        Ok(records)
    }

    /// Lightweight existence probe used by city discovery: does this
    /// location currently report any latest reading at all?
    ///
    /// Runs under the short probe timeout. Auth and rate-limit failures are
    /// fatal (they would fail for every other probe too); any other
    /// non-success status just means "no data".
    pub(crate) async fn has_live_data(&self, location_id: i64) -> Result<bool, LatestError> {
        let url = self.latest_url(location_id);
        let response = self
            .http
            .get(&url)
            .timeout(self.policy.probe_timeout)
            .send()
            .await
            .map_err(|e| LatestError::NetworkRequest(url.clone(), e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(LatestError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(LatestError::RateLimited),
            status if !status.is_success() => {
                warn!("Probe of location {} returned status {}", location_id, status);
                Ok(false)
            }
            _ => {
                let page: Page<RawLatest> = response
                    .json()
                    .await
                    .map_err(|e| LatestError::Decode(url, e))?;
                Ok(!page.results.is_empty())
            }
        }
    }

    async fn fetch_latest(&self, location_id: i64) -> Result<Vec<RawLatest>, LatestError> {
        let url = self.latest_url(location_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LatestError::NetworkRequest(url.clone(), e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(LatestError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(LatestError::RateLimited),
            status if !status.is_success() => Err(LatestError::HttpStatus { url, status }),
            _ => {
                let page: Page<RawLatest> = response
                    .json()
                    .await
                    .map_err(|e| LatestError::Decode(url, e))?;
                Ok(page.results)
            }
        }
    }

    fn latest_url(&self, location_id: i64) -> String {
        format!("{}/locations/{}/latest", self.base_url, location_id)
    }
}
