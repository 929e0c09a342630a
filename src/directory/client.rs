//! HTTP access to the OpenAQ location directory.

use crate::directory::error::DirectoryError;
use crate::policy::SearchPolicy;
use crate::types::location::{CountryRecord, LocationRecord};
use crate::types::page::Page;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// A single `/countries` page is enough to cover every country the
/// directory knows about.
const COUNTRY_PAGE_LIMIT: u32 = 200;

pub(crate) struct DirectoryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    policy: &'a SearchPolicy,
}

impl<'a> DirectoryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, policy: &'a SearchPolicy) -> Self {
        Self {
            http,
            base_url,
            policy,
        }
    }

    /// Resolves an ISO country code to the directory-assigned integer id.
    ///
    /// Fetched fresh on every call; a missing code is a fatal
    /// [`DirectoryError::CountryNotFound`].
    pub(crate) async fn resolve_country_id(&self, iso_code: &str) -> Result<i64, DirectoryError> {
        let url = format!("{}/countries?limit={}", self.base_url, COUNTRY_PAGE_LIMIT);
        let page: Page<CountryRecord> = self.get_json(&url).await?;

        page.results
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(iso_code))
            .map(|country| country.id)
            .ok_or_else(|| DirectoryError::CountryNotFound(iso_code.to_string()))
    }

    /// Fetches one directory page for a country. Pages are 1-based.
    pub(crate) async fn fetch_page(
        &self,
        country_id: i64,
        page: u32,
    ) -> Result<Page<LocationRecord>, DirectoryError> {
        let url = format!(
            "{}/locations?countries_id={}&limit={}&page={}",
            self.base_url, country_id, self.policy.page_size, page
        );
        self.get_json(&url).await
    }

    /// Retrieves the full location directory for a country, up to the hard
    /// page ceiling. Used by city discovery, which needs full visibility.
    pub(crate) async fn scan_all(
        &self,
        country_id: i64,
    ) -> Result<Vec<LocationRecord>, DirectoryError> {
        let mut locations = Vec::new();

        for page_number in 1..=self.policy.full_scan_max_pages {
            let page = self.fetch_page(country_id, page_number).await?;
            if page.results.is_empty() {
                break;
            }

            let short_page = (page.results.len() as u32) < self.policy.page_size;
            locations.extend(page.results);

            if page.meta.found > 0 && locations.len() as u64 >= page.meta.found {
                break;
            }
            if short_page {
                break;
            }
        }

        info!("Directory scan collected {} locations", locations.len());
        Ok(locations)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DirectoryError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| DirectoryError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Directory request to {} rejected: invalid API key", url);
            return Err(DirectoryError::Unauthorized);
        }
        if !status.is_success() {
            warn!("Directory request to {} failed with status {}", url, status);
            return Err(DirectoryError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DirectoryError::Decode(url.to_string(), e))
    }
}
