//! Bounded-search policy constants.
//!
//! The directory is slow, deeply paginated and inconsistently populated, so
//! every scan trades exhaustiveness for bounded latency. The bounds live in
//! one place as plain data; [`SearchPolicy::default`] carries the values the
//! upstream service is known to tolerate.

use std::time::Duration;

/// Tunable limits for directory scans, latest-reading fetches and city
/// discovery probes.
#[derive(Debug, Clone)]
pub struct SearchPolicy {
    /// Locations requested per directory page.
    pub page_size: u32,
    /// Hard ceiling on pages scanned while resolving a city.
    pub max_pages: u32,
    /// Stop a city scan early once this many locations have matched.
    pub match_target: usize,
    /// Minimum pages to read before the early stop applies.
    pub matched_page_cap: u32,
    /// Hard ceiling on pages for the full discovery scan.
    pub full_scan_max_pages: u32,
    /// At most this many resolved locations are queried for latest readings.
    pub max_latest_locations: usize,
    /// At most this many candidate cities receive an existence probe.
    pub max_probe: usize,
    /// Stop discovery once this many confirmed-live cities are collected.
    pub city_target: usize,
    /// Timeout applied to directory and latest-reading requests.
    pub request_timeout: Duration,
    /// Shorter timeout for the lightweight existence probes.
    pub probe_timeout: Duration,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_pages: 30,
            match_target: 5,
            matched_page_cap: 3,
            full_scan_max_pages: 100,
            max_latest_locations: 5,
            max_probe: 15,
            city_target: 10,
            request_timeout: Duration::from_secs(15),
            probe_timeout: Duration::from_secs(3),
        }
    }
}
