//! City resolution against the location directory.
//!
//! The directory has no canonical city field, so a requested city is matched
//! by fuzzy substring tests over normalized `name`, `locality` and
//! `provider.name`, widened by the static alias table ("SP" finds
//! "São Paulo"). The page scan is bounded on both ends: it stops early once
//! enough matches are in hand, and gives up at a hard page ceiling when
//! nothing matches.

use crate::directory::aliases::CITY_ALIASES;
use crate::directory::client::DirectoryClient;
use crate::directory::error::DirectoryError;
use crate::normalize::normalize;
use crate::policy::SearchPolicy;
use crate::types::location::LocationRecord;
use log::info;

/// Expands a requested city name into its normalized variant set.
///
/// The normalized name is always included. If it equals, or contains, any
/// spelling in an alias group, the whole group is added.
pub(crate) fn expand_variants(city: &str) -> Vec<String> {
    let city_normalized = normalize(city);
    let mut variants = vec![city_normalized.clone()];

    for (_, spellings) in CITY_ALIASES {
        let hits_group = spellings.iter().any(|spelling| {
            let spelling = normalize(spelling);
            spelling == city_normalized || city_normalized.contains(&spelling)
        });
        if hits_group {
            variants.extend(spellings.iter().map(|spelling| normalize(spelling)));
        }
    }

    variants.retain(|variant| !variant.is_empty());
    variants.sort();
    variants.dedup();
    variants
}

/// Whether any variant occurs in the location's normalized name, locality
/// or provider name. Absent fields are treated as empty strings.
pub(crate) fn location_matches(location: &LocationRecord, variants: &[String]) -> bool {
    let name = normalize(location.name.as_deref().unwrap_or(""));
    let locality = normalize(location.locality.as_deref().unwrap_or(""));
    let provider = normalize(
        location
            .provider
            .as_ref()
            .and_then(|provider| provider.name.as_deref())
            .unwrap_or(""),
    );

    variants
        .iter()
        .any(|variant| name.contains(variant) || locality.contains(variant) || provider.contains(variant))
}

/// Pages through the directory accumulating locations that match `city`.
///
/// Termination is a bounded-effort heuristic with two independent
/// predicates: once [`SearchPolicy::match_target`] locations have matched,
/// the scan stops after [`SearchPolicy::matched_page_cap`] pages; otherwise
/// it continues to the last server-reported page or
/// [`SearchPolicy::max_pages`], whichever comes first. An empty result is
/// not an error here; the caller decides what an unresolvable city means.
pub(crate) async fn find_locations_for_city(
    directory: &DirectoryClient<'_>,
    city: &str,
    country_id: i64,
    policy: &SearchPolicy,
) -> Result<Vec<LocationRecord>, DirectoryError> {
    let variants = expand_variants(city);
    info!(
        "Searching locations for '{}' with {} name variants",
        city,
        variants.len()
    );

    let mut matches: Vec<LocationRecord> = Vec::new();
    let mut total_searched = 0usize;

    for page_number in 1..=policy.max_pages {
        let page = directory.fetch_page(country_id, page_number).await?;
        if page.results.is_empty() {
            break;
        }

        total_searched += page.results.len();
        if page_number % 5 == 0 {
            info!(
                "Scanning page {} ({}/{} locations checked)",
                page_number, total_searched, page.meta.found
            );
        }

        let short_page = (page.results.len() as u32) < policy.page_size;
        let total_pages = total_pages(page.meta.found, policy.page_size);
        matches.extend(
            page.results
                .into_iter()
                .filter(|location| location_matches(location, &variants)),
        );

        if matches.len() >= policy.match_target
            && page_number >= policy.matched_page_cap.min(total_pages)
        {
            break;
        }
        if short_page || page_number >= total_pages {
            break;
        }
    }

    info!(
        "Found {} matching locations for '{}' after checking {} directory entries",
        matches.len(),
        city,
        total_searched
    );
    Ok(matches)
}

/// Server-reported page count; an unknown total counts as a single page.
fn total_pages(found: u64, page_size: u32) -> u32 {
    if found == 0 {
        return 1;
    }
    found.div_ceil(page_size as u64).min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(name: Option<&str>, locality: Option<&str>, provider: Option<&str>) -> LocationRecord {
        serde_json::from_value(json!({
            "id": 1,
            "name": name,
            "locality": locality,
            "provider": provider.map(|p| json!({"id": 1, "name": p})),
        }))
        .unwrap()
    }

    #[test]
    fn abbreviation_expands_to_full_alias_group() {
        let variants = expand_variants("sp");
        assert!(variants.contains(&"sao paulo".to_string()));
        assert!(variants.contains(&"sp".to_string()));
    }

    #[test]
    fn accented_query_matches_alias_group() {
        let variants = expand_variants("São Paulo");
        assert!(variants.contains(&"sp".to_string()));
        assert!(variants.contains(&"sao-paulo".to_string()));
    }

    #[test]
    fn unknown_city_keeps_only_itself() {
        assert_eq!(expand_variants("Cubatão"), vec!["cubatao".to_string()]);
    }

    #[test]
    fn abbreviation_finds_accented_location_name() {
        let loc = location(Some("São Paulo"), None, None);
        assert!(location_matches(&loc, &expand_variants("sp")));
    }

    #[test]
    fn matches_on_locality_and_provider_fields() {
        let by_locality = location(Some("Est. 211004"), Some("Rio de Janeiro"), None);
        assert!(location_matches(&by_locality, &expand_variants("rio")));

        let by_provider = location(None, None, Some("Prefeitura de Curitiba"));
        assert!(location_matches(&by_provider, &expand_variants("curitiba")));
    }

    #[test]
    fn absent_fields_do_not_match() {
        let bare = location(None, None, None);
        assert!(!location_matches(&bare, &expand_variants("sao paulo")));
    }

    #[test]
    fn unrelated_city_does_not_match() {
        let loc = location(Some("Belo Horizonte"), None, None);
        assert!(!location_matches(&loc, &expand_variants("fortaleza")));
    }

    #[test]
    fn total_pages_rounds_up_and_defaults_to_one() {
        assert_eq!(total_pages(0, 100), 1);
        assert_eq!(total_pages(100, 100), 1);
        assert_eq!(total_pages(101, 100), 2);
        assert_eq!(total_pages(250, 100), 3);
    }
}
