//! City discovery: turning the raw location directory into a short list of
//! cities that are worth offering in a selection UI.
//!
//! The directory is full of test entries, station codes and placeholder
//! names, so candidates are filtered through name heuristics, ranked with
//! the big well-known cities first, and later confirmed against the
//! latest-readings endpoint before being shown to anyone.

use crate::directory::aliases::{CITY_STATES, NAME_DENYLIST, PRIORITY_CITIES};
use crate::types::location::LocationRecord;
use serde::Serialize;
use std::collections::HashMap;

/// One city confirmed to have live data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityListing {
    /// The city name as it appears in the directory.
    pub name: String,
    /// Human-facing label, `"{name} - {state}"` when the state is known.
    pub display: String,
    /// State abbreviation, when the city is in the static state table.
    pub state: Option<String>,
}

/// A grouped, not-yet-probed city candidate.
pub(crate) struct CityCandidate {
    pub(crate) name: String,
    pub(crate) state: Option<&'static str>,
    pub(crate) location_ids: Vec<i64>,
    priority_rank: Option<usize>,
}

impl CityCandidate {
    pub(crate) fn into_listing(self) -> CityListing {
        let display = match self.state {
            Some(state) => format!("{} - {}", self.name, state),
            None => self.name.clone(),
        };
        CityListing {
            name: self.name,
            display,
            state: self.state.map(str::to_string),
        }
    }
}

/// Heuristic filter for directory "city" values.
///
/// Rejects names that are too short, carry a denylisted token, are mostly
/// numeric, or follow the `<digits>_<...>` test-entry patterns.
pub(crate) fn is_valid_city_name(name: &str) -> bool {
    let city = name.trim().to_lowercase();
    if city.chars().count() < 3 {
        return false;
    }

    let denylisted = NAME_DENYLIST.iter().any(|token| {
        if token.chars().count() <= 2 {
            city == *token
        } else {
            city.contains(token)
        }
    });
    if denylisted {
        return false;
    }

    // Station codes: a digit in the first three characters of a short name.
    let digit_in_prefix = city.chars().take(3).any(|c| c.is_ascii_digit());
    if digit_in_prefix && city.chars().count() < 10 {
        return false;
    }

    let stripped: String = city
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect();
    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    if city.starts_with(|c: char| c.is_ascii_digit()) && city.contains('_') {
        return false;
    }
    if city.matches('_').count() > 1 {
        return false;
    }

    true
}

/// Groups the scanned directory into deduplicated city candidates, ordered
/// priority-cities-first (by fixed rank) then alphabetically. That order is
/// both the probing order and the final listing order.
pub(crate) fn group_candidates(locations: &[LocationRecord]) -> Vec<CityCandidate> {
    let mut candidates: Vec<CityCandidate> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for location in locations {
        let raw = location
            .locality
            .as_deref()
            .filter(|locality| !locality.trim().is_empty())
            .or(location.name.as_deref());
        let Some(raw) = raw else { continue };

        let name = raw.trim();
        if !is_valid_city_name(name) {
            continue;
        }

        match index_by_name.get(name) {
            Some(&index) => candidates[index].location_ids.push(location.id),
            None => {
                let key = name.to_lowercase();
                index_by_name.insert(name.to_string(), candidates.len());
                candidates.push(CityCandidate {
                    name: name.to_string(),
                    state: state_for(&key),
                    location_ids: vec![location.id],
                    priority_rank: priority_rank(&key),
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        let rank_a = (a.priority_rank.is_none(), a.priority_rank.unwrap_or(0));
        let rank_b = (b.priority_rank.is_none(), b.priority_rank.unwrap_or(0));
        rank_a.cmp(&rank_b).then_with(|| a.name.cmp(&b.name))
    });
    candidates
}

fn state_for(key: &str) -> Option<&'static str> {
    CITY_STATES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, state)| *state)
}

fn priority_rank(key: &str) -> Option<usize> {
    PRIORITY_CITIES
        .iter()
        .position(|priority| key.contains(priority) || priority.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(id: i64, name: Option<&str>, locality: Option<&str>) -> LocationRecord {
        serde_json::from_value(json!({"id": id, "name": name, "locality": locality})).unwrap()
    }

    #[test]
    fn accepts_real_city_names() {
        for name in ["São Paulo", "Rio de Janeiro", "Campinas", "Manaus", "Bauru"] {
            assert!(is_valid_city_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_denylisted_tokens() {
        for name in ["Teste Estação", "N/A", "unknown", "Cidade Tiradentes", "quality01"] {
            assert!(!is_valid_city_name(name), "{name} should be invalid");
        }
    }

    #[test]
    fn rejects_codes_and_numeric_names() {
        assert!(!is_valid_city_name("SP"));
        assert!(!is_valid_city_name("123 456"));
        assert!(!is_valid_city_name("3_estacao"));
        assert!(!is_valid_city_name("a_b_c"));
        assert!(!is_valid_city_name("12abc"));
    }

    #[test]
    fn short_denylist_tokens_match_exactly_not_by_substring() {
        assert!(!is_valid_city_name("na"));
        assert!(is_valid_city_name("Campinas"));
        assert!(is_valid_city_name("Manaus"));
    }

    #[test]
    fn groups_by_locality_with_name_fallback() {
        let locations = vec![
            location(1, Some("Est. Pinheiros"), Some("São Paulo")),
            location(2, Some("Est. Ibirapuera"), Some("São Paulo")),
            location(3, Some("Sorocaba"), None),
        ];
        let candidates = group_candidates(&locations);
        assert_eq!(candidates.len(), 2);

        let sao_paulo = candidates.iter().find(|c| c.name == "São Paulo").unwrap();
        assert_eq!(sao_paulo.location_ids, vec![1, 2]);
        assert!(candidates.iter().any(|c| c.name == "Sorocaba"));
    }

    #[test]
    fn priority_cities_rank_before_alphabetical_rest() {
        let locations = vec![
            location(1, None, Some("Aracaju")),
            location(2, None, Some("Rio de Janeiro")),
            location(3, None, Some("São Paulo")),
            location(4, None, Some("Sorocaba")),
        ];
        let candidates = group_candidates(&locations);
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["São Paulo", "Rio de Janeiro", "Aracaju", "Sorocaba"]);
    }

    #[test]
    fn listing_display_includes_state_when_known() {
        let locations = vec![location(1, None, Some("Campinas")), location(2, None, Some("Aracaju"))];
        let candidates = group_candidates(&locations);

        let campinas = candidates
            .into_iter()
            .find(|c| c.name == "Campinas")
            .unwrap()
            .into_listing();
        assert_eq!(campinas.display, "Campinas - SP");
        assert_eq!(campinas.state.as_deref(), Some("SP"));
    }
}
