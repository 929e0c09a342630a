//! The paged response envelope shared by every OpenAQ v3 listing endpoint.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One page of results from a paginated OpenAQ endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Pagination metadata reported by the server alongside each page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub limit: u64,
    /// Total number of matching records. The server reports either an exact
    /// integer or an approximation string such as `">1000"`; the string form
    /// is parsed as a lower bound.
    #[serde(default, deserialize_with = "deserialize_found")]
    pub found: u64,
}

fn deserialize_found<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct FoundVisitor;

    impl Visitor<'_> for FoundVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer count or a string such as \">1000\"")
        }

        fn visit_u64<E>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<u64, E> {
            Ok(value.max(0) as u64)
        }

        fn visit_str<E>(self, value: &str) -> Result<u64, E>
        where
            E: de::Error,
        {
            let digits: String = value.chars().filter(char::is_ascii_digit).collect();
            Ok(digits.parse().unwrap_or(0))
        }
    }

    deserializer.deserialize_any(FoundVisitor)
}
