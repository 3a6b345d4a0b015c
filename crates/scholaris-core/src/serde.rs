//! Deserializers for query-string parameters.
//!
//! Browsers and API clients routinely send `?pageNumber=&sortOrder=` with
//! empty values; these helpers treat an empty value the same as an absent
//! parameter instead of failing deserialization.

use serde::{Deserialize, Deserializer};

use crate::filter::SortOrder;

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Anything other than `desc` (case-insensitive) sorts ascending.
pub fn deserialize_sort_order<'de, D>(deserializer: D) -> Result<SortOrder, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        Some(s) if s.eq_ignore_ascii_case("desc") => Ok(SortOrder::Desc),
        _ => Ok(SortOrder::Asc),
    }
}
