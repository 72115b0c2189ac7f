use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer};

/// Parses the text of a present element. Empty text is parsed like any other
/// value, so `<Type/>` fails for a closed enumeration. A missing element
/// falls back to the field default.
pub fn element_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map(Some).map_err(serde::de::Error::custom)
}

/// Deserializes an optional value from element text, treating an empty
/// element (`<BankAccountType />`) as `None`.
/// Any non-empty text must parse, so unknown enum members still fail.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
