use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

// Xero writes timestamps without an offset and means UTC, e.g.
// `2009-05-14T01:44:26.747` or `2010-07-30T00:00:00`. The response envelope
// uses RFC 3339 instead.
pub fn parse_xero_datetime(datetime_str: &str) -> Result<OffsetDateTime, String> {
    let datetime_str = datetime_str.trim();

    if let Ok(dt) = OffsetDateTime::parse(datetime_str, &Rfc3339) {
        return Ok(dt);
    }

    let parsed = if datetime_str.contains('.') {
        PrimitiveDateTime::parse(
            datetime_str,
            &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        )
    } else {
        PrimitiveDateTime::parse(
            datetime_str,
            &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    };

    parsed
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| format!("Failed to parse datetime '{datetime_str}': {e}"))
}

pub fn format_xero_datetime(datetime: &OffsetDateTime) -> Result<String, time::error::Format> {
    datetime.to_offset(time::UtcOffset::UTC).format(&format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]"
    ))
}

// Serialization module for time::OffsetDateTime
pub mod xero_datetime_format {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S>(datetime: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = super::format_xero_datetime(datetime).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let datetime_str = String::deserialize(deserializer)?;
        super::parse_xero_datetime(&datetime_str).map_err(serde::de::Error::custom)
    }
}

// Optional OffsetDateTime serialization. An empty element decodes to `None`;
// text that is present but unparsable is an error.
pub mod xero_datetime_format_option {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S>(datetime: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match datetime {
            Some(dt) => {
                let formatted = super::format_xero_datetime(dt).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.trim().is_empty() => super::parse_xero_datetime(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
