use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Render a timestamp as `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn format_utc_millis(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde helper for `#[serde(serialize_with = "...")]` using [`format_utc_millis`].
pub fn serialize_utc_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_utc_millis(value))
}
