//! Bookkeeping documents: global agent selection and per-project skill set.
//!
//! Stores know nothing about agent definitions; they persist plain ids.

mod central;
mod project;

use chrono::{DateTime, SecondsFormat, Utc};

pub use central::{CENTRAL_CONFIG_FILE, CONFIG_VERSION, CentralConfig, CentralStore};
pub use project::{ProjectConfig, ProjectStore};

/// ISO-8601 UTC with millisecond precision, e.g. `2025-01-02T03:04:05.678Z`.
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> crate::Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| crate::SkillsError::Serialization(err.to_string()))
}
