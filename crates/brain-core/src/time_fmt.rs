//! Shared RFC 3339, millisecond-precision timestamp (de)serialization.
//!
//! Used by both [`crate::record::Record::updated_at`] and
//! [`crate::manifest::ManifestEntry::updated_at`] / [`crate::manifest::Manifest::updated_at`]
//! so every `updatedAt` field in the index renders identically (§3.1, §3.2).

pub mod millis_rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
