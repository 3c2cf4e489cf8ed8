// Record types for the `tour_images` table. The remote table stores
// `usage_stats` and `related_programs_log` as JSON encoded into a string
// column, so those fields go through the `json_string` codec below.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-placement usage counters of one image.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    #[serde(default)]
    pub banner_1: u32,
    #[serde(default)]
    pub banner_other: u32,
    #[serde(default)]
    pub detail: u32,
}

impl UsageStats {
    pub fn total(&self) -> u32 {
        self.banner_1 + self.banner_other + self.detail
    }
}

/// A tour program that used the image.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RelatedProgram {
    pub code: String,
    /// Wholesaler name.
    pub name: String,
    pub date: NaiveDate,
}

/// Payload sent to `/create/tour_images`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewImage {
    pub image_name: String,
    pub image_url: String,
    pub country: String,
    pub total_usage: u32,
    #[serde(with = "json_string")]
    pub usage_stats: UsageStats,
    #[serde(with = "json_string")]
    pub related_programs_log: Vec<RelatedProgram>,
}

impl NewImage {
    /// Builds the payload with `total_usage` derived from the stats so the
    /// two can never disagree.
    pub fn new(
        image_name: String,
        image_url: String,
        country: &str,
        usage_stats: UsageStats,
        related_programs_log: Vec<RelatedProgram>,
    ) -> Self {
        NewImage {
            image_name,
            image_url,
            country: country.to_string(),
            total_usage: usage_stats.total(),
            usage_stats,
            related_programs_log,
        }
    }
}

/// A record as returned by the read endpoints. The id is kept as a raw
/// JSON value since the service may return it as a number or a string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StoredImage {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub total_usage: u32,
    #[serde(default, with = "json_string")]
    pub usage_stats: UsageStats,
    #[serde(default, with = "json_string")]
    pub related_programs_log: Vec<RelatedProgram>,
}

impl StoredImage {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        StoredImage::deserialize(value)
    }

    /// Id rendered for display or for use in a `/read/...{id}` path.
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Serde codec for values stored as a JSON document inside a string.
/// Deserializing also accepts the value already decoded (some responses
/// return the nested JSON directly).
pub mod json_string {
    use serde::de::{self, DeserializeOwned};
    use serde::ser;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let text = serde_json::to_string(value).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => serde_json::from_str(&text).map_err(de::Error::custom),
            other => serde_json::from_value(other).map_err(de::Error::custom),
        }
    }
}
