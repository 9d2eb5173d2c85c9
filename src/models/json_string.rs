//! Serde helper for fields the panel encodes either as a nested JSON
//! object or as a JSON string containing that object.
//!
//! Inbound `settings`, `streamSettings` and `sniffing` arrive as strings
//! from list responses but as plain objects in other contexts. The helper
//! runs before structural validation: strings are parsed as JSON first,
//! objects pass through unchanged, and a string that is not valid JSON
//! fails deserialization outright.

use serde::Deserialize;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde_json::Value;

pub(crate) fn string_or_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Structured(Value),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Text(text) => serde_json::from_str(&text).map_err(|e| {
            de::Error::custom(format!("field is not a valid JSON-encoded string: {e}"))
        })?,
        Raw::Structured(value) => value,
    };
    serde_json::from_value(value).map_err(de::Error::custom)
}
