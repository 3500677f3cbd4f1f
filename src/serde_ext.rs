//! Lenient field deserializers shared by the webhook and catalog DTOs.
//!
//! Webhook bodies are only checked for the presence of their required keys.
//! Every optional field goes through one of these, so a value of the wrong
//! JSON type reads as absent instead of failing the whole document.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Identifier fields arrive as strings from media servers but as numbers from
/// the catalog. Either way we keep them as strings; blank strings and any
/// other JSON type become `None`.
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| format!("{}", f as u64))
            }
        }
        _ => None,
    }))
}

/// Any optional field: a value that does not fit `T` is treated as absent.
pub(crate) fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}
