use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::Complexity;

/// Custom deserializer for bug line numbers.
///
/// Accepts a positive integer, a numeric string (`"12"`), or null. Zero,
/// negative numbers, non-numeric strings and non-scalar values are treated as
/// "no line" rather than failing the whole response.
pub fn deserialize_line<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let line = match value {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).ok()
            } else if let Some(v) = n.as_f64() {
                // Models occasionally emit `3.0`
                (v.fract() == 0.0 && v >= 1.0 && v <= u32::MAX as f64).then_some(v as u32)
            } else {
                None
            }
        }
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(line.filter(|l| *l > 0))
}

/// Custom deserializer for free-text fields that accepts any JSON value.
///
/// Strings pass through, numbers and booleans are rendered as text, null maps
/// to `None`. Arrays and objects are rendered as compact JSON.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Boolean flag; anything other than a JSON bool is dropped
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// Complexity estimate; only an object is read, any other shape maps to `None`
pub fn deserialize_complexity<'de, D>(deserializer: D) -> Result<Option<Complexity>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

/// Sequence of records.
///
/// A non-array maps to `None`; elements that do not decode as `T` are skipped.
pub fn deserialize_lenient_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}
