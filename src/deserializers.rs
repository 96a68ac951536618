//! Forgiving deserializers for chart data coming back from `/ask`.
//!
//! The endpoint builds chart payloads from SQL results, so labels are often
//! years or ids and numbers sometimes arrive as strings. These accept those
//! shapes and reject anything that cannot become a bar (nulls, objects).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Labels as strings; numbers and booleans are stringified.
///
/// ```json
/// { "labels": ["Open", "Closed"] }
/// { "labels": [2021, 2022] }        // → ["2021", "2022"]
/// ```
pub fn de_labels_forgiving<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| match v {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(D::Error::custom(format!(
                "label {} is not text or a number: {}",
                i, other
            ))),
        })
        .collect()
}

/// Numeric series accepting numbers and numeric strings (`"12.5"`).
/// A `null` gap is an error: a bar chart has no way to draw it.
pub fn de_numbers_forgiving<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| number_at(i, v).map_err(D::Error::custom))
        .collect()
}

/// Same as [`de_numbers_forgiving`] for an optional series; `null` → `None`.
pub fn de_option_numbers_forgiving<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let Some(raw) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| number_at(i, v).map_err(D::Error::custom))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn number_at(index: usize, v: Value) -> Result<f64, String> {
    let val = match &v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match val {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(format!("value {} is not a number: {}", index, v)),
    }
}
