pub mod category;
pub mod product;
pub mod recommendation;

use serde::{Deserialize, Deserializer};

/// Catalog and dashboard payloads use both numeric and string identifiers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Text(String),
    Integer(i64),
}

pub(crate) fn deserialize_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawIdentifier::deserialize(deserializer)? {
        RawIdentifier::Text(value) => value,
        RawIdentifier::Integer(value) => value.to_string(),
    })
}

/// Treats absent, zero and non-finite amounts as "not provided".
pub(crate) fn is_missing_amount(value: Option<f64>) -> bool {
    value.map_or(true, |amount| amount == 0.0 || !amount.is_finite())
}
