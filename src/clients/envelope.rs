//! Collection responses arrive in one of three shapes. They are classified
//! once at the boundary and everything downstream sees a plain list.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::app_system::Resource;
use crate::error::ApiError;

/// The accepted shapes of a collection response.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `[ ... ]`
    Bare(Vec<Value>),
    /// `{ "data": [ ... ] }`
    Data(Vec<Value>),
    /// `{ "<collection>": [ ... ] }`, e.g. `{ "products": [ ... ] }`
    Named(Vec<Value>),
}

impl Envelope {
    pub fn classify(body: Value, resource: Resource) -> Result<Self, ApiError> {
        match body {
            Value::Array(items) => Ok(Envelope::Bare(items)),
            Value::Object(mut map) => {
                if let Some(Value::Array(items)) = map.remove("data") {
                    return Ok(Envelope::Data(items));
                }
                if let Some(Value::Array(items)) = map.remove(resource.collection_key()) {
                    return Ok(Envelope::Named(items));
                }
                Err(ApiError::Decode(format!(
                    "expected an array or an object with a `data` or `{}` array",
                    resource.collection_key()
                )))
            }
            other => Err(ApiError::Decode(format!(
                "expected a collection, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn into_items(self) -> Vec<Value> {
        match self {
            Envelope::Bare(items) | Envelope::Data(items) | Envelope::Named(items) => items,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Classifies a collection body and decodes every item.
pub fn decode_collection<T: DeserializeOwned>(
    body: Value,
    resource: Resource,
) -> Result<Vec<T>, ApiError> {
    Envelope::classify(body, resource)?
        .into_items()
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| ApiError::Decode(format!("item {index}: {e}")))
        })
        .collect()
}
