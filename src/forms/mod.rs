//! Schema-driven form state and validation.
//!
//! Every entity describes its form as a slice of [`FieldSpec`]s. [`FormState`]
//! holds the raw text of each field plus a parallel error map keyed by local
//! field name, and [`FormState::validate`] turns valid input into the entity's
//! typed draft. Forms never touch the network.

mod schema;

pub use schema::*;

use std::collections::BTreeMap;
use std::marker::PhantomData;

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};

use crate::actor_framework::Entity;
use crate::error::ValidationErrors;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const UNKNOWN_FIELD_MESSAGE: &str = "Campo desconocido";

#[derive(Debug, Clone)]
pub struct FormState<T: Entity> {
    values: BTreeMap<&'static str, String>,
    errors: BTreeMap<&'static str, String>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Default for FormState<T> {
    fn default() -> Self {
        Self::blank()
    }
}

impl<T: Entity> FormState<T> {
    /// Empty form for creating a record; generated defaults are filled in.
    pub fn blank() -> Self {
        let values = T::fields()
            .iter()
            .map(|spec| (spec.key, spec.default_value()))
            .collect();
        Self {
            values,
            errors: BTreeMap::new(),
            _entity: PhantomData,
        }
    }

    /// Form pre-filled from an existing record.
    pub fn prefilled(record: &T) -> Self {
        let source = serde_json::to_value(record).unwrap_or(Value::Null);
        let values = T::fields()
            .iter()
            .map(|spec| {
                let text = source.get(spec.api_field).map(as_input).unwrap_or_default();
                let text = if text.is_empty() {
                    spec.default_value()
                } else {
                    text
                };
                (spec.key, text)
            })
            .collect();
        Self {
            values,
            errors: BTreeMap::new(),
            _entity: PhantomData,
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Sets a field's raw input and clears any error shown for it.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), ValidationErrors> {
        let spec = T::fields()
            .iter()
            .find(|spec| spec.key == key)
            .ok_or_else(|| ValidationErrors::single(key, UNKNOWN_FIELD_MESSAGE))?;
        self.values.insert(spec.key, value.into());
        self.errors.remove(spec.key);
        Ok(())
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Validates every field and converts the input into a typed draft.
    ///
    /// On failure the error map is replaced and returned; nothing is submitted.
    pub fn validate(&mut self) -> Result<T::Draft, ValidationErrors> {
        let mut payload = Map::new();
        let mut errors = BTreeMap::new();

        for spec in T::fields() {
            let raw = self.values.get(spec.key).map(String::as_str).unwrap_or("");
            match convert(spec, raw) {
                Ok(Some(value)) => {
                    payload.insert(spec.api_field.to_string(), value);
                }
                Ok(None) => {}
                Err(message) => {
                    errors.insert(spec.key, message.to_string());
                }
            }
        }

        self.errors = errors;
        if !self.errors.is_empty() {
            return Err(ValidationErrors(
                self.errors
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
        }

        let mut draft: T::Draft = serde_json::from_value(Value::Object(payload))
            .map_err(|e| ValidationErrors::single("_form", e.to_string()))?;
        T::on_submit(&mut draft);
        Ok(draft)
    }
}

/// Renders a JSON value the way a text input would hold it.
fn as_input(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Converts one raw input. `Ok(None)` leaves the field out of the payload.
fn convert(spec: &FieldSpec, raw: &str) -> Result<Option<Value>, &'static str> {
    let trimmed = raw.trim();

    if let FieldKind::Flag = spec.kind {
        return match trimmed.to_ascii_lowercase().as_str() {
            "" | "false" => Ok(Some(Value::Bool(false))),
            "true" => Ok(Some(Value::Bool(true))),
            _ => Err(spec.invalid_message),
        };
    }

    if trimmed.is_empty() {
        return match spec.rule {
            Rule::Optional => Ok(None),
            Rule::Required | Rule::Positive => Err(spec.required_message),
        };
    }

    let positive = spec.rule == Rule::Positive;
    let value = match spec.kind {
        FieldKind::Text => Value::String(raw.to_string()),
        FieldKind::Integer => {
            let n = parse_integer(trimmed).ok_or(spec.invalid_message)?;
            if n > spec.max || (positive && n == 0) {
                return Err(spec.invalid_message);
            }
            Value::Number(n.into())
        }
        FieldKind::Decimal => {
            let n = trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or(spec.invalid_message)?;
            if positive && n <= 0.0 {
                return Err(spec.invalid_message);
            }
            Number::from_f64(n).map(Value::Number).ok_or(spec.invalid_message)?
        }
        FieldKind::Date => {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| spec.invalid_message)?;
            Value::String(trimmed.to_string())
        }
        FieldKind::Choice(options) => {
            if !options.contains(&trimmed) {
                return Err(spec.invalid_message);
            }
            Value::String(trimmed.to_string())
        }
        FieldKind::Flag => unreachable!("flags are handled above"),
    };
    Ok(Some(value))
}

/// Whole numbers, including integral decimals such as `101.0`.
fn parse_integer(input: &str) -> Option<u64> {
    if let Ok(n) = input.parse::<u64>() {
        return Some(n);
    }
    let n = input.parse::<f64>().ok()?;
    let integral = n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64;
    integral.then_some(n as u64)
}
