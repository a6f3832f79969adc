//! `JsonOps` — the operations contract over `serde_json::Value`.
//!
//! JSON has a single number type, so widths are not preserved: every integer
//! width is stored as a JSON integer and read back as [`Number::Long`];
//! floats are read back as [`Number::Double`]. Non-finite floats have no JSON
//! form and become `null`.
//!
//! Relies on serde_json's `preserve_order` feature so that object iteration
//! is insertion order, matching [`crate::Node`] objects.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{OpsError, Result};
use crate::number::Number;
use crate::ops::{DynamicOps, MapLike, Stream};
use crate::result::DataResult;

/// Strict operations over `serde_json::Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOps;

impl fmt::Display for JsonOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JSON")
    }
}

fn json_number(f: f64) -> Value {
    serde_json::Number::from_f64(f)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// The object key for a primitive; containers and null have none.
fn primitive_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl DynamicOps for JsonOps {
    type Value = Value;

    fn empty(&self) -> Value {
        Value::Null
    }

    fn empty_list(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn empty_map(&self) -> Value {
        Value::Object(Map::new())
    }

    fn create_numeric(&self, n: Number) -> Value {
        match n {
            Number::Float(v) => json_number(v as f64),
            Number::Double(v) => json_number(v),
            integer => Value::Number(integer.as_i64().into()),
        }
    }

    fn create_boolean(&self, v: bool) -> Value {
        Value::Bool(v)
    }

    fn create_string(&self, v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn create_list(&self, items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(items.into_iter().collect())
    }

    fn create_map(&self, pairs: impl IntoIterator<Item = (Value, Value)>) -> Value {
        let mut result = Map::new();
        for (key, value) in pairs {
            match primitive_key(&key) {
                Some(k) => {
                    result.insert(k, value);
                }
                None => tracing::warn!(%key, "create_map: skipping non-primitive key"),
            }
        }
        Value::Object(result)
    }

    fn get_number_value(&self, input: &Value) -> DataResult<Number> {
        match input {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataResult::success(Number::Long(i))
                } else if let Some(f) = n.as_f64() {
                    DataResult::success(Number::Double(f))
                } else {
                    DataResult::error(OpsError::NotANumber(input.to_string()))
                }
            }
            Value::Bool(b) => DataResult::success(Number::Int(*b as i32)),
            _ => DataResult::error(OpsError::NotANumber(input.to_string())),
        }
    }

    fn get_string_value(&self, input: &Value) -> DataResult<String> {
        match input {
            Value::String(s) => DataResult::success(s.clone()),
            _ => DataResult::error(OpsError::NotAString(input.to_string())),
        }
    }

    fn get_map_values<'a>(&self, input: &'a Value) -> DataResult<Stream<'a, (Value, Value)>> {
        match input {
            Value::Object(map) => {
                let pairs: Stream<'a, (Value, Value)> =
                    Box::new(map.iter().map(|(k, v)| (Value::String(k.clone()), v.clone())));
                DataResult::success(pairs)
            }
            _ => DataResult::error(OpsError::NotAMap(input.to_string())),
        }
    }

    fn get_map<'a>(&self, input: &'a Value) -> DataResult<Box<dyn MapLike<Value> + 'a>> {
        match input {
            Value::Object(map) => {
                let view: Box<dyn MapLike<Value> + 'a> = Box::new(JsonMapView { map });
                DataResult::success(view)
            }
            _ => DataResult::error(OpsError::NotAMap(input.to_string())),
        }
    }

    fn get_stream<'a>(&self, input: &'a Value) -> DataResult<Stream<'a, Value>> {
        match input {
            Value::Array(arr) => {
                let items: Stream<'a, Value> = Box::new(arr.iter().cloned());
                DataResult::success(items)
            }
            _ => DataResult::error(OpsError::NotAList(input.to_string())),
        }
    }

    fn merge_to_list(&self, list: &Value, value: Value) -> DataResult<Value> {
        match list {
            Value::Null => DataResult::success(Value::Array(vec![value])),
            Value::Array(arr) => {
                let mut result = Vec::with_capacity(arr.len() + 1);
                result.extend(arr.iter().cloned());
                result.push(value);
                DataResult::success(Value::Array(result))
            }
            _ => DataResult::error_with_partial(OpsError::NotAList(list.to_string()), list.clone()),
        }
    }

    fn merge_to_map(&self, map: &Value, key: Value, value: Value) -> DataResult<Value> {
        let Value::String(key) = key else {
            return DataResult::error_with_partial(
                OpsError::KeyNotString(key.to_string()),
                map.clone(),
            );
        };
        match map {
            Value::Null => {
                let mut result = Map::new();
                result.insert(key, value);
                DataResult::success(Value::Object(result))
            }
            Value::Object(existing) => {
                let mut result = Map::new();
                result.insert(key, value);
                for (k, v) in existing {
                    result.insert(k.clone(), v.clone());
                }
                DataResult::success(Value::Object(result))
            }
            _ => DataResult::error_with_partial(OpsError::NotAMap(map.to_string()), map.clone()),
        }
    }

    fn merge_entries_to_map(
        &self,
        map: &Value,
        entries: impl IntoIterator<Item = (Value, Value)>,
    ) -> DataResult<Value> {
        let mut result = match map {
            Value::Null => Map::new(),
            Value::Object(existing) => existing.clone(),
            _ => {
                return DataResult::error_with_partial(
                    OpsError::NotAMap(map.to_string()),
                    map.clone(),
                )
            }
        };

        let mut missed = Vec::new();
        for (key, value) in entries {
            match key {
                Value::String(k) => {
                    result.insert(k, value);
                }
                other => missed.push(other.to_string()),
            }
        }

        if missed.is_empty() {
            DataResult::success(Value::Object(result))
        } else {
            DataResult::error_with_partial(OpsError::KeysNotStrings(missed), Value::Object(result))
        }
    }

    fn merge(&self, first: &Value, second: &Value) -> Result<Value> {
        match (first, second) {
            (Value::Null, _) => Ok(second.clone()),
            (_, Value::Null) => Ok(first.clone()),
            (Value::Object(a), Value::Object(b)) => {
                let mut result = a.clone();
                for (k, v) in b {
                    result.insert(k.clone(), v.clone());
                }
                Ok(Value::Object(result))
            }
            (Value::Array(a), Value::Array(b)) => {
                Ok(Value::Array(a.iter().chain(b.iter()).cloned().collect()))
            }
            _ => Err(OpsError::CannotMerge {
                first: first.to_string(),
                second: second.to_string(),
            }),
        }
    }

    fn remove(&self, input: &Value, key: &str) -> Value {
        match input {
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn convert_to<U: DynamicOps>(&self, out: &U, input: &Value) -> U::Value {
        tracing::trace!(target_ops = std::any::type_name::<U>(), "converting from JSON");
        match input {
            Value::Null => out.empty(),
            Value::Bool(b) => out.create_boolean(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => out.create_int(small),
                        Err(_) => out.create_long(i),
                    }
                } else if let Some(f) = n.as_f64() {
                    out.create_double(f)
                } else {
                    out.empty()
                }
            }
            Value::String(s) => out.create_string(s),
            Value::Array(_) => self.convert_list(out, input),
            Value::Object(_) => self.convert_map(out, input),
        }
    }
}

/// Borrowing view over a JSON object.
struct JsonMapView<'a> {
    map: &'a Map<String, Value>,
}

impl MapLike<Value> for JsonMapView<'_> {
    fn get(&self, key: &Value) -> Option<&Value> {
        match key {
            Value::String(s) => self.map.get(s),
            _ => None,
        }
    }

    fn get_str(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    fn entries(&self) -> Stream<'_, (Value, &Value)> {
        Box::new(self.map.iter().map(|(k, v)| (Value::String(k.clone()), v)))
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
