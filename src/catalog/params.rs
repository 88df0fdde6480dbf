use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::catalog::errors::InputError;

/// Request parameters keyed by name.
///
/// A key seen once holds a string, a key repeated in the query string holds an
/// array of strings in the order they arrived. Bodies decoded from JSON may
/// carry arbitrary values, which the individual parsers validate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Map<String, Value>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn from_query(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut params = Map::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = Value::String(value.into_owned());
            match params.entry(key.into_owned()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    Value::Array(items) => items.push(value),
                    existing => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                },
            }
        }
        Self(params)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Normalize a parameter that may be absent, a single string, or a list of
/// strings. `ctx` names the parameter in error messages.
pub fn parse_strings_param(
    param: Option<&Value>,
    ctx: &str,
) -> Result<Option<Vec<String>>, InputError> {
    let not_a_string = || InputError::NotAString {
        ctx: ctx.to_string(),
    };

    match param {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(not_a_string))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(not_a_string()),
    }
}
