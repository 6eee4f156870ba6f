//! Info source payload for a show.
//!
//! The payload is an open JSON object; accessors here apply the lenient
//! parsing rules the reconciler relies on, so no malformed field ever turns
//! into an error.

use crate::constants::info::TRANSIENT_KEYS;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowInfo(Map<String, Value>);

impl ShowInfo {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wraps a JSON value; anything other than an object yields `None`.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Drops the bookkeeping keys the info source may attach.
    pub fn strip_transient(&mut self) {
        for key in TRANSIENT_KEYS {
            self.0.remove(*key);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String field, or an empty string when absent or not a string.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// `0` when the key is absent; integers and integer strings are parsed,
    /// anything else becomes `None`.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        match self.0.get("year") {
            None => Some(0),
            Some(value) => as_integer(value).and_then(|y| i32::try_from(y).ok()),
        }
    }

    #[must_use]
    pub fn airs_time(&self) -> Option<String> {
        self.0
            .get("airs_time")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    #[must_use]
    pub fn airs_dayofweek(&self) -> Option<&str> {
        self.0.get("airs_dayofweek").and_then(Value::as_str)
    }

    /// `lastupdated` as unix seconds, if present and integral.
    #[must_use]
    pub fn last_updated(&self) -> Option<i64> {
        self.0.get("lastupdated").and_then(as_integer)
    }

    /// The raw `titles` list, unfiltered. Empty when missing or not a list.
    #[must_use]
    pub fn raw_titles(&self) -> &[Value] {
        self.0
            .get("titles")
            .and_then(Value::as_array)
            .map_or(&[] as &[Value], Vec::as_slice)
    }

    /// String-valued image URLs for one category; other entries are skipped.
    #[must_use]
    pub fn images(&self, category: &str) -> Vec<&str> {
        self.0
            .get("images")
            .and_then(|images| images.get(category))
            .and_then(Value::as_array)
            .map(|urls| urls.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for ShowInfo {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
