use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single value stored in a [`Bundle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl NavValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            NavValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            NavValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            NavValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NavValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// An insertion-ordered map of named values. Bundles are the argument and
/// saved-state currency of the whole library; they serialize as plain maps so
/// hosts can persist them with whatever serde format they already use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    values: IndexMap<String, NavValue>,
}

impl Bundle {
    pub fn new() -> Self {
        Bundle::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: NavValue) {
        self.values.insert(key.into(), value);
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.insert(key, NavValue::Bool(value));
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key, NavValue::Int(value));
    }

    pub fn put_float(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, NavValue::Float(value));
    }

    pub fn put_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, NavValue::Str(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&NavValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(NavValue::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(NavValue::as_int)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(NavValue::as_float)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(NavValue::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<NavValue> {
        self.values.shift_remove(key)
    }

    /// Copy every entry of `other` into this bundle, overwriting existing
    /// keys. Later sources take precedence, matching argument merge order.
    pub fn put_all(&mut self, other: &Bundle) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NavValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
