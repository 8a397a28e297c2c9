use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

/// Current values of a card instance's inputs, keyed by input id.
///
/// Each mounted card owns exactly one store. It is not `Clone`; use [`InputStore::snapshot`]
/// for a copy of the values.
#[derive(Debug, Default)]
pub struct InputStore {
    values: BTreeMap<String, String>,
}

impl InputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for `id`, or `default` when the input was never edited.
    pub fn get<'a>(&'a self, id: &str, default: &'a str) -> &'a str {
        self.values.get(id).map(String::as_str).unwrap_or(default)
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        debug!(target: "cardkit.store", input = %id, "input value updated");
        self.values.insert(id, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of every entry as JSON strings, in id order.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(id, value)| (id.clone(), Value::String(value.clone())))
            .collect()
    }
}
