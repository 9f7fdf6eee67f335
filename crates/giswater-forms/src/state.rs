//! Host-owned data the renderer reads.
//!
//! - [`ExternalState`]: per-widget value and visibility overrides
//! - [`TableStore`]: pre-fetched `listJson` bodies for table widgets
//!
//! The engine never mutates either. Hosts update [`ExternalState`] from the
//! [`FieldUpdate`]s they receive, for which [`ExternalState::apply`] is a
//! shortcut.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::binding::FieldUpdate;

/// The external entry of one widget.
///
/// An absent `value` or `visible` means "use the form-declared default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl FieldState {
    pub fn with_value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            visible: None,
        }
    }

    pub fn hidden() -> Self {
        Self {
            value: None,
            visible: Some(false),
        }
    }
}

/// Widget key → external entry.
///
/// Keys are widget names, or button group ids for grouped radio buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalState {
    fields: HashMap<String, FieldState>,
}

impl ExternalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for a key.
    pub fn get(&self, key: &str) -> Option<&FieldState> {
        self.fields.get(key)
    }

    /// Returns true if the key has an entry at all.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the external value of a key, treating `null` as absent.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.fields
            .get(key)?
            .value
            .as_ref()
            .filter(|value| !value.is_null())
    }

    /// Returns true if the entry explicitly hides the widget.
    pub fn is_hidden(&self, key: &str) -> bool {
        self.fields
            .get(key)
            .is_some_and(|entry| entry.visible == Some(false))
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.entry(key.into()).or_default().value = Some(value.into());
    }

    pub fn set_visible(&mut self, key: impl Into<String>, visible: bool) {
        self.fields.entry(key.into()).or_default().visible = Some(visible);
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldState> {
        self.fields.remove(key)
    }

    /// Stores the value of a field update under its key.
    pub fn apply(&mut self, update: &FieldUpdate) {
        self.set_value(update.key.clone(), update.value.clone());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldState)> for ExternalState {
    fn from_iter<I: IntoIterator<Item = (String, FieldState)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Result of looking up a table's rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableLookup<'a> {
    /// No data for this table.
    Absent,
    /// Data exists but does not have the `listJson` shape.
    Malformed,
    /// The rows of the table.
    Rows(&'a [Value]),
}

/// Table widget name → `listJson` body.
///
/// A body has the shape `{"body": {"data": {"fields": [{"value": [rows]}]}}}`;
/// each row is an object of column → cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStore {
    tables: HashMap<String, Value>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: impl Into<String>, body: Value) {
        self.tables.insert(table.into(), body);
    }

    pub fn get(&self, table: &str) -> Option<&Value> {
        self.tables.get(table)
    }

    pub fn remove(&mut self, table: &str) -> Option<Value> {
        self.tables.remove(table)
    }

    /// Looks up the rows of a table.
    pub fn lookup(&self, table: &str) -> TableLookup<'_> {
        let Some(body) = self.tables.get(table) else {
            return TableLookup::Absent;
        };
        match body
            .pointer("/body/data/fields/0/value")
            .and_then(Value::as_array)
        {
            Some(rows) => TableLookup::Rows(rows),
            None => TableLookup::Malformed,
        }
    }
}

/// Renders a JSON value as control text.
///
/// Strings are taken as they are, numbers and booleans are formatted, `null`
/// has no text. Arrays and objects are written as JSON.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// Reads a JSON value as a checked state: `true`, `"true"` or `"True"`.
pub fn value_is_checked(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => matches!(text.as_str(), "true" | "True"),
        _ => false,
    }
}

/// Reads a JSON value as a number.
pub fn value_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
