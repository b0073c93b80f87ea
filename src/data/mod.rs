//! # Tabular Data Model
//!
//! The engine does not parse spreadsheet files; a collaborator hands it an
//! ordered list of column headers and a list of rows, each row a mapping
//! from header to raw cell value. These types mirror what a
//! sheet-to-JSON conversion produces: cells are strings, numbers or
//! empty, and a row is only meaningful when read against its header set.

mod format;
mod placeholder;

pub use format::format_value;
pub use placeholder::{contains_placeholder, resolve};

use std::collections::HashMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PergaminoError;

/// A raw cell value.
///
/// Untagged, so JSON `null` / number / string deserialize directly into
/// the matching variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

/// The ordered, validated column header set.
///
/// Construction rejects duplicate names and names containing placeholder
/// braces. That keeps `{{header}}` tokens disjoint from one another, so
/// substitution order can never affect the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Headers(Vec<String>);

impl Headers {
    pub fn new(names: Vec<String>) -> Result<Self, PergaminoError> {
        let mut seen = HashSet::new();
        for name in &names {
            if name.contains("{{") || name.contains("}}") {
                return Err(PergaminoError::InvalidHeaders(format!(
                    "header {name:?} contains placeholder braces"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(PergaminoError::InvalidHeaders(format!(
                    "duplicate header {name:?}"
                )));
            }
        }
        Ok(Self(names))
    }

    /// The first column's name, used for output artifact naming.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for Headers {
    type Error = PergaminoError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Headers::new(names)
    }
}

impl From<Headers> for Vec<String> {
    fn from(headers: Headers) -> Self {
        headers.0
    }
}

/// One data row: a mapping from column header to raw value.
///
/// Absent columns read as [`Value::Empty`], matching how a sparse
/// spreadsheet row behaves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(HashMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> &Value {
        self.0.get(column).unwrap_or(&Value::Empty)
    }
}

impl From<HashMap<String, Value>> for Row {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
