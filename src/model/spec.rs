//! Model specification: the declarative, insertion-ordered priority rules
//!
//! Declaration order is significant twice over: rules inside a table are
//! matched first-to-last, and attributes are compiled (and report errors) in
//! the order they were declared. Both levels are held in `IndexMap`s.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A multiplier as supplied by the profile author, before coercion
///
/// Any document value is accepted here; whether it holds a usable number is
/// decided when the model is compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FactorValue {
    /// Coerce to a float; `None` if the value does not hold a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FactorValue::Number(n) => Some(*n),
            FactorValue::Text(s) => s.trim().parse().ok(),
            FactorValue::Other(_) => None,
        }
    }
}

impl From<f64> for FactorValue {
    fn from(n: f64) -> Self {
        FactorValue::Number(n)
    }
}

impl From<i32> for FactorValue {
    fn from(n: i32) -> Self {
        FactorValue::Number(f64::from(n))
    }
}

impl From<&str> for FactorValue {
    fn from(s: &str) -> Self {
        FactorValue::Text(s.to_string())
    }
}

impl fmt::Display for FactorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the fractional part: -5 renders as "-5.0"
            FactorValue::Number(n) => write!(f, "{:?}", n),
            FactorValue::Text(s) => f.write_str(s),
            FactorValue::Other(value) => write!(f, "{}", value),
        }
    }
}

/// An empty YAML section (`priority:`) is null; read it as an empty map
fn null_as_empty<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Ok(Option::<IndexMap<String, V>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered pattern → multiplier rules for one attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorTable {
    #[serde(deserialize_with = "null_as_empty")]
    rules: IndexMap<String, FactorValue>,
}

impl FactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule; an existing pattern keeps its position and takes the new factor
    pub fn insert(&mut self, pattern: impl Into<String>, factor: impl Into<FactorValue>) -> Option<FactorValue> {
        self.rules.insert(pattern.into(), factor.into())
    }

    /// Builder form of [`FactorTable::insert`]
    pub fn with(mut self, pattern: impl Into<String>, factor: impl Into<FactorValue>) -> Self {
        self.insert(pattern, factor);
        self
    }

    pub fn get(&self, pattern: &str) -> Option<&FactorValue> {
        self.rules.get(pattern)
    }

    pub fn remove(&mut self, pattern: &str) -> Option<FactorValue> {
        self.rules.shift_remove(pattern)
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactorValue)> {
        self.rules.iter().map(|(p, f)| (p.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Ordered attribute name → factor table mapping
///
/// # Example
///
/// ```
/// use edge_priority::{FactorTable, ModelSpecification};
///
/// let spec = ModelSpecification::new()
///     .with("road_class", FactorTable::new().with("PRIMARY", 0.7))
///     .with("max_speed", FactorTable::new().with("<100", 0.5));
///
/// let names: Vec<_> = spec.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["road_class", "max_speed"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSpecification {
    #[serde(deserialize_with = "null_as_empty")]
    tables: IndexMap<String, FactorTable>,
}

impl ModelSpecification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare rules for an attribute; redeclaring keeps the original position
    pub fn insert(&mut self, attribute: impl Into<String>, table: FactorTable) -> Option<FactorTable> {
        self.tables.insert(attribute.into(), table)
    }

    /// Builder form of [`ModelSpecification::insert`]
    pub fn with(mut self, attribute: impl Into<String>, table: FactorTable) -> Self {
        self.insert(attribute, table);
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&FactorTable> {
        self.tables.get(attribute)
    }

    pub fn remove(&mut self, attribute: &str) -> Option<FactorTable> {
        self.tables.shift_remove(attribute)
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Attribute tables in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactorTable)> {
        self.tables.iter().map(|(a, t)| (a.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
