//! Attribute definitions and the handles a registry hands out for them

use super::kind::{AttributeValue, DomainKind};
use serde::{Deserialize, Serialize};

/// Slot index of a registered attribute within edge storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(u32);

impl AttributeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of the attribute's slot in edge storage
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for AttributeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

const BOOLEAN_VALUES: [&str; 2] = ["false", "true"];

/// Declaration of an attribute before it is registered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    /// Unique attribute name (e.g., "road_class")
    pub name: String,
    /// Value domain
    pub kind: DomainKind,
    /// Whether forward and backward traversal read different stored values
    #[serde(default)]
    pub directional: bool,
    /// Value names of a categorical attribute, in ordinal order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl AttributeDef {
    /// A categorical attribute over the given value names
    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: DomainKind::Categorical,
            directional: false,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A continuous (numeric) attribute
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DomainKind::Continuous,
            directional: false,
            values: Vec::new(),
        }
    }

    /// A boolean attribute
    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DomainKind::Boolean,
            directional: false,
            values: Vec::new(),
        }
    }

    /// Mark the attribute as storing separate forward and backward values
    pub fn directional(mut self) -> Self {
        self.directional = true;
        self
    }
}

/// A registered attribute: its definition plus the storage slot it owns
///
/// Handles are only created by a registry, so holding one means the name has
/// already been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeHandle {
    id: AttributeId,
    def: AttributeDef,
}

impl AttributeHandle {
    pub(crate) fn new(id: AttributeId, def: AttributeDef) -> Self {
        Self { id, def }
    }

    pub fn id(&self) -> AttributeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn kind(&self) -> DomainKind {
        self.def.kind
    }

    pub fn is_directional(&self) -> bool {
        self.def.directional
    }

    pub fn definition(&self) -> &AttributeDef {
        &self.def
    }

    /// Valid value names for categorical and boolean attributes
    ///
    /// Empty for continuous attributes.
    pub fn values(&self) -> Vec<&str> {
        match self.def.kind {
            DomainKind::Categorical => self.def.values.iter().map(String::as_str).collect(),
            DomainKind::Boolean => BOOLEAN_VALUES.to_vec(),
            DomainKind::Continuous => Vec::new(),
        }
    }

    /// Parse the string form of a value into a stored value
    ///
    /// Returns `None` when the text does not name a value of this attribute's
    /// domain.
    pub fn parse_value(&self, text: &str) -> Option<AttributeValue> {
        match self.def.kind {
            DomainKind::Categorical => self
                .def
                .values
                .iter()
                .position(|v| v == text)
                .map(|ordinal| AttributeValue::Category(ordinal as u16)),
            DomainKind::Boolean => match text {
                "true" => Some(AttributeValue::Flag(true)),
                "false" => Some(AttributeValue::Flag(false)),
                _ => None,
            },
            DomainKind::Continuous => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(AttributeValue::Number),
        }
    }

    /// The string form of a stored value
    pub fn format_value(&self, value: &AttributeValue) -> String {
        match value {
            AttributeValue::Category(ordinal) => self
                .def
                .values
                .get(*ordinal as usize)
                .cloned()
                .unwrap_or_else(|| format!("<invalid ordinal {}>", ordinal)),
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::Flag(b) => b.to_string(),
        }
    }

    /// Whether a value belongs to this attribute's domain
    pub fn admits(&self, value: &AttributeValue) -> bool {
        match (self.def.kind, value) {
            (DomainKind::Categorical, AttributeValue::Category(ordinal)) => {
                (*ordinal as usize) < self.def.values.len()
            }
            (DomainKind::Continuous, AttributeValue::Number(n)) => !n.is_nan(),
            (DomainKind::Boolean, AttributeValue::Flag(_)) => true,
            _ => false,
        }
    }

    /// Value stored on an edge that never had this attribute set
    pub fn default_value(&self) -> AttributeValue {
        match self.def.kind {
            DomainKind::Categorical => AttributeValue::Category(0),
            DomainKind::Continuous => AttributeValue::Number(0.0),
            DomainKind::Boolean => AttributeValue::Flag(false),
        }
    }
}
