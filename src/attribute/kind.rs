//! Attribute domains and stored values

use serde::{Deserialize, Serialize};

/// The value domain of an edge attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    /// Finite set of named values (e.g., road class)
    Categorical,
    /// Ordered numeric range (e.g., maximum speed)
    Continuous,
    /// `true` / `false`
    Boolean,
}

impl DomainKind {
    /// Whether literal patterns are allowed against this domain
    pub fn accepts_literals(&self) -> bool {
        matches!(self, DomainKind::Categorical | DomainKind::Boolean)
    }

    /// Whether relational patterns are allowed against this domain
    pub fn accepts_relations(&self) -> bool {
        matches!(self, DomainKind::Continuous)
    }
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DomainKind::Categorical => "categorical",
            DomainKind::Continuous => "continuous",
            DomainKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A value stored on an edge for one attribute
///
/// Categorical values are stored as the ordinal of the value name within the
/// attribute's value set, so matching never touches strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue {
    Category(u16),
    Number(f64),
    Flag(bool),
}

impl AttributeValue {
    /// The domain this value belongs to
    pub fn kind(&self) -> DomainKind {
        match self {
            AttributeValue::Category(_) => DomainKind::Categorical,
            AttributeValue::Number(_) => DomainKind::Continuous,
            AttributeValue::Flag(_) => DomainKind::Boolean,
        }
    }
}
