//! Attribute registry: name → typed handle lookup

use super::handle::{AttributeDef, AttributeHandle, AttributeId};
use super::kind::DomainKind;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while registering attributes or writing edge values
#[derive(Debug, Error, PartialEq)]
pub enum AttributeError {
    #[error("attribute '{0}' is already registered")]
    DuplicateAttribute(String),

    #[error("categorical attribute '{0}' declares no values")]
    EmptyValueSet(String),

    #[error("categorical attribute '{attribute}' declares value '{value}' twice")]
    DuplicateValue { attribute: String, value: String },

    #[error("categorical attribute '{attribute}' declares {count} values, at most {max} are supported")]
    TooManyValues { attribute: String, count: usize, max: usize },

    #[error("attribute '{attribute}' is {expected}, got a {found} value")]
    WrongKind {
        attribute: String,
        expected: DomainKind,
        found: DomainKind,
    },

    #[error("'{value}' is not a valid value of attribute '{attribute}'")]
    UnknownValue { attribute: String, value: String },

    #[error("attribute '{0}' is not directional, it has no separate backward value")]
    NotDirectional(String),

    #[error("attribute '{0}' is not registered with this edge storage")]
    Unregistered(String),
}

/// Result type for attribute operations
pub type AttributeResult<T> = Result<T, AttributeError>;

/// Read-only lookup of edge attributes by name
///
/// Implementations must be thread-safe: compiled models hold handles
/// resolved from a registry and are shared across search threads.
pub trait AttributeRegistry: Send + Sync {
    /// Resolve an attribute by name
    fn resolve(&self, name: &str) -> Option<&AttributeHandle>;

    /// All registered attributes in registration order
    fn attributes(&self) -> Vec<&AttributeHandle>;
}

/// In-memory attribute registry
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    handles: Vec<AttributeHandle>,
    by_name: HashMap<String, AttributeId>,
}

impl AttributeSet {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions, registering them in order
    pub fn from_defs(defs: impl IntoIterator<Item = AttributeDef>) -> AttributeResult<Self> {
        let mut set = Self::new();
        for def in defs {
            set.register(def)?;
        }
        Ok(set)
    }

    /// Register an attribute and return its storage slot
    pub fn register(&mut self, def: AttributeDef) -> AttributeResult<AttributeId> {
        if self.by_name.contains_key(&def.name) {
            return Err(AttributeError::DuplicateAttribute(def.name));
        }

        if def.kind == DomainKind::Categorical {
            if def.values.is_empty() {
                return Err(AttributeError::EmptyValueSet(def.name));
            }
            let max = u16::MAX as usize + 1;
            if def.values.len() > max {
                return Err(AttributeError::TooManyValues {
                    attribute: def.name,
                    count: def.values.len(),
                    max,
                });
            }
            let mut seen = HashSet::new();
            for value in &def.values {
                if !seen.insert(value.as_str()) {
                    return Err(AttributeError::DuplicateValue {
                        attribute: def.name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(self.insert(def))
    }

    fn insert(&mut self, def: AttributeDef) -> AttributeId {
        let id = AttributeId::new(self.handles.len());
        self.by_name.insert(def.name.clone(), id);
        self.handles.push(AttributeHandle::new(id, def));
        id
    }

    /// Look up a handle by its storage slot
    pub fn get(&self, id: AttributeId) -> Option<&AttributeHandle> {
        self.handles.get(id.index())
    }

    /// Number of registered attributes
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The standard road attributes most routing profiles refer to
    pub fn road_defaults() -> Self {
        let mut set = Self::new();
        for def in road::definitions() {
            set.insert(def);
        }
        set
    }
}

impl AttributeRegistry for AttributeSet {
    fn resolve(&self, name: &str) -> Option<&AttributeHandle> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    fn attributes(&self) -> Vec<&AttributeHandle> {
        self.handles.iter().collect()
    }
}

/// Standard road attribute names and value sets
pub mod road {
    use super::AttributeDef;

    pub const ROAD_CLASS: &str = "road_class";
    pub const ROAD_ENVIRONMENT: &str = "road_environment";
    pub const ROAD_ACCESS: &str = "road_access";
    pub const SURFACE: &str = "surface";
    pub const TOLL: &str = "toll";
    pub const MAX_SPEED: &str = "max_speed";
    pub const MAX_WEIGHT: &str = "max_weight";
    pub const MAX_HEIGHT: &str = "max_height";
    pub const MAX_WIDTH: &str = "max_width";
    pub const ROUNDABOUT: &str = "roundabout";
    pub const GET_OFF_BIKE: &str = "get_off_bike";

    pub const ROAD_CLASS_VALUES: &[&str] = &[
        "OTHER", "MOTORWAY", "TRUNK", "PRIMARY", "SECONDARY", "TERTIARY", "RESIDENTIAL",
        "UNCLASSIFIED", "SERVICE", "ROAD", "TRACK", "BRIDLEWAY", "STEPS", "CYCLEWAY", "PATH",
        "LIVING_STREET", "FOOTWAY", "PEDESTRIAN", "PLATFORM", "CORRIDOR",
    ];

    pub const ROAD_ENVIRONMENT_VALUES: &[&str] =
        &["OTHER", "ROAD", "FERRY", "BRIDGE", "TUNNEL", "FORD"];

    pub const ROAD_ACCESS_VALUES: &[&str] = &[
        "YES", "DESTINATION", "CUSTOMERS", "DELIVERY", "FORESTRY", "AGRICULTURAL", "PRIVATE",
        "OTHER", "NO",
    ];

    pub const SURFACE_VALUES: &[&str] = &[
        "MISSING", "PAVED", "ASPHALT", "CONCRETE", "PAVING_STONES", "COBBLESTONE", "UNPAVED",
        "COMPACTED", "FINE_GRAVEL", "GRAVEL", "GROUND", "DIRT", "GRASS", "SAND", "OTHER",
    ];

    pub const TOLL_VALUES: &[&str] = &["MISSING", "NO", "HGV", "ALL"];

    pub(super) fn definitions() -> Vec<AttributeDef> {
        vec![
            AttributeDef::categorical(ROAD_CLASS, ROAD_CLASS_VALUES.iter().copied()),
            AttributeDef::categorical(ROAD_ENVIRONMENT, ROAD_ENVIRONMENT_VALUES.iter().copied()),
            AttributeDef::categorical(ROAD_ACCESS, ROAD_ACCESS_VALUES.iter().copied()),
            AttributeDef::categorical(SURFACE, SURFACE_VALUES.iter().copied()),
            AttributeDef::categorical(TOLL, TOLL_VALUES.iter().copied()),
            AttributeDef::continuous(MAX_SPEED).directional(),
            AttributeDef::continuous(MAX_WEIGHT),
            AttributeDef::continuous(MAX_HEIGHT),
            AttributeDef::continuous(MAX_WIDTH),
            AttributeDef::boolean(ROUNDABOUT),
            AttributeDef::boolean(GET_OFF_BIKE).directional(),
        ]
    }
}
