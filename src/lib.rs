//! Edge Priority: rule-driven edge priority for customizable routing profiles
//!
//! Turns a declarative weighting profile into a dimensionless multiplier in
//! `[0.0, 1.0]` for every edge a search algorithm visits. Profiles are
//! validated once, when compiled, so a malformed profile never reaches a
//! search.
//!
//! # Core Concepts
//!
//! - **Attributes**: typed (categorical, continuous, boolean), possibly
//!   direction-dependent values stored per edge
//! - **Model specification**: ordered `attribute → pattern → multiplier` rules
//! - **Compiled model**: the validated, immutable form of a specification
//! - **Evaluator**: multiplies the first matching factor of every attribute
//!
//! # Example
//!
//! ```
//! use edge_priority::{
//!     compile, road, AttributeRegistry, AttributeSet, Direction, EdgeRecord, ModelSpecification,
//! };
//!
//! let registry = AttributeSet::road_defaults();
//! let spec: ModelSpecification = serde_json::from_str(
//!     r#"{ "road_class": { "PRIMARY": 0.7 }, "road_environment": { "BRIDGE": 0.5 } }"#,
//! )
//! .unwrap();
//! let evaluator = compile(&spec, &registry).unwrap();
//!
//! let mut edge = EdgeRecord::new(&registry);
//! edge.set_text(registry.resolve(road::ROAD_CLASS).unwrap(), "PRIMARY").unwrap();
//! edge.set_text(registry.resolve(road::ROAD_ENVIRONMENT).unwrap(), "BRIDGE").unwrap();
//!
//! assert_eq!(evaluator.evaluate(&edge, Direction::Forward), 0.35);
//! ```

mod attribute;
pub mod model;
pub mod priority;
mod store;

pub use attribute::{
    road, AttributeDef, AttributeError, AttributeHandle, AttributeId, AttributeRegistry,
    AttributeResult, AttributeSet, AttributeValue, DomainKind, EdgeAttributes, EdgeRecord,
};
pub use model::{FactorTable, FactorValue, ModelSpecification, Pattern, Profile, ProfileError, ProfileResult};
pub use priority::{
    compile, CompileError, CompileResult, CompiledModel, CompiledTable, Direction, PriorityEvaluator,
};
pub use store::{ActiveProfile, ProfileStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
