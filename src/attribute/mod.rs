//! Typed edge attributes: domains, the registry that names them, and
//! per-edge storage

mod edge;
mod handle;
mod kind;
mod registry;

pub use edge::{EdgeAttributes, EdgeRecord};
pub use handle::{AttributeDef, AttributeHandle, AttributeId};
pub use kind::{AttributeValue, DomainKind};
pub use registry::{road, AttributeError, AttributeRegistry, AttributeResult, AttributeSet};
