//! Declarative priority models as authored in routing profiles

mod pattern;
mod profile;
mod spec;

pub use pattern::{Comparison, Pattern, PatternError, WILDCARD};
pub use profile::{default_profiles_dir, Profile, ProfileError, ProfileResult};
pub use spec::{FactorTable, FactorValue, ModelSpecification};
