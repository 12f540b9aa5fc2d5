//! Priority engine: compiles model specifications and evaluates edges

mod compiler;
mod error;
mod evaluator;
mod types;


pub use compiler::{CompiledModel, CompiledTable, Matcher, Rule};
pub use error::{CompileError, CompileResult, SECTION};
pub use evaluator::{compile, PriorityEvaluator};
pub use types::Direction;
