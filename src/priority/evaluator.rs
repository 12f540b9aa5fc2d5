//! PriorityEvaluator: per-edge priority on the search fast path

use super::compiler::CompiledModel;
use super::error::CompileResult;
use super::types::Direction;
use crate::attribute::{AttributeRegistry, EdgeAttributes};
use crate::model::ModelSpecification;

/// Computes the priority multiplier of an edge traversal
///
/// Holds exactly one compiled model and never mutates it, so one evaluator
/// can be shared (e.g. behind an `Arc`) by any number of search threads.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityEvaluator {
    model: CompiledModel,
}

impl PriorityEvaluator {
    pub fn new(model: CompiledModel) -> Self {
        Self { model }
    }

    /// Compile a specification and wrap the result
    pub fn compile<R>(spec: &ModelSpecification, registry: &R) -> CompileResult<Self>
    where
        R: AttributeRegistry + ?Sized,
    {
        CompiledModel::compile(spec, registry).map(Self::new)
    }

    /// The compiled model this evaluator reads
    pub fn model(&self) -> &CompiledModel {
        &self.model
    }

    /// Priority of traversing `edge` in `direction`, in `[0.0, 1.0]`
    ///
    /// The product of the first matching factor of every attribute in
    /// declaration order; attributes without a matching rule contribute 1.0.
    #[inline]
    pub fn evaluate<E>(&self, edge: &E, direction: Direction) -> f64
    where
        E: EdgeAttributes + ?Sized,
    {
        let mut priority = 1.0;
        for table in self.model.tables() {
            priority *= table.factor_for(table.resolve(edge, direction));
        }
        priority
    }

    /// Priorities for the forward and backward traversal of `edge`
    pub fn evaluate_both<E>(&self, edge: &E) -> (f64, f64)
    where
        E: EdgeAttributes + ?Sized,
    {
        (
            self.evaluate(edge, Direction::Forward),
            self.evaluate(edge, Direction::Backward),
        )
    }
}

/// Compile a model specification into an evaluator
///
/// ```
/// use edge_priority::{
///     compile, AttributeRegistry, AttributeSet, Direction, EdgeRecord, FactorTable,
///     ModelSpecification,
/// };
///
/// let registry = AttributeSet::road_defaults();
/// let spec = ModelSpecification::new()
///     .with("road_class", FactorTable::new().with("PRIMARY", 0.7));
/// let evaluator = compile(&spec, &registry).unwrap();
///
/// let mut edge = EdgeRecord::new(&registry);
/// let road_class = registry.resolve("road_class").unwrap();
/// edge.set_text(road_class, "PRIMARY").unwrap();
/// assert_eq!(evaluator.evaluate(&edge, Direction::Forward), 0.7);
/// ```
pub fn compile<R>(spec: &ModelSpecification, registry: &R) -> CompileResult<PriorityEvaluator>
where
    R: AttributeRegistry + ?Sized,
{
    PriorityEvaluator::compile(spec, registry)
}
