//! Rule compiler: model specification → compiled model

use super::error::{CompileError, CompileResult};
use super::types::Direction;
use crate::attribute::{AttributeHandle, AttributeRegistry, AttributeValue, EdgeAttributes};
use crate::model::{Comparison, FactorTable, FactorValue, ModelSpecification, Pattern};

/// A pattern resolved against an attribute's domain
///
/// Literals are resolved to ordinals (or flags) once here, so matching is a
/// plain comparison on the evaluation path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Matcher {
    Any,
    Category(u16),
    Flag(bool),
    Compare { op: Comparison, threshold: f64 },
}

impl Matcher {
    #[inline]
    pub fn matches(&self, value: AttributeValue) -> bool {
        match (*self, value) {
            (Matcher::Any, _) => true,
            (Matcher::Category(expected), AttributeValue::Category(actual)) => expected == actual,
            (Matcher::Flag(expected), AttributeValue::Flag(actual)) => expected == actual,
            (Matcher::Compare { op, threshold }, AttributeValue::Number(actual)) => {
                op.holds(actual, threshold)
            }
            (matcher, value) => {
                debug_assert!(
                    false,
                    "edge storage returned {:?} for a {:?} rule",
                    value, matcher
                );
                false
            }
        }
    }
}

/// A validated (pattern, multiplier) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pattern: Pattern,
    matcher: Matcher,
    factor: f64,
}

impl Rule {
    /// The pattern as classified from the profile text
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn matcher(&self) -> Matcher {
        self.matcher
    }

    /// Multiplier in `[0.0, 1.0]`
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

/// Compiled rules of one attribute, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTable {
    attribute: AttributeHandle,
    rules: Vec<Rule>,
}

impl CompiledTable {
    pub fn attribute(&self) -> &AttributeHandle {
        &self.attribute
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Value of this attribute on `edge` when traversed in `direction`
    ///
    /// Non-directional attributes always read the forward value.
    #[inline]
    pub fn resolve<E: EdgeAttributes + ?Sized>(&self, edge: &E, direction: Direction) -> AttributeValue {
        let forward = direction.is_forward() || !self.attribute.is_directional();
        edge.get(&self.attribute, forward)
    }

    /// Factor of the first rule matching `value`, or 1.0 if none does
    #[inline]
    pub fn factor_for(&self, value: AttributeValue) -> f64 {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(value))
            .map_or(1.0, |rule| rule.factor)
    }
}

/// Validated, immutable result of compiling a model specification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledModel {
    tables: Vec<CompiledTable>,
}

impl CompiledModel {
    /// Compile `spec` against `registry`
    ///
    /// Attributes and their rules are processed in declaration order and the
    /// first violation aborts compilation.
    pub fn compile<R>(spec: &ModelSpecification, registry: &R) -> CompileResult<Self>
    where
        R: AttributeRegistry + ?Sized,
    {
        let mut tables = Vec::with_capacity(spec.len());

        for (name, table) in spec.iter() {
            let attribute = registry
                .resolve(name)
                .ok_or_else(|| CompileError::UnknownAttribute {
                    name: name.to_string(),
                })?;
            let compiled = compile_table(attribute, table)?;
            tracing::debug!(
                attribute = name,
                kind = %attribute.kind(),
                rules = compiled.rules.len(),
                "compiled priority table"
            );
            tables.push(compiled);
        }

        let model = Self { tables };
        tracing::info!(
            attributes = model.tables.len(),
            rules = model.rule_count(),
            "compiled priority model"
        );
        Ok(model)
    }

    /// Tables in declaration order
    pub fn tables(&self) -> &[CompiledTable] {
        &self.tables
    }

    /// Compiled table for an attribute name
    pub fn table(&self, attribute: &str) -> Option<&CompiledTable> {
        self.tables.iter().find(|t| t.attribute.name() == attribute)
    }

    /// Total number of rules across all attributes
    pub fn rule_count(&self) -> usize {
        self.tables.iter().map(|t| t.rules.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn compile_table(attribute: &AttributeHandle, table: &FactorTable) -> CompileResult<CompiledTable> {
    let rules = table
        .iter()
        .map(|(pattern, factor)| compile_rule(attribute, pattern, factor))
        .collect::<CompileResult<Vec<_>>>()?;

    Ok(CompiledTable {
        attribute: attribute.clone(),
        rules,
    })
}

fn compile_rule(attribute: &AttributeHandle, text: &str, factor: &FactorValue) -> CompileResult<Rule> {
    let unsupported = |reason: String| CompileError::UnsupportedPattern {
        attribute: attribute.name().to_string(),
        pattern: text.to_string(),
        reason,
    };

    let pattern: Pattern = text.parse().map_err(|_| {
        if attribute.kind().accepts_relations() {
            unsupported("the threshold is not a finite number".to_string())
        } else {
            unsupported(format!(
                "comparisons need a continuous attribute, {} is {}",
                attribute.name(),
                attribute.kind()
            ))
        }
    })?;

    let matcher = match &pattern {
        Pattern::Wildcard => Matcher::Any,
        Pattern::Literal(value) => {
            if !attribute.kind().accepts_literals() {
                return Err(unsupported(format!(
                    "literal values need a categorical or boolean attribute, {} is {}",
                    attribute.name(),
                    attribute.kind()
                )));
            }
            match attribute.parse_value(value) {
                Some(AttributeValue::Category(ordinal)) => Matcher::Category(ordinal),
                Some(AttributeValue::Flag(flag)) => Matcher::Flag(flag),
                _ => {
                    return Err(unsupported(format!(
                        "expected one of {}",
                        attribute.values().join(", ")
                    )))
                }
            }
        }
        Pattern::Relational { op, threshold } => {
            if !attribute.kind().accepts_relations() {
                return Err(unsupported(format!(
                    "comparisons need a continuous attribute, {} is {}",
                    attribute.name(),
                    attribute.kind()
                )));
            }
            Matcher::Compare {
                op: *op,
                threshold: *threshold,
            }
        }
    };

    let factor = check_factor(attribute, text, factor)?;
    Ok(Rule {
        pattern,
        matcher,
        factor,
    })
}

fn check_factor(attribute: &AttributeHandle, pattern: &str, factor: &FactorValue) -> CompileResult<f64> {
    let value = factor
        .as_f64()
        .filter(|v| !v.is_nan())
        .ok_or_else(|| CompileError::InvalidFactor {
            attribute: attribute.name().to_string(),
            pattern: pattern.to_string(),
            value: factor.to_string(),
        })?;

    if !(0.0..=1.0).contains(&value) {
        return Err(CompileError::OutOfRangeFactor {
            attribute: attribute.name().to_string(),
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::{road, AttributeSet};

    fn compile_one(attribute: &str, pattern: &str, factor: impl Into<FactorValue>) -> CompileResult<CompiledModel> {
        let spec = ModelSpecification::new()
            .with(attribute, FactorTable::new().with(pattern, factor));
        CompiledModel::compile(&spec, &AttributeSet::road_defaults())
    }

    #[test]
    fn test_empty_spec_compiles_to_empty_model() {
        let model = CompiledModel::compile(&ModelSpecification::new(), &AttributeSet::road_defaults())
            .unwrap();
        assert!(model.is_empty());
        assert_eq!(model.rule_count(), 0);
    }

    #[test]
    fn test_literals_resolve_to_ordinals() {
        let model = compile_one(road::ROAD_CLASS, "PRIMARY", 0.7).unwrap();
        let registry = AttributeSet::road_defaults();
        let primary = registry
            .resolve(road::ROAD_CLASS)
            .unwrap()
            .parse_value("PRIMARY")
            .unwrap();

        let rule = &model.tables()[0].rules()[0];
        assert_eq!(rule.matcher(), Matcher::Category(3));
        assert!(rule.matcher().matches(primary));
        assert_eq!(rule.pattern(), &Pattern::Literal("PRIMARY".into()));
    }

    #[test]
    fn test_boolean_literals_compile_to_flags() {
        let model = compile_one(road::ROUNDABOUT, "true", 0.5).unwrap();
        assert_eq!(model.tables()[0].rules()[0].matcher(), Matcher::Flag(true));
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let err = compile_one("lanes", "*", 0.5).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownAttribute {
                name: "lanes".into()
            }
        );
    }

    #[test]
    fn test_relational_pattern_on_categorical_is_rejected() {
        let err = compile_one(road::ROAD_CLASS, "<100", 0.5).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnsupportedPattern { ref attribute, ref pattern, .. }
                if attribute == "road_class" && pattern == "<100"
        ));
    }

    #[test]
    fn test_literal_on_continuous_is_rejected() {
        let err = compile_one(road::MAX_SPEED, "100", 0.5).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedPattern { .. }));
    }

    #[test]
    fn test_literal_outside_value_set_is_rejected() {
        let err = compile_one(road::ROAD_CLASS, "HIGHWAY", 0.5).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedPattern { .. }));
        assert!(err.to_string().contains("PRIMARY"));

        let err = compile_one(road::ROUNDABOUT, "yes", 0.5).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedPattern { .. }));
    }

    #[test]
    fn test_malformed_threshold_is_rejected() {
        let err = compile_one(road::MAX_SPEED, "<fast", 0.5).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedPattern { .. }));
    }

    #[test]
    fn test_wildcard_is_accepted_everywhere() {
        for attribute in [road::ROAD_CLASS, road::MAX_SPEED, road::ROUNDABOUT] {
            let model = compile_one(attribute, "*", 0.3).unwrap();
            assert_eq!(model.tables()[0].rules()[0].matcher(), Matcher::Any);
        }
    }

    #[test]
    fn test_factor_bounds_are_inclusive() {
        assert!(compile_one(road::ROAD_CLASS, "*", 0.0).is_ok());
        assert!(compile_one(road::ROAD_CLASS, "*", 1.0).is_ok());
    }

    #[test]
    fn test_out_of_range_factors_are_rejected() {
        assert_eq!(
            compile_one(road::ROAD_CLASS, "*", 1.1).unwrap_err(),
            CompileError::OutOfRangeFactor {
                attribute: "road_class".into(),
                value: 1.1
            }
        );
        assert_eq!(
            compile_one(road::ROAD_CLASS, "*", -5).unwrap_err(),
            CompileError::OutOfRangeFactor {
                attribute: "road_class".into(),
                value: -5.0
            }
        );
    }

    #[test]
    fn test_non_numeric_factors_are_rejected() {
        let err = compile_one(road::ROAD_CLASS, "*", "low").unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidFactor {
                attribute: "road_class".into(),
                pattern: "*".into(),
                value: "low".into(),
            }
        );
        assert!(compile_one(road::ROAD_CLASS, "*", "NaN").is_err());
        assert!(compile_one(road::ROAD_CLASS, "*", "0.5").is_ok());
    }

    #[test]
    fn test_pattern_errors_surface_before_factor_errors() {
        let err = compile_one(road::ROAD_CLASS, "<100", 7.0).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedPattern { .. }));
    }

    #[test]
    fn test_first_error_in_declaration_order_wins() {
        let spec = ModelSpecification::new()
            .with(road::SURFACE, FactorTable::new().with("GRAVEL", 2.0))
            .with("lanes", FactorTable::new().with("*", 0.5));
        let err = CompiledModel::compile(&spec, &AttributeSet::road_defaults()).unwrap_err();
        assert!(matches!(err, CompileError::OutOfRangeFactor { .. }));

        let spec = ModelSpecification::new()
            .with("lanes", FactorTable::new().with("*", 0.5))
            .with(road::SURFACE, FactorTable::new().with("GRAVEL", 2.0));
        let err = CompiledModel::compile(&spec, &AttributeSet::road_defaults()).unwrap_err();
        assert!(matches!(err, CompileError::UnknownAttribute { .. }));
    }

    #[test]
    fn test_compilation_is_repeatable() {
        let spec = ModelSpecification::new()
            .with(road::ROAD_CLASS, FactorTable::new().with("PRIMARY", 0.7).with("*", 0.9))
            .with(road::MAX_SPEED, FactorTable::new().with("<50", 0.4));
        let registry = AttributeSet::road_defaults();

        let first = CompiledModel::compile(&spec, &registry).unwrap();
        let second = CompiledModel::compile(&spec, &registry).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.rule_count(), 3);
        assert!(first.table(road::MAX_SPEED).is_some());
    }
}
