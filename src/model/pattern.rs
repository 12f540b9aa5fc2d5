//! Rule patterns as written in a model specification

use std::str::FromStr;
use thiserror::Error;

/// Comparison operator of a relational pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparison {
    /// Whether `value <op> threshold` holds
    #[inline]
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Less => value < threshold,
            Comparison::LessOrEqual => value <= threshold,
            Comparison::Greater => value > threshold,
            Comparison::GreaterOrEqual => value >= threshold,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
        }
    }

    /// Split a leading operator off `text`, longest operator first
    fn strip(text: &str) -> Option<(Comparison, &str)> {
        if let Some(rest) = text.strip_prefix("<=") {
            Some((Comparison::LessOrEqual, rest))
        } else if let Some(rest) = text.strip_prefix(">=") {
            Some((Comparison::GreaterOrEqual, rest))
        } else if let Some(rest) = text.strip_prefix('<') {
            Some((Comparison::Less, rest))
        } else {
            text.strip_prefix('>').map(|rest| (Comparison::Greater, rest))
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The pattern text `"*"`, which matches every value
pub const WILDCARD: &str = "*";

/// A classified pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Matches any value
    Wildcard,
    /// Matches one named value of a categorical or boolean attribute
    Literal(String),
    /// Matches continuous values satisfying the comparison
    Relational { op: Comparison, threshold: f64 },
}

/// A relational pattern whose threshold is not a finite number
#[derive(Debug, Clone, PartialEq, Error)]
#[error("'{pattern}' does not compare against a finite number")]
pub struct PatternError {
    pub pattern: String,
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text == WILDCARD {
            return Ok(Pattern::Wildcard);
        }

        match Comparison::strip(text) {
            Some((op, rest)) => rest
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .map(|threshold| Pattern::Relational { op, threshold })
                .ok_or_else(|| PatternError {
                    pattern: text.to_string(),
                }),
            None => Ok(Pattern::Literal(text.to_string())),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::Wildcard => f.write_str(WILDCARD),
            Pattern::Literal(value) => f.write_str(value),
            Pattern::Relational { op, threshold } => write!(f, "{}{}", op, threshold),
        }
    }
}
