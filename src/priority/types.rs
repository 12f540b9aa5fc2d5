//! Traversal direction

/// Direction in which an edge is traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Along the edge's stored orientation
    #[default]
    Forward,
    /// Against the edge's stored orientation
    Backward,
}

impl Direction {
    #[inline]
    pub fn is_forward(&self) -> bool {
        matches!(self, Direction::Forward)
    }

    /// The opposite direction
    pub fn reverse(&self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl From<bool> for Direction {
    /// `true` is forward, matching the storage convention of `EdgeAttributes::get`
    fn from(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}
