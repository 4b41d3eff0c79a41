use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Action, Score};

/// A cell position as `(x, y)`: column first, then row.
pub type Coordinate = (usize, usize);

/// A claim of one cell, annotated with the score the search gave it.
///
/// Two moves are equal when they target the same cell, whatever their hints.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    coordinate: Coordinate,
    score_hint: Score,
}

impl Move {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            score_hint: Score::None,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn score_hint(&self) -> Score {
        self.score_hint
    }
}

impl Action for Move {
    fn with_score_hint(self, hint: Score) -> Self {
        Self {
            score_hint: hint,
            ..self
        }
    }
}

impl From<Coordinate> for Move {
    fn from(coordinate: Coordinate) -> Self {
        Move::new(coordinate)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.coordinate.0, self.coordinate.1)
    }
}
