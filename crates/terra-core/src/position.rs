//! Grid coordinates.
//!
//! A player's cards sit on a small square grid. The starting card is at the
//! origin and the grid may grow in any direction, but never past
//! [`GRID_RADIUS`] from it, so every legal position lies in `-2..=2` on both
//! axes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Furthest a card may sit from the starting card on either axis
pub const GRID_RADIUS: i32 = 2;

/// Position of a card on a player's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct GridPosition {
    /// Column (increases to the right)
    pub x: i32,
    /// Row (increases downwards)
    pub y: i32,
}

impl GridPosition {
    /// Create a new grid position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The starting card's position
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Whether this position lies within the bounded coordinate range
    pub fn in_bounds(&self) -> bool {
        self.x.abs() <= GRID_RADIUS && self.y.abs() <= GRID_RADIUS
    }

    /// The four orthogonal neighbours
    pub fn neighbors(&self) -> [GridPosition; 4] {
        [
            GridPosition::new(self.x + 1, self.y),
            GridPosition::new(self.x - 1, self.y),
            GridPosition::new(self.x, self.y + 1),
            GridPosition::new(self.x, self.y - 1),
        ]
    }

    /// Every position in the bounded coordinate range, row by row
    pub fn all() -> impl Iterator<Item = GridPosition> {
        (-GRID_RADIUS..=GRID_RADIUS)
            .flat_map(|y| (-GRID_RADIUS..=GRID_RADIUS).map(move |x| GridPosition::new(x, y)))
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
