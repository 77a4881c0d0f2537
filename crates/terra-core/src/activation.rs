//! Final-round activation patterns.
//!
//! Each player holds two patterns and picks one for the extra round after
//! the last regular turn. Picking installs the pattern's positions as the
//! grid's remaining activations.

use crate::grid::Grid;
use crate::position::GridPosition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("activation pattern already selected")]
pub struct AlreadySelected;

/// A set of grid positions to activate in the final round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationPattern {
    pattern: Vec<GridPosition>,
    selected: bool,
}

impl ActivationPattern {
    pub fn new(pattern: Vec<GridPosition>) -> Self {
        Self {
            pattern,
            selected: false,
        }
    }

    pub fn pattern(&self) -> &[GridPosition] {
        &self.pattern
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Install this pattern on `grid`. A pattern can be selected only once.
    pub fn select(&mut self, grid: &mut Grid) -> Result<(), AlreadySelected> {
        if self.selected {
            return Err(AlreadySelected);
        }
        grid.set_activation_pattern(&self.pattern);
        self.selected = true;
        Ok(())
    }

    /// JSON view of the pattern
    pub fn state(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardId};

    #[test]
    fn test_select_installs_pattern_once() {
        let mut grid = Grid::with_starting_card(Card::new(CardId(0), 1));
        let mut pattern = ActivationPattern::new(vec![GridPosition::origin(), GridPosition::origin()]);

        assert!(!pattern.is_selected());
        pattern.select(&mut grid).unwrap();
        assert!(pattern.is_selected());
        assert_eq!(grid.activations(), pattern.pattern());

        assert_eq!(pattern.select(&mut grid), Err(AlreadySelected));
    }

    #[test]
    fn test_state_is_json() {
        let pattern = ActivationPattern::new(vec![GridPosition::new(1, -1)]);
        let value: serde_json::Value = serde_json::from_str(&pattern.state()).unwrap();
        assert_eq!(value["selected"], false);
        assert_eq!(value["pattern"][0]["y"], -1);
    }
}
