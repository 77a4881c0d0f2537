//! Player state.
//!
//! This module contains:
//! - `AssistingPlayer`, what an assisted activation needs from the partner
//! - `Player`, a grid plus the two activation patterns and two scoring
//!   methods dealt at the start of the game

use crate::activation::ActivationPattern;
use crate::grid::{CardGrid, Grid};
use crate::resource::{Resource, ResourceHand};
use crate::scoring::ScoringMethod;

/// Player identifier
pub type PlayerId = u8;

/// A player whose grid can be searched for an assisting card
pub trait AssistingPlayer {
    type Grid: CardGrid;

    fn grid(&self) -> &Self::Grid;
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub grid: Grid,
    pub activation_patterns: [ActivationPattern; 2],
    pub scoring_methods: [ScoringMethod; 2],
}

impl Player {
    pub fn new(
        id: PlayerId,
        grid: Grid,
        activation_patterns: [ActivationPattern; 2],
        scoring_methods: [ScoringMethod; 2],
    ) -> Self {
        Self {
            id,
            grid,
            activation_patterns,
            scoring_methods,
        }
    }

    /// Everything on the grid, with pollution counted as [`Resource::Pollution`]
    pub fn resource_totals(&self) -> ResourceHand {
        let mut totals = ResourceHand::new();
        for (_, card) in self.grid.cards() {
            totals.add_hand(card.resources());
            totals.add(Resource::Pollution, card.pollution_count());
        }
        totals
    }
}

impl AssistingPlayer for Player {
    type Grid = Grid;

    fn grid(&self) -> &Grid {
        &self.grid
    }
}
