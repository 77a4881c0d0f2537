//! A player's card grid.
//!
//! This module contains:
//! - `CardGrid`, the lookup capability action processors need
//! - `Grid`, the concrete grid with placement rules and per-turn activation
//!   bookkeeping

use crate::card::Card;
use crate::position::GridPosition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Largest number of rows or columns a grid may span
pub const GRID_SIDE: i32 = 3;

/// Card lookup by position.
///
/// This is all the action processors know about a grid.
pub trait CardGrid {
    /// The card at `position`, if any
    fn card(&self, position: GridPosition) -> Option<&Card>;

    /// Mutable access to the card at `position`, if any
    fn card_mut(&mut self, position: GridPosition) -> Option<&mut Card>;

    /// Position of a card equal to `card`, scanning the whole coordinate range
    fn find(&self, card: &Card) -> Option<GridPosition> {
        GridPosition::all().find(|&position| self.card(position) == Some(card))
    }
}

/// Errors from grid placement and activation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GridError {
    #[error("{0} is outside the grid")]
    OutOfBounds(GridPosition),

    #[error("{0} already holds a card")]
    Occupied(GridPosition),

    #[error("{0} does not touch any card")]
    NotAdjacent(GridPosition),

    #[error("a card at {0} would make the grid larger than 3x3")]
    TooLarge(GridPosition),

    #[error("the card at {0} cannot be activated now")]
    NotActivatable(GridPosition),
}

/// Serializable view of a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cards: Vec<PlacedCard>,
    pub activations: Vec<GridPosition>,
}

/// A card together with where it sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub position: GridPosition,
    pub card: Card,
}

/// A player's grid of cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cards: BTreeMap<GridPosition, Card>,
    /// Positions that may still be activated this turn. A position may
    /// appear more than once under an activation pattern.
    activations: Vec<GridPosition>,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid holding only the starting card at the origin
    pub fn with_starting_card(card: Card) -> Self {
        let mut grid = Self::new();
        grid.insert_card(GridPosition::origin(), card);
        grid
    }

    /// Place a card without any placement checks
    pub fn insert_card(&mut self, position: GridPosition, card: Card) {
        self.cards.insert(position, card);
    }

    /// Iterate over placed cards in position order
    pub fn cards(&self) -> impl Iterator<Item = (GridPosition, &Card)> {
        self.cards.iter().map(|(&position, card)| (position, card))
    }

    /// Number of placed cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check whether a new card could go at `position`
    pub fn validate_put_card(&self, position: GridPosition) -> Result<(), GridError> {
        if !position.in_bounds() {
            return Err(GridError::OutOfBounds(position));
        }
        if self.cards.contains_key(&position) {
            return Err(GridError::Occupied(position));
        }
        if self.cards.is_empty() {
            return if position == GridPosition::origin() {
                Ok(())
            } else {
                Err(GridError::NotAdjacent(position))
            };
        }
        if !position
            .neighbors()
            .iter()
            .any(|n| self.cards.contains_key(n))
        {
            return Err(GridError::NotAdjacent(position));
        }

        let xs = self.cards.keys().map(|p| p.x).chain(std::iter::once(position.x));
        let ys = self.cards.keys().map(|p| p.y).chain(std::iter::once(position.y));
        let span = |values: Vec<i32>| {
            let min = values.iter().copied().min().unwrap_or(0);
            let max = values.iter().copied().max().unwrap_or(0);
            max - min + 1
        };
        if span(xs.collect()) > GRID_SIDE || span(ys.collect()) > GRID_SIDE {
            return Err(GridError::TooLarge(position));
        }
        Ok(())
    }

    /// Whether a new card could go at `position`
    pub fn can_put_card(&self, position: GridPosition) -> bool {
        self.validate_put_card(position).is_ok()
    }

    /// Place a newly taken card.
    ///
    /// Every card in the new card's row and column, the new card included,
    /// may then be activated once this turn.
    pub fn put_card(&mut self, position: GridPosition, card: Card) -> Result<(), GridError> {
        self.validate_put_card(position)?;
        self.cards.insert(position, card);
        self.activations = self
            .cards
            .keys()
            .filter(|p| p.x == position.x || p.y == position.y)
            .copied()
            .collect();
        Ok(())
    }

    /// Whether the card at `position` may be activated now
    pub fn can_be_activated(&self, position: GridPosition) -> bool {
        self.cards.contains_key(&position) && self.activations.contains(&position)
    }

    /// Use up one activation of `position`
    pub fn set_activated(&mut self, position: GridPosition) -> Result<(), GridError> {
        if !self.cards.contains_key(&position) {
            return Err(GridError::NotActivatable(position));
        }
        let index = self
            .activations
            .iter()
            .position(|p| *p == position)
            .ok_or(GridError::NotActivatable(position))?;
        self.activations.remove(index);
        Ok(())
    }

    /// Replace the remaining activations with a final-round pattern
    pub fn set_activation_pattern(&mut self, pattern: &[GridPosition]) {
        self.activations = pattern.to_vec();
    }

    /// Positions that may still be activated
    pub fn activations(&self) -> &[GridPosition] {
        &self.activations
    }

    /// Forget any unused activations
    pub fn end_turn(&mut self) {
        self.activations.clear();
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cards: self
                .cards()
                .map(|(position, card)| PlacedCard {
                    position,
                    card: card.clone(),
                })
                .collect(),
            activations: self.activations.clone(),
        }
    }

    /// JSON view of the grid
    pub fn state(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

impl CardGrid for Grid {
    fn card(&self, position: GridPosition) -> Option<&Card> {
        self.cards.get(&position)
    }

    fn card_mut(&mut self, position: GridPosition) -> Option<&mut Card> {
        self.cards.get_mut(&position)
    }
}
