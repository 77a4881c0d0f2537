//! Moving a face-up card from a pile onto a grid.

use crate::grid::{Grid, GridError};
use crate::pile::Pile;
use crate::position::GridPosition;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no face-up card at index {0}")]
    NoSuchCard(usize),

    #[error(transparent)]
    Placement(#[from] GridError),
}

/// Takes cards from piles and places them on grids
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveCard;

impl MoveCard {
    pub fn new() -> Self {
        Self
    }

    /// Move the face-up card at `index` to `destination`.
    ///
    /// Both the card and the spot are checked first, so on error neither
    /// the pile nor the grid has changed.
    pub fn move_card(
        &self,
        pile: &mut Pile,
        index: usize,
        destination: GridPosition,
        grid: &mut Grid,
    ) -> Result<(), MoveError> {
        if pile.get_card(index).is_none() {
            return Err(MoveError::NoSuchCard(index));
        }
        grid.validate_put_card(destination)?;
        let card = pile.take_card(index).ok_or(MoveError::NoSuchCard(index))?;
        grid.put_card(destination, card)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardId};
    use crate::grid::CardGrid;

    fn setup() -> (Pile, Grid) {
        let cards = (1..=5).map(|id| Card::new(CardId(id), 1)).collect();
        (Pile::new(cards, 4), Grid::with_starting_card(Card::new(CardId(0), 1)))
    }

    #[test]
    fn test_move_card_places_and_refills() {
        let (mut pile, mut grid) = setup();
        let expected = pile.get_card(0).cloned().unwrap();
        MoveCard
            .move_card(&mut pile, 0, GridPosition::new(1, 0), &mut grid)
            .unwrap();
        assert_eq!(grid.card(GridPosition::new(1, 0)), Some(&expected));
        assert_eq!(pile.visible().len(), 4);
        assert_eq!(pile.remaining(), 0);
    }

    #[test]
    fn test_bad_destination_leaves_pile_alone() {
        let (mut pile, mut grid) = setup();
        let before = pile.clone();
        let err = MoveCard
            .move_card(&mut pile, 0, GridPosition::new(2, 2), &mut grid)
            .unwrap_err();
        assert_eq!(err, MoveError::Placement(GridError::NotAdjacent(GridPosition::new(2, 2))));
        assert_eq!(pile, before);
    }

    #[test]
    fn test_bad_index() {
        let (mut pile, mut grid) = setup();
        assert_eq!(
            MoveCard.move_card(&mut pile, 9, GridPosition::new(1, 0), &mut grid),
            Err(MoveError::NoSuchCard(9))
        );
    }
}
