//! Card activation with help from another player's card.
//!
//! The acting card pays and receives resources on its own grid, but the
//! trade is judged by the effects of the assisting card. The assisting
//! player's grid is only read.

use crate::action::{self, ActionError, OutputPolicy};
use crate::card::Card;
use crate::grid::CardGrid;
use crate::player::AssistingPlayer;
use crate::position::GridPosition;
use crate::resource::Resource;
use tracing::{debug, info, warn};

/// Activates a card using an effect borrowed from another player.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessActionAssistance;

impl ProcessActionAssistance {
    pub fn new() -> Self {
        Self
    }

    /// Activate the card at `card` on `grid` with `assisting_card`'s effects.
    ///
    /// The acting card must accept assistance and both cards must be active.
    /// `assisting_card` must still be on `assisting_player`'s grid unchanged.
    /// Otherwise this behaves like
    /// [`ProcessAction::activate_card`](crate::ProcessAction::activate_card),
    /// with outputs going back to the acting card.
    #[allow(clippy::too_many_arguments)]
    pub fn activate_card<G, P>(
        &self,
        card: GridPosition,
        grid: &mut G,
        assisting_player: &P,
        assisting_card: &Card,
        inputs: &[(Resource, GridPosition)],
        outputs: &[(Resource, GridPosition)],
        pollution: &[GridPosition],
    ) -> Result<(), ActionError>
    where
        G: CardGrid + ?Sized,
        P: AssistingPlayer + ?Sized,
    {
        let acting = grid.card(card).ok_or(ActionError::NoCardAt(card))?;
        let checked = check_assistance(acting, assisting_player, assisting_card);
        let plan = match checked.and_then(|()| {
            action::plan(
                &*grid,
                acting,
                assisting_card,
                inputs,
                outputs,
                pollution,
                OutputPolicy::AssistedCard,
            )
        }) {
            Ok(plan) => plan,
            Err(err) => {
                debug!(
                    position = %card,
                    assisting_card = %assisting_card.id(),
                    reason = %err,
                    "assisted activation rejected"
                );
                return Err(err);
            }
        };

        if let Err(err) = action::commit(grid, &plan) {
            warn!(position = %card, error = %err, "validated assisted activation failed to apply");
            return Err(err);
        }
        info!(
            position = %card,
            assisting_card = %assisting_card.id(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            pollution = pollution.len(),
            "card activated with assistance"
        );
        Ok(())
    }
}

fn check_assistance<P: AssistingPlayer + ?Sized>(
    acting: &Card,
    assisting_player: &P,
    assisting_card: &Card,
) -> Result<(), ActionError> {
    if !acting.has_assistance() {
        return Err(ActionError::NoAssistance(acting.id()));
    }
    if !acting.is_active() {
        return Err(ActionError::ActingCardInactive(acting.id()));
    }
    if !assisting_card.is_active() {
        return Err(ActionError::AssistingCardInactive(assisting_card.id()));
    }

    if assisting_player.grid().find(assisting_card).is_none() {
        return Err(ActionError::AssistingCardNotFound(assisting_card.id()));
    }
    Ok(())
}
