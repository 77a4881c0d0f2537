//! Single-player card activation.

use crate::action::{self, ActionError, OutputPolicy};
use crate::grid::CardGrid;
use crate::position::GridPosition;
use crate::resource::Resource;
use tracing::{debug, info, warn};

/// Activates a card using its own effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessAction;

impl ProcessAction {
    pub fn new() -> Self {
        Self
    }

    /// Activate the card at `card` on `grid`.
    ///
    /// `inputs` name each resource paid and the position it is taken from,
    /// `outputs` each resource gained and where it goes (the acting card
    /// only), and every entry of `pollution` places one pollution unit on
    /// the card at that position. The trade must be accepted by the acting
    /// card's upper or lower effect.
    ///
    /// On `Ok` the whole action has been applied; on a rule rejection the
    /// grid is unchanged.
    pub fn activate_card<G: CardGrid + ?Sized>(
        &self,
        card: GridPosition,
        grid: &mut G,
        inputs: &[(Resource, GridPosition)],
        outputs: &[(Resource, GridPosition)],
        pollution: &[GridPosition],
    ) -> Result<(), ActionError> {
        let acting = grid.card(card).ok_or(ActionError::NoCardAt(card))?;
        let plan = match action::plan(
            grid,
            acting,
            acting,
            inputs,
            outputs,
            pollution,
            OutputPolicy::ActingCard,
        ) {
            Ok(plan) => plan,
            Err(err) => {
                debug!(position = %card, reason = %err, "activation rejected");
                return Err(err);
            }
        };

        if let Err(err) = action::commit(grid, &plan) {
            warn!(position = %card, error = %err, "validated activation failed to apply");
            return Err(err);
        }
        info!(
            position = %card,
            inputs = inputs.len(),
            outputs = outputs.len(),
            pollution = pollution.len(),
            "card activated"
        );
        Ok(())
    }
}
