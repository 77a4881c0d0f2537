//! Shared action resolution.
//!
//! Both action processors resolve an activation in two phases. [`plan`]
//! validates the whole action against the current grid and groups it per
//! position; [`commit`] then applies the groups in a fixed order: pollution
//! first, then inputs, then outputs. Nothing is mutated unless the whole
//! action validated, so a rejected action leaves the grid untouched.

use crate::card::{Card, CardError, CardId};
use crate::grid::CardGrid;
use crate::position::GridPosition;
use crate::resource::{Resource, ResourceHand};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why an activation was not applied.
///
/// Everything except [`ActionError::Contract`] is an ordinary rule rejection:
/// the grid is unchanged and the player may try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no card at {0}")]
    NoCardAt(GridPosition),

    #[error("acting card {0} is inactive")]
    ActingCardInactive(CardId),

    #[error("{amount} pollution does not fit on the card at {position}")]
    PollutionDoesNotFit { position: GridPosition, amount: u32 },

    #[error("card at {0} cannot pay the requested inputs")]
    InputsUnavailable(GridPosition),

    #[error("outputs must go to a single position")]
    MultipleOutputPositions,

    #[error("outputs at {0} are not on the acting card")]
    OutputNotOnActingCard(GridPosition),

    #[error("card at {0} cannot receive the outputs")]
    OutputsRejected(GridPosition),

    #[error("no effect accepts this trade")]
    EffectRejected,

    #[error("card {0} cannot receive assistance")]
    NoAssistance(CardId),

    #[error("assisting card {0} is inactive")]
    AssistingCardInactive(CardId),

    #[error("assisting card {0} is not on the assisting player's grid")]
    AssistingCardNotFound(CardId),

    #[error("validated action failed to apply: {0}")]
    Contract(#[from] CardError),
}

impl ActionError {
    /// Whether this is a rule rejection rather than a broken contract
    pub fn is_rejection(&self) -> bool {
        !matches!(self, ActionError::Contract(_))
    }
}

/// Where outputs may land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputPolicy {
    /// Only on the acting card
    ActingCard,
    /// Only on the acting card, which must itself accept assistance
    AssistedCard,
}

/// A validated action, grouped by grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActionPlan {
    pub pollution: BTreeMap<GridPosition, u32>,
    pub inputs: BTreeMap<GridPosition, ResourceHand>,
    pub output: Option<(GridPosition, ResourceHand)>,
}

fn group_pollution(pollution: &[GridPosition]) -> BTreeMap<GridPosition, u32> {
    let mut grouped = BTreeMap::new();
    for &position in pollution {
        *grouped.entry(position).or_insert(0) += 1;
    }
    grouped
}

fn group_resources(pairs: &[(Resource, GridPosition)]) -> BTreeMap<GridPosition, ResourceHand> {
    let mut grouped: BTreeMap<GridPosition, ResourceHand> = BTreeMap::new();
    for &(resource, position) in pairs {
        grouped.entry(position).or_default().add(resource, 1);
    }
    grouped
}

/// Whether placing `amount` on `card` will leave it inactive
fn fills_card(card: &Card, amount: u32) -> bool {
    amount > 0 && amount >= card.pollution_headroom()
}

/// Validate an activation of `acting` whose acceptance is decided by the
/// effects of `rule`.
///
/// `rule` is the acting card itself for a plain activation and the partner's
/// card for an assisted one. Resources and pollution always come from and go
/// to `grid`.
pub(crate) fn plan<G: CardGrid + ?Sized>(
    grid: &G,
    acting: &Card,
    rule: &Card,
    inputs: &[(Resource, GridPosition)],
    outputs: &[(Resource, GridPosition)],
    pollution: &[GridPosition],
    policy: OutputPolicy,
) -> Result<ActionPlan, ActionError> {
    if !acting.is_active() {
        return Err(ActionError::ActingCardInactive(acting.id()));
    }

    let grouped_pollution = group_pollution(pollution);
    for (&position, &amount) in &grouped_pollution {
        let card = grid.card(position).ok_or(ActionError::NoCardAt(position))?;
        if !card.can_place_pollution(amount) {
            return Err(ActionError::PollutionDoesNotFit { position, amount });
        }
    }

    // A card filled up by this action's pollution is inactive by the time
    // inputs are taken and outputs are put.
    let filled = |position: &GridPosition, card: &Card| {
        grouped_pollution
            .get(position)
            .is_some_and(|&amount| fills_card(card, amount))
    };

    let grouped_inputs = group_resources(inputs);
    for (position, hand) in &grouped_inputs {
        let card = grid.card(*position).ok_or(ActionError::NoCardAt(*position))?;
        if !card.can_get_hand(hand) || filled(position, card) {
            return Err(ActionError::InputsUnavailable(*position));
        }
    }

    let mut grouped_outputs = group_resources(outputs);
    if grouped_outputs.len() > 1 {
        return Err(ActionError::MultipleOutputPositions);
    }
    let output = grouped_outputs.pop_first();
    if let Some((position, hand)) = &output {
        let card = grid.card(*position).ok_or(ActionError::NoCardAt(*position))?;
        if card != acting {
            return Err(ActionError::OutputNotOnActingCard(*position));
        }
        if policy == OutputPolicy::AssistedCard && !card.has_assistance() {
            return Err(ActionError::NoAssistance(card.id()));
        }
        let gained = hand.to_vec();
        if !acting.can_put_resources(&gained) || filled(position, card) {
            return Err(ActionError::OutputsRejected(*position));
        }
    }

    let input_list: Vec<Resource> = inputs.iter().map(|&(resource, _)| resource).collect();
    let output_list: Vec<Resource> = outputs.iter().map(|&(resource, _)| resource).collect();
    let pollution_amount = pollution.len() as u32;
    if !rule.check(&input_list, &output_list, pollution_amount)
        && !rule.check_lower(&input_list, &output_list, pollution_amount)
    {
        return Err(ActionError::EffectRejected);
    }

    Ok(ActionPlan {
        pollution: grouped_pollution,
        inputs: grouped_inputs,
        output,
    })
}

/// Apply a validated plan. Fails only if the grid changed since validation.
pub(crate) fn commit<G: CardGrid + ?Sized>(grid: &mut G, plan: &ActionPlan) -> Result<(), ActionError> {
    for (&position, &amount) in &plan.pollution {
        grid.card_mut(position)
            .ok_or(ActionError::NoCardAt(position))?
            .place_pollution(amount)?;
    }
    for (&position, hand) in &plan.inputs {
        grid.card_mut(position)
            .ok_or(ActionError::NoCardAt(position))?
            .get_hand(hand)?;
    }
    if let Some((position, hand)) = &plan.output {
        grid.card_mut(*position)
            .ok_or(ActionError::NoCardAt(*position))?
            .put_hand(hand)?;
    }
    Ok(())
}
