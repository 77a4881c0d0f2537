//! Cards and their pollution state.
//!
//! A card holds resources and a pollution counter. It stays active while the
//! counter is below its pollution capacity; once full, it takes no further
//! resources or pollution and none of its resources can be spent.
//!
//! The `can_*` queries are the game-rule checks used during validation. The
//! matching mutators re-check them and return a [`CardError`] when called
//! without the precondition holding, which is a caller bug rather than a
//! rejected move.

use crate::effect::Effect;
use crate::resource::{InsufficientResources, Resource, ResourceHand};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable card identifier, unique within a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Precondition violations on card mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card {0} is inactive")]
    Inactive(CardId),

    #[error("card {card} cannot take {requested} pollution ({headroom} space left)")]
    PollutionOverflow {
        card: CardId,
        requested: u32,
        headroom: u32,
    },

    #[error("card {card} is {source}")]
    MissingResources {
        card: CardId,
        #[source]
        source: InsufficientResources,
    },
}

/// A card on a player's grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    resources: ResourceHand,
    pollution_capacity: u32,
    pollution_count: u32,
    upper_effect: Option<Effect>,
    lower_effect: Option<Effect>,
}

impl Card {
    /// Create an empty, unpolluted card with no effects
    pub fn new(id: CardId, pollution_capacity: u32) -> Self {
        Self {
            id,
            resources: ResourceHand::new(),
            pollution_capacity,
            pollution_count: 0,
            upper_effect: None,
            lower_effect: None,
        }
    }

    /// Set the upper effect
    pub fn with_upper_effect(mut self, effect: Effect) -> Self {
        self.upper_effect = Some(effect);
        self
    }

    /// Set the lower effect
    pub fn with_lower_effect(mut self, effect: Effect) -> Self {
        self.lower_effect = Some(effect);
        self
    }

    /// Start with resources already on the card
    pub fn with_resources(mut self, resources: &[Resource]) -> Self {
        self.resources = ResourceHand::from_resources(resources);
        self
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn resources(&self) -> &ResourceHand {
        &self.resources
    }

    pub fn pollution_count(&self) -> u32 {
        self.pollution_count
    }

    pub fn pollution_capacity(&self) -> u32 {
        self.pollution_capacity
    }

    pub fn upper_effect(&self) -> Option<&Effect> {
        self.upper_effect.as_ref()
    }

    pub fn lower_effect(&self) -> Option<&Effect> {
        self.lower_effect.as_ref()
    }

    /// A card is active while it has pollution space left
    pub fn is_active(&self) -> bool {
        self.pollution_count < self.pollution_capacity
    }

    /// Pollution space left before the card goes inactive
    pub fn pollution_headroom(&self) -> u32 {
        self.pollution_capacity.saturating_sub(self.pollution_count)
    }

    /// Whether `amount` pollution fits on the card as a single placement
    pub fn can_place_pollution(&self, amount: u32) -> bool {
        self.is_active() && amount <= self.pollution_headroom()
    }

    /// Place `amount` pollution, all or nothing
    pub fn place_pollution(&mut self, amount: u32) -> Result<(), CardError> {
        if !self.is_active() {
            return Err(CardError::Inactive(self.id));
        }
        if amount > self.pollution_headroom() {
            return Err(CardError::PollutionOverflow {
                card: self.id,
                requested: amount,
                headroom: self.pollution_headroom(),
            });
        }
        self.pollution_count += amount;
        Ok(())
    }

    /// Whether every requested unit can be taken from the card
    pub fn can_get_resources(&self, resources: &[Resource]) -> bool {
        self.can_get_hand(&ResourceHand::from_resources(resources))
    }

    /// Take exactly `resources` from the card
    pub fn get_resources(&mut self, resources: &[Resource]) -> Result<(), CardError> {
        self.get_hand(&ResourceHand::from_resources(resources))
    }

    pub(crate) fn can_get_hand(&self, hand: &ResourceHand) -> bool {
        self.is_active() && self.resources.contains(hand)
    }

    pub(crate) fn get_hand(&mut self, hand: &ResourceHand) -> Result<(), CardError> {
        if !self.is_active() {
            return Err(CardError::Inactive(self.id));
        }
        self.resources
            .subtract(hand)
            .map_err(|source| CardError::MissingResources {
                card: self.id,
                source,
            })
    }

    /// Whether the card accepts new resources. There is no storage limit.
    pub fn can_put_resources(&self, _resources: &[Resource]) -> bool {
        self.is_active()
    }

    /// Put resources on the card
    pub fn put_resources(&mut self, resources: &[Resource]) -> Result<(), CardError> {
        self.put_hand(&ResourceHand::from_resources(resources))
    }

    pub(crate) fn put_hand(&mut self, hand: &ResourceHand) -> Result<(), CardError> {
        if !self.is_active() {
            return Err(CardError::Inactive(self.id));
        }
        self.resources.add_hand(hand);
        Ok(())
    }

    /// Whether the upper effect accepts the trade.
    ///
    /// Only the card's activity and the effect are consulted. Whether the
    /// inputs can actually be paid is for the action processor to verify.
    pub fn check(&self, input: &[Resource], output: &[Resource], pollution: u32) -> bool {
        self.is_active()
            && self
                .upper_effect
                .as_ref()
                .is_some_and(|effect| effect.check(input, output, pollution))
    }

    /// Same as [`Card::check`] against the lower effect
    pub fn check_lower(&self, input: &[Resource], output: &[Resource], pollution: u32) -> bool {
        self.is_active()
            && self
                .lower_effect
                .as_ref()
                .is_some_and(|effect| effect.check(input, output, pollution))
    }

    /// Whether either effect accepts assistance
    pub fn has_assistance(&self) -> bool {
        self.upper_effect.iter().chain(self.lower_effect.iter()).any(Effect::has_assistance)
    }

    /// Human-readable summary of the card
    pub fn state(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let describe = |effect: &Option<Effect>| match effect {
            Some(effect) => effect.state(),
            None => "No effect".to_string(),
        };
        write!(
            f,
            "Card {} [{}] resources={} {} pollution={}/{} upper: {} lower: {}",
            self.id,
            if self.is_active() { "active" } else { "inactive" },
            self.resources.total(),
            self.resources,
            self.pollution_count,
            self.pollution_capacity,
            describe(&self.upper_effect),
            describe(&self.lower_effect),
        )
    }
}
