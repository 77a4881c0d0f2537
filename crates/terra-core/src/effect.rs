//! Card effects.
//!
//! An effect is a pure predicate over a proposed trade: the resources paid,
//! the resources gained and the amount of pollution produced. Effects never
//! touch card state. Action processors evaluate them and perform every
//! mutation themselves once an effect has accepted the trade.

use crate::resource::{Resource, ResourceHand};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trade rule printed on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Pay exactly `from`, gain exactly `to`, produce exactly `pollution`.
    FixedTransformation {
        from: ResourceHand,
        to: ResourceHand,
        pollution: u32,
    },

    /// Pay any `from` resources of any kinds, gain exactly `to`, produce
    /// exactly `pollution`.
    ArbitraryBasic {
        from: usize,
        to: ResourceHand,
        pollution: u32,
    },

    /// Accepts a trade if any of the alternatives does.
    Or(Vec<Effect>),

    /// The card may borrow the effect of a card on another player's grid.
    /// Accepts no trade on its own.
    Assistance,
}

impl Effect {
    /// Shorthand for a fixed transformation from resource lists
    pub fn fixed(from: &[Resource], to: &[Resource], pollution: u32) -> Self {
        Effect::FixedTransformation {
            from: ResourceHand::from_resources(from),
            to: ResourceHand::from_resources(to),
            pollution,
        }
    }

    /// Shorthand for an arbitrary-basic effect
    pub fn arbitrary(from: usize, to: &[Resource], pollution: u32) -> Self {
        Effect::ArbitraryBasic {
            from,
            to: ResourceHand::from_resources(to),
            pollution,
        }
    }

    /// Whether this effect accepts the trade
    pub fn check(&self, input: &[Resource], output: &[Resource], pollution: u32) -> bool {
        match self {
            Effect::FixedTransformation {
                from,
                to,
                pollution: produced,
            } => {
                ResourceHand::from_resources(input) == *from
                    && ResourceHand::from_resources(output) == *to
                    && pollution == *produced
            }
            Effect::ArbitraryBasic {
                from,
                to,
                pollution: produced,
            } => {
                input.len() == *from
                    && ResourceHand::from_resources(output) == *to
                    && pollution == *produced
            }
            Effect::Or(alternatives) => alternatives
                .iter()
                .any(|effect| effect.check(input, output, pollution)),
            Effect::Assistance => false,
        }
    }

    /// Whether this effect lets its card receive assistance
    pub fn has_assistance(&self) -> bool {
        match self {
            Effect::Or(alternatives) => alternatives.iter().any(Effect::has_assistance),
            Effect::Assistance => true,
            Effect::FixedTransformation { .. } | Effect::ArbitraryBasic { .. } => false,
        }
    }

    /// Human-readable description
    pub fn state(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::FixedTransformation {
                from,
                to,
                pollution,
            } => {
                write!(f, "Pay {} -> Gain {}", from, to)?;
                if *pollution > 0 {
                    write!(f, " (+{} pollution)", pollution)?;
                }
                Ok(())
            }
            Effect::ArbitraryBasic {
                from,
                to,
                pollution,
            } => write!(f, "Pay any {} -> Gain {} (+{} pollution)", from, to, pollution),
            Effect::Or(alternatives) if alternatives.is_empty() => f.write_str("(empty OR)"),
            Effect::Or(alternatives) => {
                let inner: Vec<String> = alternatives.iter().map(Effect::state).collect();
                write!(f, "({})", inner.join(" OR "))
            }
            Effect::Assistance => f.write_str("Assistance"),
        }
    }
}
