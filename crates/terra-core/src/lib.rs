//! Terra Futura - a resource-economy card game engine
//!
//! This crate provides the core game logic for Terra Futura, including:
//! - Cards holding resources and pollution, going inactive once polluted
//! - Card effects as composable trade rules
//! - Action resolution for single-player and assisted card activations
//! - Grids, piles, scoring and the turn controller that drives them
//!
//! # Architecture
//!
//! Action resolution is validate-then-commit: an activation is checked in
//! full against the current grid before any card is touched, so a rejected
//! action leaves every card unchanged.
//!
//! # Modules
//!
//! - [`resource`]: Resource kinds and counted resource hands
//! - [`effect`]: Trade rules printed on cards
//! - [`card`]: Card state, pollution and resource primitives
//! - [`grid`]: Card lookup, placement and activation bookkeeping
//! - [`process_action`] / [`process_action_assistance`]: Action resolution
//! - [`game`]: Turn and phase state machine

mod action;
pub mod activation;
pub mod card;
pub mod config;
pub mod effect;
pub mod game;
pub mod grid;
pub mod move_card;
pub mod observer;
pub mod pile;
pub mod player;
pub mod position;
pub mod process_action;
pub mod process_action_assistance;
pub mod resource;
pub mod scoring;
pub mod select_reward;

// Re-export commonly used types
pub use action::ActionError;
pub use activation::{ActivationPattern, AlreadySelected};
pub use card::{Card, CardError, CardId};
pub use config::{ConfigError, GameConfig};
pub use effect::Effect;
pub use game::{Assistance, Game, GameError, GamePhase, PlayerStateJson};
pub use grid::{CardGrid, Grid, GridError, GridSnapshot, PlacedCard};
pub use move_card::{MoveCard, MoveError};
pub use observer::{GameObserver, TerraFuturaObserver};
pub use pile::{CardSource, Deck, Pile};
pub use player::{AssistingPlayer, Player, PlayerId};
pub use position::GridPosition;
pub use process_action::ProcessAction;
pub use process_action_assistance::ProcessActionAssistance;
pub use resource::{InsufficientResources, Resource, ResourceHand};
pub use scoring::{Points, ScoringMethod};
pub use select_reward::{RewardError, SelectReward};
