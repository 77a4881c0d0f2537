//! Rewards for assisting players.
//!
//! After an assisted activation the assisting player takes one of the
//! resources the acting player paid and puts it on the card that assisted.

use crate::grid::{CardGrid, Grid};
use crate::player::PlayerId;
use crate::position::GridPosition;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    #[error("no reward is waiting to be selected")]
    NothingPending,

    #[error("{0} is not among the offered rewards")]
    NotOffered(Resource),
}

/// A pending reward choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectReward {
    player: Option<PlayerId>,
    card: Option<GridPosition>,
    reward: Vec<Resource>,
}

impl SelectReward {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `reward` to `player` for the card at `card` on their grid
    pub fn set_reward(&mut self, player: PlayerId, card: GridPosition, reward: &[Resource]) {
        self.player = Some(player);
        self.card = Some(card);
        self.reward = reward.to_vec();
    }

    /// The player who may choose, if a reward is pending
    pub fn player(&self) -> Option<PlayerId> {
        self.player
    }

    pub fn reward(&self) -> &[Resource] {
        &self.reward
    }

    pub fn can_select_reward(&self, resource: Resource) -> bool {
        self.player.is_some() && self.reward.contains(&resource)
    }

    /// Put `resource` on the assisting card in `grid` and clear the offer.
    ///
    /// If the assisting card has gone inactive meanwhile, the reward is
    /// forfeited.
    pub fn select_reward(&mut self, resource: Resource, grid: &mut Grid) -> Result<(), RewardError> {
        let card = self.card.ok_or(RewardError::NothingPending)?;
        if self.player.is_none() {
            return Err(RewardError::NothingPending);
        }
        if !self.reward.contains(&resource) {
            return Err(RewardError::NotOffered(resource));
        }

        match grid.card_mut(card) {
            Some(target) if target.can_put_resources(&[resource]) => {
                if let Err(err) = target.put_resources(&[resource]) {
                    debug!(position = %card, error = %err, "reward forfeited");
                }
            }
            _ => debug!(position = %card, %resource, "assisting card cannot take reward"),
        }
        *self = Self::default();
        Ok(())
    }

    pub fn state(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
