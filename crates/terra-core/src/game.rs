//! Turn controller.
//!
//! This module contains the `Game` struct, which sequences turns and phases
//! and routes card activations through the two action processors. Every
//! successful transition is pushed to the registered observers.

use crate::action::ActionError;
use crate::activation::AlreadySelected;
use crate::config::GameConfig;
use crate::grid::{CardGrid, GridSnapshot};
use crate::move_card::{MoveCard, MoveError};
use crate::observer::{GameObserver, TerraFuturaObserver};
use crate::pile::{CardSource, Deck, Pile};
use crate::player::{Player, PlayerId};
use crate::position::GridPosition;
use crate::process_action::ProcessAction;
use crate::process_action_assistance::ProcessActionAssistance;
use crate::resource::Resource;
use crate::scoring::Points;
use crate::select_reward::{RewardError, SelectReward};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, info};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start of turn, may still discard a face-up card
    TakeCardNoCardDiscarded,
    /// Start of turn, a card was discarded
    TakeCardCardDiscarded,
    /// Card placed, activating cards
    ActivateCard,
    /// Waiting for the assisting player to pick a reward
    SelectReward,
    /// Final round: choosing which activation pattern to use
    SelectActivationPattern,
    /// Choosing which scoring method to use
    SelectScoringMethod,
    /// Game is over
    Finish,
}

/// Errors that can occur when driving the game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{0} players is outside the allowed range")]
    WrongPlayerCount(usize),

    #[error("player range {min}..={max} is not playable")]
    InvalidPlayerRange { min: usize, max: usize },

    #[error("player {0} appears twice")]
    DuplicatePlayer(PlayerId),

    #[error("no pile for deck {0:?}")]
    MissingDeck(Deck),

    #[error("pile for deck {deck:?} shows {found} cards, expected {expected}")]
    PileSize { deck: Deck, expected: usize, found: usize },

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("no player {0}")]
    UnknownPlayer(PlayerId),

    #[error("the card at {0} cannot be activated now")]
    NotActivatable(GridPosition),

    #[error("no assisting card at {0}")]
    NoAssistingCard(GridPosition),

    #[error("a player cannot assist themselves")]
    SelfAssistance,

    #[error("assistance was already used this turn")]
    AssistanceUsed,

    #[error("choice {0} is not 0 or 1")]
    InvalidChoice(usize),

    #[error("Game is over")]
    GameOver,

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Reward(#[from] RewardError),

    #[error(transparent)]
    PatternSelected(#[from] AlreadySelected),
}

/// Snapshot sent to a player's observer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStateJson {
    pub phase: GamePhase,
    pub on_turn: PlayerId,
    pub turn: u32,
    pub player: PlayerId,
    pub grid: GridSnapshot,
}

/// Another player's card lending its effect to an activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistance {
    pub player: PlayerId,
    pub card: GridPosition,
}

/// The complete game
pub struct Game {
    config: GameConfig,
    phase: GamePhase,
    players: Vec<Player>,
    piles: BTreeMap<Deck, Pile>,
    on_turn: usize,
    turn_number: u32,
    assistance_used: bool,
    move_card: MoveCard,
    process_action: ProcessAction,
    process_action_assistance: ProcessActionAssistance,
    select_reward: SelectReward,
    observer: GameObserver,
}

impl Game {
    /// Create a new game. Player order is the order of `players`.
    pub fn new(
        players: Vec<Player>,
        piles: BTreeMap<Deck, Pile>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        if config.validate().is_err() {
            return Err(GameError::InvalidPlayerRange {
                min: config.min_players,
                max: config.max_players,
            });
        }
        if !config.allows_player_count(players.len()) {
            return Err(GameError::WrongPlayerCount(players.len()));
        }
        let mut seen = BTreeSet::new();
        for player in &players {
            if !seen.insert(player.id) {
                return Err(GameError::DuplicatePlayer(player.id));
            }
        }
        for deck in [Deck::I, Deck::II] {
            let pile = piles.get(&deck).ok_or(GameError::MissingDeck(deck))?;
            if pile.visible_size() != config.visible_cards {
                return Err(GameError::PileSize {
                    deck,
                    expected: config.visible_cards,
                    found: pile.visible_size(),
                });
            }
        }

        info!(players = players.len(), "new game");
        Ok(Self {
            config,
            phase: GamePhase::TakeCardNoCardDiscarded,
            players,
            piles,
            on_turn: 0,
            turn_number: 1,
            assistance_used: false,
            move_card: MoveCard::new(),
            process_action: ProcessAction::new(),
            process_action_assistance: ProcessActionAssistance::new(),
            select_reward: SelectReward::new(),
            observer: GameObserver::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// ID of the player whose turn it is
    pub fn current_player_id(&self) -> PlayerId {
        self.players[self.on_turn].id
    }

    pub fn is_player_on_turn(&self, player: PlayerId) -> bool {
        player == self.current_player_id()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn player_index(&self, id: PlayerId) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    pub fn pile(&self, deck: Deck) -> Option<&Pile> {
        self.piles.get(&deck)
    }

    pub fn pending_reward(&self) -> &SelectReward {
        &self.select_reward
    }

    pub fn register_observer(&mut self, player: PlayerId, observer: Box<dyn TerraFuturaObserver>) {
        self.observer.register_observer(player, observer);
    }

    pub fn unregister_observer(&mut self, player: PlayerId) {
        self.observer.unregister_observer(player);
    }

    /// Final score per player, once they have chosen a scoring method
    pub fn scores(&self) -> BTreeMap<PlayerId, Points> {
        self.players
            .iter()
            .filter_map(|p| {
                p.scoring_methods
                    .iter()
                    .find_map(|m| m.calculated_total())
                    .map(|points| (p.id, points))
            })
            .collect()
    }

    fn require_turn(&self, player: PlayerId, phases: &[GamePhase]) -> Result<(), GameError> {
        if self.phase == GamePhase::Finish {
            return Err(GameError::GameOver);
        }
        if !self.is_player_on_turn(player) {
            return Err(GameError::NotYourTurn);
        }
        if !phases.contains(&self.phase) {
            return Err(GameError::InvalidPhase);
        }
        Ok(())
    }

    /// Discard the oldest face-up card of `deck` before taking a card
    pub fn discard_last_card_from_deck(&mut self, player: PlayerId, deck: Deck) -> Result<(), GameError> {
        self.require_turn(player, &[GamePhase::TakeCardNoCardDiscarded])?;
        let pile = self.piles.get_mut(&deck).ok_or(GameError::MissingDeck(deck))?;
        pile.remove_last_card();
        self.set_phase(GamePhase::TakeCardCardDiscarded);
        Ok(())
    }

    /// Take a face-up card and place it on the player's grid
    pub fn take_card(
        &mut self,
        player: PlayerId,
        source: CardSource,
        destination: GridPosition,
    ) -> Result<(), GameError> {
        self.require_turn(
            player,
            &[GamePhase::TakeCardNoCardDiscarded, GamePhase::TakeCardCardDiscarded],
        )?;
        let index = self.player_index(player)?;
        let pile = self
            .piles
            .get_mut(&source.deck)
            .ok_or(GameError::MissingDeck(source.deck))?;
        self.move_card
            .move_card(pile, source.index, destination, &mut self.players[index].grid)?;
        self.set_phase(GamePhase::ActivateCard);
        Ok(())
    }

    /// Activate a card on the current player's grid, optionally with
    /// another player's card assisting.
    ///
    /// A successful assisted activation hands the assisting player a reward
    /// choice drawn from the paid inputs.
    pub fn activate_card(
        &mut self,
        player: PlayerId,
        card: GridPosition,
        inputs: &[(Resource, GridPosition)],
        outputs: &[(Resource, GridPosition)],
        pollution: &[GridPosition],
        assistance: Option<Assistance>,
    ) -> Result<(), GameError> {
        self.require_turn(player, &[GamePhase::ActivateCard])?;
        let acting = self.player_index(player)?;
        if !self.players[acting].grid.can_be_activated(card) {
            return Err(GameError::NotActivatable(card));
        }

        match assistance {
            None => {
                self.process_action.activate_card(
                    card,
                    &mut self.players[acting].grid,
                    inputs,
                    outputs,
                    pollution,
                )?;
                self.mark_activated(acting, card);
                self.notify_observers();
            }
            Some(Assistance {
                player: partner_id,
                card: partner_card,
            }) => {
                if partner_id == player {
                    return Err(GameError::SelfAssistance);
                }
                if self.assistance_used {
                    return Err(GameError::AssistanceUsed);
                }
                let partner = self.player_index(partner_id)?;
                let assisting_card = self.players[partner]
                    .grid
                    .card(partner_card)
                    .cloned()
                    .ok_or(GameError::NoAssistingCard(partner_card))?;

                let (acting_player, partner_player) = pair_mut(&mut self.players, acting, partner);
                self.process_action_assistance.activate_card(
                    card,
                    &mut acting_player.grid,
                    &*partner_player,
                    &assisting_card,
                    inputs,
                    outputs,
                    pollution,
                )?;
                self.mark_activated(acting, card);
                self.assistance_used = true;

                let paid: Vec<Resource> = inputs.iter().map(|&(resource, _)| resource).collect();
                self.select_reward.set_reward(partner_id, partner_card, &paid);
                self.set_phase(GamePhase::SelectReward);
            }
        }
        Ok(())
    }

    fn mark_activated(&mut self, player: usize, card: GridPosition) {
        if let Err(err) = self.players[player].grid.set_activated(card) {
            debug!(position = %card, error = %err, "activation already used");
        }
    }

    /// The assisting player picks their reward
    pub fn select_reward(&mut self, player: PlayerId, resource: Resource) -> Result<(), GameError> {
        if self.phase != GamePhase::SelectReward {
            return Err(GameError::InvalidPhase);
        }
        if self.select_reward.player() != Some(player) {
            return Err(GameError::NotYourTurn);
        }
        if !self.select_reward.can_select_reward(resource) {
            return Err(RewardError::NotOffered(resource).into());
        }
        let index = self.player_index(player)?;
        self.select_reward
            .select_reward(resource, &mut self.players[index].grid)?;
        self.set_phase(GamePhase::ActivateCard);
        Ok(())
    }

    /// End the current player's turn
    pub fn turn_finished(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.require_turn(player, &[GamePhase::ActivateCard])?;
        let index = self.player_index(player)?;
        self.players[index].grid.end_turn();
        self.assistance_used = false;

        let regular_turns = self.config.regular_turns;
        let next = if self.turn_number < regular_turns {
            self.advance_turn();
            GamePhase::TakeCardNoCardDiscarded
        } else if self.turn_number == regular_turns {
            self.advance_turn();
            if self.on_turn == 0 {
                GamePhase::SelectActivationPattern
            } else {
                GamePhase::TakeCardNoCardDiscarded
            }
        } else {
            self.advance_turn();
            if self.on_turn == 0 {
                GamePhase::SelectScoringMethod
            } else {
                GamePhase::SelectActivationPattern
            }
        };
        self.set_phase(next);
        Ok(())
    }

    /// Pick activation pattern 0 or 1 for the final round
    pub fn select_activation_pattern(&mut self, player: PlayerId, choice: usize) -> Result<(), GameError> {
        self.require_turn(player, &[GamePhase::SelectActivationPattern])?;
        if choice > 1 {
            return Err(GameError::InvalidChoice(choice));
        }
        let index = self.player_index(player)?;
        let Player {
            activation_patterns,
            grid,
            ..
        } = &mut self.players[index];
        activation_patterns[choice].select(grid)?;
        self.set_phase(GamePhase::ActivateCard);
        Ok(())
    }

    /// Pick scoring method 0 or 1 and score the player's grid
    pub fn select_scoring(&mut self, player: PlayerId, choice: usize) -> Result<Points, GameError> {
        self.require_turn(player, &[GamePhase::SelectScoringMethod])?;
        if choice > 1 {
            return Err(GameError::InvalidChoice(choice));
        }
        let index = self.player_index(player)?;
        let totals = self.players[index].resource_totals();
        let points = self.players[index].scoring_methods[choice].select_this_method_and_calculate(&totals);
        info!(player, %points, "scored");

        self.advance_turn();
        if self.on_turn == 0 {
            self.set_phase(GamePhase::Finish);
        } else {
            self.notify_observers();
        }
        Ok(points)
    }

    fn advance_turn(&mut self) {
        self.on_turn = (self.on_turn + 1) % self.players.len();
        if self.on_turn == 0 {
            self.turn_number += 1;
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            info!(from = ?self.phase, to = ?phase, turn = self.turn_number, "phase change");
        }
        self.phase = phase;
        self.notify_observers();
    }

    /// The snapshot a given player's observer receives
    pub fn player_state(&self, player: PlayerId) -> Option<PlayerStateJson> {
        let p = self.get_player(player)?;
        Some(PlayerStateJson {
            phase: self.phase,
            on_turn: self.current_player_id(),
            turn: self.turn_number,
            player,
            grid: p.grid.snapshot(),
        })
    }

    fn notify_observers(&self) {
        if self.observer.is_empty() {
            return;
        }
        let states: BTreeMap<PlayerId, String> = self
            .players
            .iter()
            .filter_map(|p| {
                let state = self.player_state(p.id)?;
                Some((p.id, serde_json::to_string(&state).unwrap_or_else(|_| "{}".to_string())))
            })
            .collect();
        self.observer.notify_all(&states);
    }
}

/// Mutable access to one player alongside shared access to another
fn pair_mut(players: &mut [Player], first: usize, second: usize) -> (&mut Player, &Player) {
    if first < second {
        let (left, right) = players.split_at_mut(second);
        (&mut left[first], &right[0])
    } else {
        let (left, right) = players.split_at_mut(first);
        (&mut right[0], &left[second])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationPattern;
    use crate::card::{Card, CardId};
    use crate::grid::Grid;
    use crate::scoring::ScoringMethod;

    fn player(id: PlayerId) -> Player {
        Player::new(
            id,
            Grid::with_starting_card(Card::new(CardId(100 + id as u32), 1)),
            [
                ActivationPattern::new(vec![GridPosition::origin()]),
                ActivationPattern::new(vec![]),
            ],
            [
                ScoringMethod::new(&[Resource::Green], Points(1)),
                ScoringMethod::new(&[Resource::Red], Points(1)),
            ],
        )
    }

    fn piles() -> BTreeMap<Deck, Pile> {
        let deck = |offset: u32| (0..8).map(|i| Card::new(CardId(offset + i), 2)).collect();
        BTreeMap::from([(Deck::I, Pile::new(deck(0), 4)), (Deck::II, Pile::new(deck(50), 4))])
    }

    #[test]
    fn test_new_game_validates_setup() {
        assert_eq!(
            Game::new(vec![player(0)], piles(), GameConfig::default()).err(),
            Some(GameError::WrongPlayerCount(1))
        );
        assert_eq!(
            Game::new(vec![player(0), player(0)], piles(), GameConfig::default()).err(),
            Some(GameError::DuplicatePlayer(0))
        );
        let mut one_deck = piles();
        one_deck.remove(&Deck::II);
        assert_eq!(
            Game::new(vec![player(0), player(1)], one_deck, GameConfig::default()).err(),
            Some(GameError::MissingDeck(Deck::II))
        );
        let open_range = GameConfig {
            min_players: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            Game::new(Vec::new(), piles(), open_range).err(),
            Some(GameError::InvalidPlayerRange { min: 0, max: 4 })
        );
        let mut narrow = piles();
        narrow.insert(Deck::I, Pile::new(Vec::new(), 3));
        assert_eq!(
            Game::new(vec![player(0), player(1)], narrow, GameConfig::default()).err(),
            Some(GameError::PileSize {
                deck: Deck::I,
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_new_game_starts_with_first_player() {
        let game = Game::new(vec![player(3), player(1)], piles(), GameConfig::default()).unwrap();
        assert_eq!(game.phase(), GamePhase::TakeCardNoCardDiscarded);
        assert_eq!(game.current_player_id(), 3);
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn test_take_card_moves_to_activation() {
        let mut game = Game::new(vec![player(0), player(1)], piles(), GameConfig::default()).unwrap();
        assert_eq!(
            game.take_card(1, CardSource::new(Deck::I, 0), GridPosition::new(1, 0)),
            Err(GameError::NotYourTurn)
        );

        game.discard_last_card_from_deck(0, Deck::I).unwrap();
        assert_eq!(game.phase(), GamePhase::TakeCardCardDiscarded);
        assert_eq!(
            game.discard_last_card_from_deck(0, Deck::I),
            Err(GameError::InvalidPhase)
        );

        game.take_card(0, CardSource::new(Deck::II, 0), GridPosition::new(1, 0))
            .unwrap();
        assert_eq!(game.phase(), GamePhase::ActivateCard);
        assert_eq!(game.get_player(0).unwrap().grid.len(), 2);
    }

    #[test]
    fn test_activation_requires_activatable_card() {
        let mut game = Game::new(vec![player(0), player(1)], piles(), GameConfig::default()).unwrap();
        game.take_card(0, CardSource::new(Deck::I, 0), GridPosition::new(0, 1))
            .unwrap();
        assert_eq!(
            game.activate_card(0, GridPosition::new(1, 1), &[], &[], &[], None),
            Err(GameError::NotActivatable(GridPosition::new(1, 1)))
        );
        assert_eq!(
            game.activate_card(0, GridPosition::new(0, 1), &[], &[], &[], None),
            Err(GameError::Action(ActionError::EffectRejected))
        );
    }

    #[test]
    fn test_turn_order_wraps_and_counts_turns() {
        let mut game = Game::new(vec![player(0), player(1)], piles(), GameConfig::default()).unwrap();
        for (expected_player, destination) in [(0, GridPosition::new(1, 0)), (1, GridPosition::new(0, 1))] {
            assert_eq!(game.current_player_id(), expected_player);
            game.take_card(expected_player, CardSource::new(Deck::I, 0), destination)
                .unwrap();
            game.turn_finished(expected_player).unwrap();
        }
        assert_eq!(game.current_player_id(), 0);
        assert_eq!(game.turn_number(), 2);
        assert_eq!(game.phase(), GamePhase::TakeCardNoCardDiscarded);
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut players = vec![player(0), player(1), player(2)];
        let (a, b) = pair_mut(&mut players, 2, 0);
        assert_eq!((a.id, b.id), (2, 0));
        let (a, b) = pair_mut(&mut players, 0, 1);
        assert_eq!((a.id, b.id), (0, 1));
    }
}
