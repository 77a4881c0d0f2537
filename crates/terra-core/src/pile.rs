//! Draw piles.
//!
//! There is one pile per deck. Each shows a row of face-up cards; the rest
//! wait face-down in a shuffled stack. Index 0 is the newest face-up card.
//! Taking or discarding a card refills the row from the stack.

use crate::card::Card;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which deck a card comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Deck {
    I,
    II,
}

/// A face-up card in one of the piles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSource {
    pub deck: Deck,
    pub index: usize,
}

impl CardSource {
    pub fn new(deck: Deck, index: usize) -> Self {
        Self { deck, index }
    }
}

/// Face-up row plus face-down stack for one deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    visible: Vec<Card>,
    hidden: Vec<Card>,
    visible_size: usize,
}

impl Pile {
    /// Build a pile drawing from `cards` in order (last card drawn first)
    pub fn new(cards: Vec<Card>, visible_size: usize) -> Self {
        let mut pile = Self {
            visible: Vec::with_capacity(visible_size),
            hidden: cards,
            visible_size,
        };
        pile.refill();
        pile
    }

    /// Build a pile from `cards` in random order
    pub fn shuffled<R: Rng>(mut cards: Vec<Card>, visible_size: usize, rng: &mut R) -> Self {
        cards.shuffle(rng);
        Self::new(cards, visible_size)
    }

    fn refill(&mut self) {
        while self.visible.len() < self.visible_size {
            match self.hidden.pop() {
                Some(card) => self.visible.insert(0, card),
                None => break,
            }
        }
    }

    /// The face-up card at `index`
    pub fn get_card(&self, index: usize) -> Option<&Card> {
        self.visible.get(index)
    }

    /// Take the face-up card at `index`
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        if index >= self.visible.len() {
            return None;
        }
        let card = self.visible.remove(index);
        self.refill();
        Some(card)
    }

    /// Discard the oldest face-up card. Returns false if the row is empty.
    pub fn remove_last_card(&mut self) -> bool {
        if self.visible.pop().is_none() {
            return false;
        }
        self.refill();
        true
    }

    pub fn visible(&self) -> &[Card] {
        &self.visible
    }

    /// How many cards the face-up row holds when full
    pub fn visible_size(&self) -> usize {
        self.visible_size
    }

    /// Cards left in the face-down stack
    pub fn remaining(&self) -> usize {
        self.hidden.len()
    }

    /// JSON view of the face-up row
    pub fn state(&self) -> String {
        serde_json::to_string(&self.visible).unwrap_or_else(|_| "[]".to_string())
    }
}
