use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::session_errors::MemoryMatchError;

pub const POINTS_PER_PAIR: u32 = 100;
pub const EXTRA_MOVE_PENALTY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPair {
    pub id: String,
    pub label: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    FaceUp,
    Matched,
}

#[derive(Debug, Clone)]
pub struct Card {
    pub pair_id: String,
    pub state: CardState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipOutcome {
    First,
    Match(String),
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct MemoryBoard {
    cards: Vec<Card>,
    pending: Option<usize>,
    mismatch: Option<(usize, usize)>,
    moves: u32,
    matches: u32,
}

impl MemoryBoard {
    pub fn new<R: Rng + ?Sized>(pairs: &[MemoryPair], rng: &mut R) -> Result<Self, MemoryMatchError> {
        if pairs.len() < 2 {
            return Err(MemoryMatchError::TooFewPairs);
        }
        let mut cards: Vec<Card> = pairs
            .iter()
            .flat_map(|pair| {
                [
                    Card {
                        pair_id: pair.id.clone(),
                        state: CardState::Hidden,
                    },
                    Card {
                        pair_id: pair.id.clone(),
                        state: CardState::Hidden,
                    },
                ]
            })
            .collect();
        cards.shuffle(rng);
        Ok(MemoryBoard {
            cards,
            pending: None,
            mismatch: None,
            moves: 0,
            matches: 0,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome, MemoryMatchError> {
        if self.mismatch.is_some() {
            return Err(MemoryMatchError::MismatchPending);
        }
        let card = self
            .cards
            .get(index)
            .ok_or(MemoryMatchError::OutOfRange(index))?;
        match card.state {
            CardState::Matched => return Err(MemoryMatchError::AlreadyMatched(index)),
            CardState::FaceUp => return Err(MemoryMatchError::AlreadyFaceUp(index)),
            CardState::Hidden => {}
        }
        self.cards[index].state = CardState::FaceUp;

        let Some(first) = self.pending.take() else {
            self.pending = Some(index);
            return Ok(FlipOutcome::First);
        };

        self.moves += 1;
        if self.cards[first].pair_id == self.cards[index].pair_id {
            self.cards[first].state = CardState::Matched;
            self.cards[index].state = CardState::Matched;
            self.matches += 1;
            Ok(FlipOutcome::Match(self.cards[index].pair_id.clone()))
        } else {
            self.mismatch = Some((first, index));
            Ok(FlipOutcome::Mismatch)
        }
    }

    /// Turns a mismatched pair face down again.
    pub fn hide_mismatch(&mut self) {
        if let Some((a, b)) = self.mismatch.take() {
            self.cards[a].state = CardState::Hidden;
            self.cards[b].state = CardState::Hidden;
        }
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|card| card.state == CardState::Matched)
    }

    pub fn score(&self) -> u32 {
        let pairs = (self.cards.len() / 2) as u32;
        let extra_moves = self.moves.saturating_sub(pairs);
        (self.matches * POINTS_PER_PAIR).saturating_sub(extra_moves * EXTRA_MOVE_PENALTY)
    }
}
