use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::session_errors::TimelineError;

pub const POINTS_PER_EVENT: u32 = 50;
pub const PERFECT_ORDER_BONUS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub label: String,
    /// Negative values are BCE.
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResult {
    pub correct_positions: usize,
    pub total: usize,
    pub is_sorted: bool,
    pub points: u32,
    /// Event ids in chronological order.
    pub solution: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TimelineRound {
    events: Vec<TimelineEvent>,
    solution: Vec<String>,
}

impl TimelineRound {
    pub fn new<R: Rng + ?Sized>(
        events: Vec<TimelineEvent>,
        rng: &mut R,
    ) -> Result<Self, TimelineError> {
        if events.len() < 2 {
            return Err(TimelineError::TooFewEvents);
        }
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.id.as_str()) {
                return Err(TimelineError::DuplicateEvent(event.id.clone()));
            }
        }

        let mut sorted = events.clone();
        sorted.sort_by_key(|event| event.year);
        let solution: Vec<String> = sorted.into_iter().map(|event| event.id).collect();

        let mut shuffled = events;
        shuffled.shuffle(rng);
        // Never hand the player an already solved board. Same-year events are
        // interchangeable, so solved means the years are already ascending.
        let all_same_year = shuffled.windows(2).all(|w| w[0].year == w[1].year);
        let already_sorted = shuffled.windows(2).all(|w| w[0].year <= w[1].year);
        if already_sorted && !all_same_year {
            // The earliest event moves behind a later one.
            shuffled.rotate_left(1);
        }

        Ok(TimelineRound {
            events: shuffled,
            solution,
        })
    }

    /// Events in the order presented to the player.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn submit(&self, order: &[String]) -> Result<TimelineResult, TimelineError> {
        if order.len() != self.events.len() {
            return Err(TimelineError::WrongLength {
                expected: self.events.len(),
                actual: order.len(),
            });
        }
        let mut seen = HashSet::new();
        for id in order {
            if !self.events.iter().any(|event| &event.id == id) {
                return Err(TimelineError::UnknownEvent(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(TimelineError::DuplicateEvent(id.clone()));
            }
        }

        let year_of = |id: &str| {
            self.events
                .iter()
                .find(|event| event.id == id)
                .map(|event| event.year)
                .unwrap_or_default()
        };
        // Events sharing a year are interchangeable.
        let correct_positions = order
            .iter()
            .zip(&self.solution)
            .filter(|(given, expected)| year_of(given.as_str()) == year_of(expected.as_str()))
            .count();
        let is_sorted = correct_positions == self.solution.len();
        let mut points = correct_positions as u32 * POINTS_PER_EVENT;
        if is_sorted {
            points += PERFECT_ORDER_BONUS;
        }

        Ok(TimelineResult {
            correct_positions,
            total: self.solution.len(),
            is_sorted,
            points,
            solution: self.solution.clone(),
        })
    }
}
