use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_POINTS_PER_FIND: u32 = 100;

/// A hotspot on the altered image, in percentage-of-image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Difference {
    pub fn new(id: &str, x: f64, y: f64, radius: f64) -> Self {
        Difference {
            id: id.to_string(),
            x,
            y,
            radius,
            description: None,
        }
    }

    fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_to(x, y) <= self.radius
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Found(String),
    AlreadyFound(String),
    Miss,
}

#[derive(Debug, Clone)]
pub struct SpotTheDifference {
    differences: Vec<Difference>,
    found: HashSet<String>,
    points_per_find: u32,
    misses: u32,
}

impl SpotTheDifference {
    pub fn new(differences: Vec<Difference>, points_per_find: u32) -> Self {
        SpotTheDifference {
            differences,
            found: HashSet::new(),
            points_per_find,
            misses: 0,
        }
    }

    /// Registers a click at `(x, y)` in percentage space.
    ///
    /// When the click falls inside several circles the nearest unfound centre
    /// wins. Hitting only already-found differences never scores again.
    pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
        let mut hits: Vec<&Difference> = self
            .differences
            .iter()
            .filter(|difference| difference.contains(x, y))
            .collect();
        if hits.is_empty() {
            self.misses += 1;
            return ClickOutcome::Miss;
        }
        hits.sort_by(|a, b| a.distance_to(x, y).total_cmp(&b.distance_to(x, y)));

        if let Some(unfound) = hits.iter().find(|d| !self.found.contains(&d.id)) {
            let id = unfound.id.clone();
            self.found.insert(id.clone());
            return ClickOutcome::Found(id);
        }
        ClickOutcome::AlreadyFound(hits[0].id.clone())
    }

    pub fn is_found(&self, id: &str) -> bool {
        self.found.contains(id)
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn remaining(&self) -> usize {
        self.differences.len() - self.found.len()
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    pub fn score(&self) -> u32 {
        self.found.len() as u32 * self.points_per_find
    }

    /// Share of found differences among all registered clicks.
    pub fn accuracy(&self) -> f64 {
        let attempts = self.found.len() as f64 + f64::from(self.misses);
        if attempts == 0.0 {
            0.0
        } else {
            self.found.len() as f64 / attempts
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn game() -> SpotTheDifference {
        SpotTheDifference::new(
            vec![
                Difference::new("spiral", 20.0, 30.0, 5.0),
                Difference::new("ibex-horn", 60.0, 40.0, 4.0),
                Difference::new("sun-disc", 63.0, 43.0, 4.0),
            ],
            DEFAULT_POINTS_PER_FIND,
        )
    }

    #[rstest]
    #[case(20.0, 30.0, true)]
    #[case(24.9, 30.0, true)]
    #[case(23.0, 34.0, true)]
    #[case(25.1, 30.0, false)]
    #[case(24.0, 34.0, false)]
    fn test_contains_uses_radius(#[case] x: f64, #[case] y: f64, #[case] expected: bool) {
        let spiral = Difference::new("spiral", 20.0, 30.0, 5.0);
        assert_eq!(spiral.contains(x, y), expected);
    }

    #[test]
    fn test_click_registers_found_exactly_once() {
        let mut game = game();

        assert_eq!(game.click(21.0, 31.0), ClickOutcome::Found("spiral".to_string()));
        assert_eq!(game.score(), 100);

        assert_eq!(
            game.click(20.0, 30.0),
            ClickOutcome::AlreadyFound("spiral".to_string())
        );
        assert_eq!(game.score(), 100);
        assert_eq!(game.found_count(), 1);
        assert_eq!(game.remaining(), 2);
    }

    #[test]
    fn test_click_miss_is_counted() {
        let mut game = game();

        assert_eq!(game.click(90.0, 90.0), ClickOutcome::Miss);
        assert_eq!(game.misses(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_overlapping_hotspots_resolve_to_nearest_unfound() {
        let mut game = game();

        // Inside both circles, closer to the ibex horn.
        assert_eq!(game.click(61.0, 41.0), ClickOutcome::Found("ibex-horn".to_string()));
        // Same spot again now falls through to the other circle.
        assert_eq!(game.click(61.0, 41.0), ClickOutcome::Found("sun-disc".to_string()));
        assert_eq!(
            game.click(61.0, 41.0),
            ClickOutcome::AlreadyFound("ibex-horn".to_string())
        );
        assert_eq!(game.score(), 200);
    }

    #[test]
    fn test_completion_and_accuracy() {
        let mut game = game();
        game.click(20.0, 30.0);
        game.click(0.0, 0.0);
        game.click(60.0, 40.0);
        game.click(63.0, 43.0);

        assert!(game.is_complete());
        assert!(game.is_found("sun-disc"));
        assert!((game.accuracy() - 0.75).abs() < f64::EPSILON);
    }
}
