use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::word_search_errors::WordSearchError;

pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 200;
pub const DEFAULT_GENERATION_ATTEMPTS: usize = 25;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
    DownRight,
    DownLeft,
    UpRight,
    UpLeft,
}

impl Direction {
    /// Forward-reading directions only, used for younger players.
    pub const EASY: [Direction; 2] = [Direction::Right, Direction::Down];

    pub const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpRight,
        Direction::UpLeft,
    ];

    /// Column and row step for one letter in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (-1, 1),
            Direction::UpRight => (1, -1),
            Direction::UpLeft => (-1, -1),
        }
    }

    pub fn from_delta(dx: isize, dy: isize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.delta() == (dx.signum(), dy.signum()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    fn step(self, direction: Direction, distance: usize, size: usize) -> Option<Cell> {
        let (dx, dy) = direction.delta();
        let col = self.col as isize + dx * distance as isize;
        let row = self.row as isize + dy * distance as isize;
        let in_bounds = |v: isize| v >= 0 && (v as usize) < size;
        if in_bounds(col) && in_bounds(row) {
            Some(Cell::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub start: Cell,
    pub direction: Direction,
}

impl Placement {
    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn cells(&self) -> Vec<Cell> {
        let (dx, dy) = self.direction.delta();
        (0..self.word.len())
            .map(|i| {
                Cell::new(
                    (self.start.row as isize + dy * i as isize) as usize,
                    (self.start.col as isize + dx * i as isize) as usize,
                )
            })
            .collect()
    }

    pub fn end(&self) -> Cell {
        let (dx, dy) = self.direction.delta();
        let last = self.word.len().saturating_sub(1) as isize;
        Cell::new(
            (self.start.row as isize + dy * last) as usize,
            (self.start.col as isize + dx * last) as usize,
        )
    }
}

#[derive(Debug, Clone)]
pub struct WordSearchConfig {
    pub size: usize,
    pub words: Vec<String>,
    pub directions: Vec<Direction>,
    pub max_placement_attempts: usize,
    pub max_generation_attempts: usize,
}

impl WordSearchConfig {
    pub fn new(size: usize, words: Vec<String>) -> Self {
        WordSearchConfig {
            size,
            words,
            directions: Direction::ALL.to_vec(),
            max_placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            max_generation_attempts: DEFAULT_GENERATION_ATTEMPTS,
        }
    }

    pub fn with_directions(mut self, directions: &[Direction]) -> Self {
        self.directions = directions.to_vec();
        self
    }

    pub fn with_attempts(mut self, placement: usize, generation: usize) -> Self {
        self.max_placement_attempts = placement;
        self.max_generation_attempts = generation;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSearchPuzzle {
    size: usize,
    grid: Vec<Vec<char>>,
    placements: Vec<Placement>,
}

impl WordSearchPuzzle {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn letter(&self, cell: Cell) -> Option<char> {
        self.grid.get(cell.row).and_then(|row| row.get(cell.col)).copied()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn rows(&self) -> Vec<String> {
        self.grid.iter().map(|row| row.iter().collect()).collect()
    }

    /// Resolves a drag selection to the placed word it covers, if any.
    /// The selection may start at either end of the word.
    pub fn check_selection(&self, start: Cell, end: Cell) -> Option<&Placement> {
        let dx = end.col as isize - start.col as isize;
        let dy = end.row as isize - start.row as isize;
        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return None;
        }
        self.placements.iter().find(|placement| {
            let (p_start, p_end) = (placement.start, placement.end());
            (p_start == start && p_end == end) || (p_start == end && p_end == start)
        })
    }

    /// Number of distinct cell runs spelling `word` along `directions`.
    /// A palindrome read both ways over the same cells counts once.
    pub fn occurrences(&self, word: &str, directions: &[Direction]) -> usize {
        let letters: Vec<char> = word.chars().collect();
        let mut runs: HashSet<Vec<Cell>> = HashSet::new();
        for row in 0..self.size {
            for col in 0..self.size {
                for &direction in directions {
                    if let Some(mut cells) = self.read_run(Cell::new(row, col), direction, &letters)
                    {
                        cells.sort();
                        runs.insert(cells);
                    }
                }
            }
        }
        runs.len()
    }

    fn read_run(&self, start: Cell, direction: Direction, letters: &[char]) -> Option<Vec<Cell>> {
        let mut cells = Vec::with_capacity(letters.len());
        for (i, &expected) in letters.iter().enumerate() {
            let cell = start.step(direction, i, self.size)?;
            if self.letter(cell)? != expected {
                return None;
            }
            cells.push(cell);
        }
        Some(cells)
    }
}

/// Builds a puzzle containing every configured word exactly once.
///
/// Each word gets at most `max_placement_attempts` random positions and the
/// whole grid is rebuilt at most `max_generation_attempts` times, so
/// infeasible inputs fail with an error instead of looping.
pub fn generate<R: Rng + ?Sized>(
    config: &WordSearchConfig,
    rng: &mut R,
) -> Result<WordSearchPuzzle, WordSearchError> {
    let words = normalise_words(config)?;

    let mut last_error = WordSearchError::PlacementFailed {
        word: words[0].clone(),
    };
    for attempt in 1..=config.max_generation_attempts.max(1) {
        match try_generate(config, &words, rng) {
            Ok(puzzle) => {
                debug!(attempt, size = config.size, "Generated word search grid");
                return Ok(puzzle);
            }
            Err(e) => {
                debug!(attempt, "Word search attempt failed: {}", e);
                last_error = e;
            }
        }
    }
    Err(last_error)
}

fn normalise_words(config: &WordSearchConfig) -> Result<Vec<String>, WordSearchError> {
    if config.size == 0 {
        return Err(WordSearchError::EmptyGrid);
    }
    if config.directions.is_empty() {
        return Err(WordSearchError::NoDirections);
    }
    if config.words.is_empty() {
        return Err(WordSearchError::NoWords);
    }

    let mut words: Vec<String> = Vec::with_capacity(config.words.len());
    for raw in &config.words {
        let word = raw.trim().to_ascii_uppercase();
        if word.is_empty() {
            return Err(WordSearchError::EmptyWord);
        }
        if !word.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(WordSearchError::InvalidCharacter { word });
        }
        if word.len() > config.size {
            return Err(WordSearchError::WordTooLong {
                word,
                size: config.size,
            });
        }
        if words.contains(&word) {
            return Err(WordSearchError::DuplicateWord { word });
        }
        words.push(word);
    }

    for word in &words {
        let reversed: String = word.chars().rev().collect();
        if let Some(container) = words
            .iter()
            .find(|other| *other != word && (other.contains(word.as_str()) || other.contains(&reversed)))
        {
            return Err(WordSearchError::NestedWord {
                word: word.clone(),
                container: container.clone(),
            });
        }
    }

    // Longest first leaves the most room for the hardest placements.
    words.sort_by(|a, b| b.len().cmp(&a.len()));
    Ok(words)
}

fn try_generate<R: Rng + ?Sized>(
    config: &WordSearchConfig,
    words: &[String],
    rng: &mut R,
) -> Result<WordSearchPuzzle, WordSearchError> {
    let size = config.size;
    let mut slots: Vec<Vec<Option<char>>> = vec![vec![None; size]; size];
    let mut placements = Vec::with_capacity(words.len());

    for word in words {
        let placement = place_word(&mut slots, word, config, rng)
            .ok_or_else(|| WordSearchError::PlacementFailed { word: word.clone() })?;
        placements.push(placement);
    }

    let mut grid = Vec::with_capacity(size);
    for row in slots {
        let mut letters = Vec::with_capacity(size);
        for slot in row {
            letters.push(match slot {
                Some(letter) => letter,
                None => random_letter(rng),
            });
        }
        grid.push(letters);
    }

    let puzzle = WordSearchPuzzle {
        size,
        grid,
        placements,
    };
    for placement in &puzzle.placements {
        if puzzle.occurrences(&placement.word, &config.directions) != 1 {
            return Err(WordSearchError::AmbiguousGrid {
                word: placement.word.clone(),
            });
        }
    }
    Ok(puzzle)
}

fn place_word<R: Rng + ?Sized>(
    slots: &mut [Vec<Option<char>>],
    word: &str,
    config: &WordSearchConfig,
    rng: &mut R,
) -> Option<Placement> {
    let size = config.size;
    let letters: Vec<char> = word.chars().collect();

    for _ in 0..config.max_placement_attempts {
        let direction = *config.directions.choose(rng)?;
        let start = Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));

        let mut cells = Vec::with_capacity(letters.len());
        let mut fits = true;
        for (i, &letter) in letters.iter().enumerate() {
            match start.step(direction, i, size) {
                Some(cell) if slots[cell.row][cell.col].map_or(true, |c| c == letter) => {
                    cells.push(cell)
                }
                _ => {
                    fits = false;
                    break;
                }
            }
        }
        if !fits {
            continue;
        }

        for (cell, &letter) in cells.iter().zip(&letters) {
            slots[cell.row][cell.col] = Some(letter);
        }
        return Some(Placement {
            word: word.to_string(),
            start,
            direction,
        });
    }
    None
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
}
