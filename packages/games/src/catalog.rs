//! The game catalog.
//!
//! Every game is described by data: a [`GameEntry`] with common metadata and a
//! tagged [`GameDefinition`] holding the mechanic-specific content. The catalog
//! is validated once when it is loaded, so the API and the game engines can
//! rely on well-formed definitions.

use std::collections::HashSet;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::canvas::Brush;
use crate::errors::catalog_errors::CatalogError;
use crate::hotspot_viewer::Hotspot;
use crate::memory_match::MemoryPair;
use crate::quiz::{Question, QuizScoring};
use crate::spot_difference::Difference;
use crate::timeline::TimelineEvent;
use crate::word_search::{self, Direction, WordSearchConfig};

const BUILTIN_CATALOG: &str = include_str!("data/catalog.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameCategory {
    Memory,
    Knowledge,
    Puzzle,
    Creative,
    Exploration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameDefinition {
    MemoryMatch {
        pairs: Vec<MemoryPair>,
    },
    Quiz {
        questions: Vec<Question>,
        #[serde(default)]
        scoring: QuizScoring,
    },
    #[serde(rename_all = "camelCase")]
    WordSearch {
        grid_size: usize,
        words: Vec<String>,
        directions: Vec<Direction>,
    },
    #[serde(rename_all = "camelCase")]
    SpotTheDifference {
        original_image: String,
        altered_image: String,
        differences: Vec<Difference>,
    },
    Timeline {
        events: Vec<TimelineEvent>,
    },
    #[serde(rename_all = "camelCase")]
    DrawingCanvas {
        brushes: Vec<Brush>,
        #[serde(default)]
        template_image: Option<String>,
    },
    HotspotViewer {
        image: String,
        width: f64,
        height: f64,
        hotspots: Vec<Hotspot>,
    },
}

impl GameDefinition {
    pub fn kind(&self) -> &'static str {
        match self {
            GameDefinition::MemoryMatch { .. } => "memory-match",
            GameDefinition::Quiz { .. } => "quiz",
            GameDefinition::WordSearch { .. } => "word-search",
            GameDefinition::SpotTheDifference { .. } => "spot-the-difference",
            GameDefinition::Timeline { .. } => "timeline",
            GameDefinition::DrawingCanvas { .. } => "drawing-canvas",
            GameDefinition::HotspotViewer { .. } => "hotspot-viewer",
        }
    }

    fn validate(&self, id: &str) -> Result<(), CatalogError> {
        match self {
            GameDefinition::MemoryMatch { pairs } => {
                if pairs.len() < 2 {
                    return Err(CatalogError::invalid(id, "memory match needs at least two pairs"));
                }
                ensure_unique(id, pairs.iter().map(|p| p.id.as_str()))
            }
            GameDefinition::Quiz { questions, scoring } => {
                if questions.is_empty() {
                    return Err(CatalogError::invalid(id, "quiz has no questions"));
                }
                if scoring.time_bonus_divisor == 0 {
                    return Err(CatalogError::invalid(id, "time bonus divisor must be positive"));
                }
                for (index, question) in questions.iter().enumerate() {
                    if question.options.len() < 2 {
                        return Err(CatalogError::invalid(
                            id,
                            format!("question {} needs at least two options", index),
                        ));
                    }
                    if question.correct >= question.options.len() {
                        return Err(CatalogError::invalid(
                            id,
                            format!("question {} has an out of range answer", index),
                        ));
                    }
                }
                Ok(())
            }
            GameDefinition::WordSearch {
                grid_size,
                words,
                directions,
            } => {
                // A trial generation proves the word list fits the grid.
                let config =
                    WordSearchConfig::new(*grid_size, words.clone()).with_directions(directions);
                word_search::generate(&config, &mut StdRng::seed_from_u64(0))
                    .map(|_| ())
                    .map_err(|e| CatalogError::invalid(id, e.to_string()))
            }
            GameDefinition::SpotTheDifference { differences, .. } => {
                if differences.is_empty() {
                    return Err(CatalogError::invalid(id, "no differences defined"));
                }
                for difference in differences {
                    let in_range = |v: f64| (0.0..=100.0).contains(&v);
                    if !in_range(difference.x) || !in_range(difference.y) || difference.radius <= 0.0
                    {
                        return Err(CatalogError::invalid(
                            id,
                            format!("difference '{}' is outside the image", difference.id),
                        ));
                    }
                }
                ensure_unique(id, differences.iter().map(|d| d.id.as_str()))
            }
            GameDefinition::Timeline { events } => {
                if events.len() < 2 {
                    return Err(CatalogError::invalid(id, "timeline needs at least two events"));
                }
                ensure_unique(id, events.iter().map(|e| e.id.as_str()))
            }
            GameDefinition::DrawingCanvas { brushes, .. } => {
                if brushes.is_empty() {
                    return Err(CatalogError::invalid(id, "drawing canvas has no brushes"));
                }
                Ok(())
            }
            GameDefinition::HotspotViewer {
                width,
                height,
                hotspots,
                ..
            } => {
                if *width <= 0.0 || *height <= 0.0 {
                    return Err(CatalogError::invalid(id, "image size must be positive"));
                }
                for hotspot in hotspots {
                    if hotspot.x < 0.0
                        || hotspot.y < 0.0
                        || hotspot.x > *width
                        || hotspot.y > *height
                        || hotspot.radius <= 0.0
                    {
                        return Err(CatalogError::invalid(
                            id,
                            format!("hotspot '{}' is outside the image", hotspot.id),
                        ));
                    }
                }
                ensure_unique(id, hotspots.iter().map(|h| h.id.as_str()))
            }
        }
    }
}

fn ensure_unique<'a>(
    game_id: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::invalid(game_id, format!("duplicate item id '{}'", id)));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: GameCategory,
    pub difficulty: Difficulty,
    pub definition: GameDefinition,
}

/// Catalog listing without the game content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: GameCategory,
    pub difficulty: Difficulty,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    games: Vec<GameEntry>,
}

#[derive(Debug, Clone)]
pub struct GameCatalog {
    games: Vec<GameEntry>,
}

impl GameCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_entries(file.games)
    }

    pub fn from_entries(games: Vec<GameEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for game in &games {
            if game.id.trim().is_empty() {
                return Err(CatalogError::invalid(&game.id, "game id cannot be empty"));
            }
            if !seen.insert(game.id.as_str()) {
                return Err(CatalogError::DuplicateId(game.id.clone()));
            }
            game.definition.validate(&game.id)?;
        }
        info!("Loaded game catalog with {} games", games.len());
        Ok(GameCatalog { games })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CatalogError::Io(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&json)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn get(&self, id: &str) -> Option<&GameEntry> {
        self.games.iter().find(|game| game.id == id)
    }

    pub fn list(&self) -> &[GameEntry] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn summaries(&self) -> Vec<GameSummary> {
        self.games
            .iter()
            .map(|game| GameSummary {
                id: game.id.clone(),
                title: game.title.clone(),
                description: game.description.clone(),
                category: game.category,
                difficulty: game.difficulty,
                kind: game.definition.kind().to_string(),
            })
            .collect()
    }
}
