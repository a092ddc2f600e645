use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STARTING_LEVEL: u32 = 1;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedChallenge {
    pub id: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

/// One record per `(user_id, game)`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub user_id: String,
    pub game: String,
    pub level: u32,
    #[serde(default)]
    pub completed_challenges: Vec<CompletedChallenge>,
    pub last_played: DateTime<Utc>,
    /// Bumped on every save. Records written before versioning read as 0.
    #[serde(default)]
    pub version: u64,
}

impl Progress {
    pub fn new(user_id: String, game: String) -> Self {
        Progress {
            user_id,
            game,
            level: STARTING_LEVEL,
            completed_challenges: Vec::new(),
            last_played: Utc::now(),
            version: 0,
        }
    }
}

/// Body of `POST /api/progress/:game`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub challenge_id: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_progress_starts_at_level_one() {
        let progress = Progress::new("user-1".to_string(), "rock-art-timeline".to_string());

        assert_eq!(progress.level, STARTING_LEVEL);
        assert!(progress.completed_challenges.is_empty());
    }

    #[test]
    fn test_update_accepts_partial_bodies() {
        let update: ProgressUpdate = serde_json::from_str(r#"{"level": 3}"#).unwrap();
        assert_eq!(update.level, Some(3));
        assert!(update.challenge_id.is_none());

        let update: ProgressUpdate =
            serde_json::from_str(r#"{"challengeId": "c1", "score": 80}"#).unwrap();
        assert_eq!(update.challenge_id.as_deref(), Some("c1"));
        assert_eq!(update.score, Some(80));
        assert!(update.level.is_none());
    }
}
