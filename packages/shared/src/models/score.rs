use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional context a game sends along with a score.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_found: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub game: String,
    pub score: i64,
    #[serde(default)]
    pub details: ScoreDetails,
    pub achieved_at: DateTime<Utc>,
    /// `"{user_id}#{game}"`, the partition key of the per-user history index.
    pub user_game: String,
}

impl Score {
    pub fn new(
        user_id: String,
        username: String,
        game: String,
        score: i64,
        details: ScoreDetails,
    ) -> Self {
        let user_game = user_game_key(&user_id, &game);
        Score {
            id: Uuid::new_v4().to_string(),
            user_id,
            username,
            game,
            score,
            details,
            achieved_at: Utc::now(),
            user_game,
        }
    }
}

pub fn user_game_key(user_id: &str, game: &str) -> String {
    format!("{}#{}", user_id, game)
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub username: String,
    pub score: i64,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    pub score: i64,
    #[serde(default)]
    pub details: ScoreDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_score_builds_user_game_key() {
        let score = Score::new(
            "user-1".to_string(),
            "rockfan".to_string(),
            "petroglyph-memory".to_string(),
            420,
            ScoreDetails::default(),
        );

        assert_eq!(score.user_game, "user-1#petroglyph-memory");
        assert!(!score.id.is_empty());
    }

    #[test]
    fn test_submit_request_details_are_optional() {
        let request: SubmitScoreRequest = serde_json::from_str(r#"{"score": 90}"#).unwrap();
        assert_eq!(request.score, 90);
        assert_eq!(request.details, ScoreDetails::default());

        let request: SubmitScoreRequest = serde_json::from_str(
            r#"{"score": 90, "details": {"timeSpent": 41, "accuracy": 0.8, "itemsFound": 7}}"#,
        )
        .unwrap();
        assert_eq!(request.details.time_spent, Some(41));
        assert_eq!(request.details.items_found, Some(7));
    }
}
