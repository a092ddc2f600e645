use std::sync::Arc;

use tracing::debug;

use crate::models::score::{LeaderboardEntry, Score, ScoreDetails};
use crate::repositories::score_repository::ScoreRepository;
use crate::services::errors::score_service_errors::ScoreServiceError;

pub const LEADERBOARD_LIMIT: usize = 10;
pub const MAX_SCORE: i64 = 1_000_000_000;

pub struct ScoreService {
    repository: Arc<dyn ScoreRepository + Send + Sync>,
}

impl ScoreService {
    pub fn new(repository: Arc<dyn ScoreRepository + Send + Sync>) -> Self {
        ScoreService { repository }
    }

    pub async fn submit_score(
        &self,
        user_id: &str,
        username: &str,
        game: &str,
        score: i64,
        details: ScoreDetails,
    ) -> Result<Score, ScoreServiceError> {
        let game = validate_game(game)?;
        if score < 0 {
            return Err(ScoreServiceError::ValidationError(
                "Score cannot be negative".to_string(),
            ));
        }
        if score > MAX_SCORE {
            return Err(ScoreServiceError::ValidationError(format!(
                "Score cannot exceed {}",
                MAX_SCORE
            )));
        }
        if details.accuracy.is_some_and(|accuracy| !accuracy.is_finite()) {
            return Err(ScoreServiceError::ValidationError(
                "Accuracy must be a number".to_string(),
            ));
        }

        let score = Score::new(
            user_id.to_string(),
            username.to_string(),
            game.to_string(),
            score,
            details,
        );
        self.repository.create_score(&score).await?;
        debug!("Recorded score {} for {} on {}", score.score, user_id, score.game);
        Ok(score)
    }

    /// Top scores for a game, best first. Ties go to whoever got there first.
    pub async fn leaderboard(&self, game: &str) -> Result<Vec<LeaderboardEntry>, ScoreServiceError> {
        let game = validate_game(game)?;
        let mut scores = self.repository.top_scores(game, LEADERBOARD_LIMIT).await?;
        scores.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.achieved_at.cmp(&b.achieved_at))
        });
        scores.truncate(LEADERBOARD_LIMIT);

        Ok(scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| LeaderboardEntry {
                rank: index + 1,
                user_id: score.user_id,
                username: score.username,
                score: score.score,
                achieved_at: score.achieved_at,
            })
            .collect())
    }

    /// One user's scores for a game, newest first.
    pub async fn user_scores(&self, user_id: &str, game: &str) -> Result<Vec<Score>, ScoreServiceError> {
        let game = validate_game(game)?;
        let mut scores = self.repository.scores_for_user_game(user_id, game).await?;
        scores.sort_by(|a, b| b.achieved_at.cmp(&a.achieved_at));
        Ok(scores)
    }
}

fn validate_game(game: &str) -> Result<&str, ScoreServiceError> {
    let game = game.trim();
    if game.is_empty() {
        return Err(ScoreServiceError::ValidationError(
            "Game cannot be empty".to_string(),
        ));
    }
    Ok(game)
}
