use std::sync::Arc;

use crate::models::stats::UserStats;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::progress_repository::ProgressRepository;
use crate::repositories::score_repository::ScoreRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::stats_service_errors::StatsServiceError;

pub struct StatsService {
    users: Arc<dyn UserRepository + Send + Sync>,
    scores: Arc<dyn ScoreRepository + Send + Sync>,
    progress: Arc<dyn ProgressRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(
        users: Arc<dyn UserRepository + Send + Sync>,
        scores: Arc<dyn ScoreRepository + Send + Sync>,
        progress: Arc<dyn ProgressRepository + Send + Sync>,
    ) -> Self {
        StatsService {
            users,
            scores,
            progress,
        }
    }

    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats, StatsServiceError> {
        self.users.get_user_by_id(user_id).await.map_err(|e| match e {
            UserRepositoryError::NotFound => StatsServiceError::UserNotFound,
            _ => StatsServiceError::RepositoryError(e.to_string()),
        })?;

        let (scores, progress) = tokio::try_join!(
            async {
                self.scores
                    .scores_for_user(user_id)
                    .await
                    .map_err(|e| StatsServiceError::RepositoryError(e.to_string()))
            },
            async {
                self.progress
                    .list_progress(user_id)
                    .await
                    .map_err(|e| StatsServiceError::RepositoryError(e.to_string()))
            },
        )?;

        Ok(UserStats::compute(user_id, &scores, &progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::Progress;
    use crate::models::score::{Score, ScoreDetails};
    use crate::models::user::User;
    use crate::repositories::errors::score_repository_errors::ScoreRepositoryError;
    use crate::repositories::progress_repository::MockProgressRepository;
    use crate::repositories::score_repository::MockScoreRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn known_user() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_get_user_by_id().returning(|id| {
            let mut user = User::new(
                "rockfan".to_string(),
                "rockfan@example.com".to_string(),
                "hash".to_string(),
            );
            user.id = id.to_string();
            Ok(user)
        });
        users
    }

    #[tokio::test]
    async fn test_user_stats_combines_sources() {
        let mut scores = MockScoreRepository::new();
        scores.expect_scores_for_user().returning(|user_id| {
            Ok(vec![
                Score::new(
                    user_id.to_string(),
                    "rockfan".to_string(),
                    "quiz".to_string(),
                    120,
                    ScoreDetails::default(),
                ),
                Score::new(
                    user_id.to_string(),
                    "rockfan".to_string(),
                    "quiz".to_string(),
                    80,
                    ScoreDetails::default(),
                ),
            ])
        });
        let mut progress = MockProgressRepository::new();
        progress.expect_list_progress().returning(|user_id| {
            let mut record = Progress::new(user_id.to_string(), "timeline".to_string());
            record.level = 2;
            Ok(vec![record])
        });
        let service = StatsService::new(
            Arc::new(known_user()),
            Arc::new(scores),
            Arc::new(progress),
        );

        let stats = service.user_stats("u1").await.unwrap();

        assert_eq!(stats.user_id, "u1");
        assert_eq!(stats.total_plays, 2);
        assert_eq!(stats.best_score, Some(120));
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.highest_level, 2);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_user_by_id()
            .returning(|_| Err(UserRepositoryError::NotFound));
        let mut scores = MockScoreRepository::new();
        scores.expect_scores_for_user().never();
        let service = StatsService::new(
            Arc::new(users),
            Arc::new(scores),
            Arc::new(MockProgressRepository::new()),
        );

        assert_eq!(
            service.user_stats("ghost").await.unwrap_err(),
            StatsServiceError::UserNotFound
        );
    }

    #[tokio::test]
    async fn test_storage_error() {
        let mut scores = MockScoreRepository::new();
        scores
            .expect_scores_for_user()
            .returning(|_| Err(ScoreRepositoryError::DynamoDb("down".to_string())));
        let mut progress = MockProgressRepository::new();
        progress.expect_list_progress().returning(|_| Ok(vec![]));
        let service = StatsService::new(
            Arc::new(known_user()),
            Arc::new(scores),
            Arc::new(progress),
        );

        assert!(matches!(
            service.user_stats("u1").await,
            Err(StatsServiceError::RepositoryError(_))
        ));
    }
}
