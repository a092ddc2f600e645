use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::models::progress::{CompletedChallenge, Progress, ProgressUpdate};
use crate::repositories::errors::progress_repository_errors::ProgressRepositoryError;
use crate::repositories::progress_repository::ProgressRepository;
use crate::services::errors::progress_service_errors::ProgressServiceError;

/// Read-modify-write rounds before a contended update gives up.
pub const MAX_SAVE_ATTEMPTS: usize = 10;

pub struct ProgressService {
    repository: Arc<dyn ProgressRepository + Send + Sync>,
}

impl ProgressService {
    pub fn new(repository: Arc<dyn ProgressRepository + Send + Sync>) -> Self {
        ProgressService { repository }
    }

    pub async fn get_progress(
        &self,
        user_id: &str,
        game: &str,
    ) -> Result<Progress, ProgressServiceError> {
        let game = validate_game(game)?;
        Ok(self.repository.get_progress(user_id, game).await?)
    }

    /// Every game the user has progress in, most recently played first.
    pub async fn list_progress(&self, user_id: &str) -> Result<Vec<Progress>, ProgressServiceError> {
        let mut records = self.repository.list_progress(user_id).await?;
        records.sort_by(|a, b| b.last_played.cmp(&a.last_played));
        Ok(records)
    }

    /// Upserts the `(user_id, game)` record.
    ///
    /// A missing record starts at level 1 with no challenges. `level` replaces
    /// the stored level, `challenge_id` appends a completed challenge, and
    /// `last_played` is always refreshed. Saves are conditional on the version
    /// that was read, so concurrent appends are retried instead of lost.
    pub async fn record_progress(
        &self,
        user_id: &str,
        game: &str,
        update: ProgressUpdate,
    ) -> Result<Progress, ProgressServiceError> {
        let game = validate_game(game)?;
        let level = match update.level {
            Some(level) if level < 1 || level > i64::from(u32::MAX) => {
                return Err(ProgressServiceError::ValidationError(
                    "Level must be at least 1".to_string(),
                ));
            }
            Some(level) => Some(level as u32),
            None => None,
        };
        let challenge_id = match update.challenge_id.as_deref().map(str::trim) {
            Some("") => {
                return Err(ProgressServiceError::ValidationError(
                    "Challenge ID cannot be empty".to_string(),
                ));
            }
            other => other.map(str::to_string),
        };

        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let (mut progress, expected_version) =
                match self.repository.get_progress(user_id, game).await {
                    Ok(progress) => {
                        let version = progress.version;
                        (progress, Some(version))
                    }
                    Err(ProgressRepositoryError::NotFound) => {
                        (Progress::new(user_id.to_string(), game.to_string()), None)
                    }
                    Err(e) => return Err(e.into()),
                };

            let now = Utc::now();
            if let Some(level) = level {
                progress.level = level;
            }
            if let Some(id) = &challenge_id {
                progress.completed_challenges.push(CompletedChallenge {
                    id: id.clone(),
                    completed_at: now,
                    score: update.score,
                });
            }
            progress.last_played = now;
            progress.version = expected_version.map_or(1, |version| version + 1);

            match self.repository.put_progress(&progress, expected_version).await {
                Ok(()) => {
                    debug!(
                        "Saved progress for {} on {}: level {}, {} challenges",
                        user_id,
                        game,
                        progress.level,
                        progress.completed_challenges.len()
                    );
                    return Ok(progress);
                }
                Err(ProgressRepositoryError::Conflict) => {
                    debug!(attempt, "Progress for {} on {} changed underneath, retrying", user_id, game);
                }
                Err(e) => return Err(e.into()),
            }
        }
        warn!("Gave up saving progress for {} on {}", user_id, game);
        Err(ProgressServiceError::Conflict)
    }
}

fn validate_game(game: &str) -> Result<&str, ProgressServiceError> {
    let game = game.trim();
    if game.is_empty() {
        return Err(ProgressServiceError::ValidationError(
            "Game cannot be empty".to_string(),
        ));
    }
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::in_memory::InMemoryProgressRepository;
    use crate::repositories::progress_repository::MockProgressRepository;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_first_update_creates_record() {
        let mut mock_repo = MockProgressRepository::new();
        mock_repo
            .expect_get_progress()
            .returning(|_, _| Err(ProgressRepositoryError::NotFound));
        mock_repo
            .expect_put_progress()
            .withf(|progress, expected| {
                progress.level == 3
                    && progress.completed_challenges.is_empty()
                    && progress.version == 1
                    && expected.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let service = ProgressService::new(Arc::new(mock_repo));

        let progress = service
            .record_progress(
                "u1",
                "timeline",
                ProgressUpdate {
                    level: Some(3),
                    ..ProgressUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(progress.level, 3);
        assert_eq!(progress.user_id, "u1");
        assert!(progress.completed_challenges.is_empty());
    }

    #[tokio::test]
    async fn test_challenge_is_appended_to_existing_record() {
        let mut existing = Progress::new("u1".to_string(), "timeline".to_string());
        existing.level = 3;
        existing.completed_challenges.push(CompletedChallenge {
            id: "first".to_string(),
            completed_at: Utc::now(),
            score: Some(10),
        });
        let mut mock_repo = MockProgressRepository::new();
        mock_repo
            .expect_get_progress()
            .returning(move |_, _| Ok(existing.clone()));
        mock_repo
            .expect_put_progress()
            .withf(|progress, expected| progress.version == 1 && *expected == Some(0))
            .returning(|_, _| Ok(()));
        let service = ProgressService::new(Arc::new(mock_repo));

        let progress = service
            .record_progress(
                "u1",
                "timeline",
                ProgressUpdate {
                    challenge_id: Some("second".to_string()),
                    score: Some(40),
                    ..ProgressUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(progress.level, 3);
        let ids: Vec<&str> = progress
            .completed_challenges
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(progress.completed_challenges[1].score, Some(40));
    }

    #[rstest]
    #[case(Some(0), None)]
    #[case(Some(-2), None)]
    #[case(None, Some("  "))]
    #[tokio::test]
    async fn test_invalid_updates_are_rejected(
        #[case] level: Option<i64>,
        #[case] challenge_id: Option<&str>,
    ) {
        let mut mock_repo = MockProgressRepository::new();
        mock_repo.expect_put_progress().never();
        let service = ProgressService::new(Arc::new(mock_repo));

        let result = service
            .record_progress(
                "u1",
                "timeline",
                ProgressUpdate {
                    level,
                    challenge_id: challenge_id.map(str::to_string),
                    score: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ProgressServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_treated_as_missing() {
        let mut mock_repo = MockProgressRepository::new();
        mock_repo
            .expect_get_progress()
            .returning(|_, _| Err(ProgressRepositoryError::DynamoDb("timeout".to_string())));
        mock_repo.expect_put_progress().never();
        let service = ProgressService::new(Arc::new(mock_repo));

        let result = service
            .record_progress("u1", "timeline", ProgressUpdate::default())
            .await;

        assert!(matches!(result, Err(ProgressServiceError::RepositoryError(_))));
    }

    #[tokio::test]
    async fn test_get_missing_progress() {
        let mut mock_repo = MockProgressRepository::new();
        mock_repo
            .expect_get_progress()
            .withf(|user_id, game| user_id == "u1" && game == "quiz")
            .returning(|_, _| Err(ProgressRepositoryError::NotFound));
        let service = ProgressService::new(Arc::new(mock_repo));

        assert_eq!(
            service.get_progress("u1", "quiz").await.unwrap_err(),
            ProgressServiceError::NotFound
        );
    }

    #[tokio::test]
    async fn test_conflicting_save_is_retried_on_fresh_data() {
        let reads = Arc::new(AtomicUsize::new(0));
        let reads_in_mock = Arc::clone(&reads);
        let mut mock_repo = MockProgressRepository::new();
        mock_repo.expect_get_progress().returning(move |_, _| {
            // The second read sees a challenge another request saved meanwhile.
            let mut stored = Progress::new("u1".to_string(), "timeline".to_string());
            stored.version = 4;
            if reads_in_mock.fetch_add(1, Ordering::SeqCst) > 0 {
                stored.version = 5;
                stored.completed_challenges.push(CompletedChallenge {
                    id: "other".to_string(),
                    completed_at: Utc::now(),
                    score: None,
                });
            }
            Ok(stored)
        });
        mock_repo.expect_put_progress().returning(|_, expected| match expected {
            Some(5) => Ok(()),
            _ => Err(ProgressRepositoryError::Conflict),
        });
        let service = ProgressService::new(Arc::new(mock_repo));

        let progress = service
            .record_progress(
                "u1",
                "timeline",
                ProgressUpdate {
                    challenge_id: Some("mine".to_string()),
                    ..ProgressUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(reads.load(Ordering::SeqCst), 2);
        assert_eq!(progress.version, 6);
        let ids: Vec<&str> = progress
            .completed_challenges
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["other", "mine"]);
    }

    #[tokio::test]
    async fn test_persistent_conflict_gives_up() {
        let mut mock_repo = MockProgressRepository::new();
        mock_repo
            .expect_get_progress()
            .returning(|_, _| Err(ProgressRepositoryError::NotFound));
        mock_repo
            .expect_put_progress()
            .times(MAX_SAVE_ATTEMPTS)
            .returning(|_, _| Err(ProgressRepositoryError::Conflict));
        let service = ProgressService::new(Arc::new(mock_repo));

        let result = service
            .record_progress("u1", "timeline", ProgressUpdate::default())
            .await;

        assert_eq!(result.unwrap_err(), ProgressServiceError::Conflict);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_challenges_are_all_kept() {
        let service = Arc::new(ProgressService::new(Arc::new(
            InMemoryProgressRepository::new(),
        )));

        let handles: Vec<_> = (0..MAX_SAVE_ATTEMPTS)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service
                        .record_progress(
                            "u1",
                            "timeline",
                            ProgressUpdate {
                                challenge_id: Some(format!("challenge-{}", i)),
                                ..ProgressUpdate::default()
                            },
                        )
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = service.get_progress("u1", "timeline").await.unwrap();
        assert_eq!(stored.completed_challenges.len(), MAX_SAVE_ATTEMPTS);
        assert_eq!(stored.version, MAX_SAVE_ATTEMPTS as u64);
    }
}
