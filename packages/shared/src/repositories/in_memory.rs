//! Process-local repositories backed by `tokio::sync::RwLock` maps.
//!
//! Used for `STORAGE_BACKEND=memory` and by the API tests. Ordering matches
//! what the DynamoDB indexes return.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::progress::Progress;
use crate::models::score::Score;
use crate::models::user::User;
use crate::repositories::errors::progress_repository_errors::ProgressRepositoryError;
use crate::repositories::errors::score_repository_errors::ScoreRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::progress_repository::ProgressRepository;
use crate::repositories::score_repository::ScoreRepository;
use crate::repositories::user_repository::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut users = self.users.write().await;
        let taken = users.values().any(|existing| {
            existing.id == user.id || existing.email == user.email || existing.username == user.username
        });
        if taken {
            return Err(UserRepositoryError::AlreadyExists);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepositoryError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError> {
        Ok(self.users.read().await.values().any(|user| user.email == email))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| user.username == username))
    }
}

#[derive(Default)]
pub struct InMemoryScoreRepository {
    scores: RwLock<Vec<Score>>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn create_score(&self, score: &Score) -> Result<(), ScoreRepositoryError> {
        let mut scores = self.scores.write().await;
        if scores.iter().any(|existing| existing.id == score.id) {
            return Err(ScoreRepositoryError::AlreadyExists);
        }
        scores.push(score.clone());
        Ok(())
    }

    async fn top_scores(&self, game: &str, limit: usize) -> Result<Vec<Score>, ScoreRepositoryError> {
        let mut matching: Vec<Score> = self
            .scores
            .read()
            .await
            .iter()
            .filter(|score| score.game == game)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.score.cmp(&a.score));
        matching.truncate(limit);
        Ok(matching)
    }

    async fn scores_for_user_game(
        &self,
        user_id: &str,
        game: &str,
    ) -> Result<Vec<Score>, ScoreRepositoryError> {
        let mut matching: Vec<Score> = self
            .scores
            .read()
            .await
            .iter()
            .filter(|score| score.user_id == user_id && score.game == game)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.achieved_at.cmp(&a.achieved_at));
        Ok(matching)
    }

    async fn scores_for_user(&self, user_id: &str) -> Result<Vec<Score>, ScoreRepositoryError> {
        let mut matching: Vec<Score> = self
            .scores
            .read()
            .await
            .iter()
            .filter(|score| score.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.achieved_at.cmp(&a.achieved_at));
        Ok(matching)
    }
}

#[derive(Default)]
pub struct InMemoryProgressRepository {
    // keyed by (user_id, game)
    progress: RwLock<HashMap<(String, String), Progress>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn get_progress(
        &self,
        user_id: &str,
        game: &str,
    ) -> Result<Progress, ProgressRepositoryError> {
        self.progress
            .read()
            .await
            .get(&(user_id.to_string(), game.to_string()))
            .cloned()
            .ok_or(ProgressRepositoryError::NotFound)
    }

    async fn list_progress(&self, user_id: &str) -> Result<Vec<Progress>, ProgressRepositoryError> {
        let mut records: Vec<Progress> = self
            .progress
            .read()
            .await
            .values()
            .filter(|progress| progress.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.game.cmp(&b.game));
        Ok(records)
    }

    async fn put_progress(
        &self,
        progress: &Progress,
        expected_version: Option<u64>,
    ) -> Result<(), ProgressRepositoryError> {
        let mut records = self.progress.write().await;
        let key = (progress.user_id.clone(), progress.game.clone());
        if records.get(&key).map(|stored| stored.version) != expected_version {
            return Err(ProgressRepositoryError::Conflict);
        }
        records.insert(key, progress.clone());
        Ok(())
    }
}
