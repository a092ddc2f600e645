use std::collections::HashMap;

use crate::models::score::{user_game_key, Score};
use crate::repositories::errors::score_repository_errors::ScoreRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_items, to_item};

#[cfg(test)]
use mockall::automock;

const SCORES_BY_GAME_INDEX: &str = "GSI_ScoresByGame";
const SCORES_BY_USER_GAME_INDEX: &str = "GSI_ScoresByUserGame";
const SCORES_BY_USER_INDEX: &str = "GSI_ScoresByUser";

/// Scores are append only.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn create_score(&self, score: &Score) -> Result<(), ScoreRepositoryError>;
    /// Highest scores for a game, best first.
    async fn top_scores(&self, game: &str, limit: usize) -> Result<Vec<Score>, ScoreRepositoryError>;
    /// One user's history for a game, newest first.
    async fn scores_for_user_game(
        &self,
        user_id: &str,
        game: &str,
    ) -> Result<Vec<Score>, ScoreRepositoryError>;
    async fn scores_for_user(&self, user_id: &str) -> Result<Vec<Score>, ScoreRepositoryError>;
}

pub struct DynamoDbScoreRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbScoreRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Pages through a descending index query until `limit` items or the end.
    async fn query_descending(
        &self,
        index: &str,
        key_attribute: &str,
        key_value: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Score>, ScoreRepositoryError> {
        let mut items: Vec<HashMap<String, AttributeValue>> = Vec::new();
        let mut start_key = None;
        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(index)
                .key_condition_expression("#key = :value")
                .expression_attribute_names("#key", key_attribute)
                .expression_attribute_values(":value", AttributeValue::S(key_value.to_string()))
                .scan_index_forward(false)
                .set_exclusive_start_key(start_key);
            if let Some(limit) = limit {
                request = request.limit((limit - items.len()) as i32);
            }
            let output = request
                .send()
                .await
                .map_err(|e| ScoreRepositoryError::DynamoDb(e.to_string()))?;

            items.extend(output.items.unwrap_or_default());
            if limit.is_some_and(|limit| items.len() >= limit) {
                break;
            }
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        from_items(items).map_err(|e| ScoreRepositoryError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl ScoreRepository for DynamoDbScoreRepository {
    async fn create_score(&self, score: &Score) -> Result<(), ScoreRepositoryError> {
        let item = to_item(score).map_err(|e| ScoreRepositoryError::Serialization(e.to_string()))?;
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(ScoreRepositoryError::AlreadyExists)
                } else {
                    Err(ScoreRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn top_scores(&self, game: &str, limit: usize) -> Result<Vec<Score>, ScoreRepositoryError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.query_descending(SCORES_BY_GAME_INDEX, "game", game, Some(limit))
            .await
    }

    async fn scores_for_user_game(
        &self,
        user_id: &str,
        game: &str,
    ) -> Result<Vec<Score>, ScoreRepositoryError> {
        self.query_descending(
            SCORES_BY_USER_GAME_INDEX,
            "userGame",
            &user_game_key(user_id, game),
            None,
        )
        .await
    }

    async fn scores_for_user(&self, user_id: &str) -> Result<Vec<Score>, ScoreRepositoryError> {
        self.query_descending(SCORES_BY_USER_INDEX, "userId", user_id, None)
            .await
    }
}
