use crate::models::progress::Progress;
use crate::repositories::errors::progress_repository_errors::ProgressRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, from_items, to_item};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn get_progress(
        &self,
        user_id: &str,
        game: &str,
    ) -> Result<Progress, ProgressRepositoryError>;
    async fn list_progress(&self, user_id: &str) -> Result<Vec<Progress>, ProgressRepositoryError>;
    /// Writes the record for `(progress.user_id, progress.game)` only if the
    /// stored version is still `expected_version`. `None` expects no record.
    /// Fails with `Conflict` otherwise.
    async fn put_progress(
        &self,
        progress: &Progress,
        expected_version: Option<u64>,
    ) -> Result<(), ProgressRepositoryError>;
}

/// Table keyed by `userId` (partition) and `game` (sort).
pub struct DynamoDbProgressRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbProgressRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl ProgressRepository for DynamoDbProgressRepository {
    async fn get_progress(
        &self,
        user_id: &str,
        game: &str,
    ) -> Result<Progress, ProgressRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("userId", AttributeValue::S(user_id.to_string()))
            .key("game", AttributeValue::S(game.to_string()))
            .send()
            .await
            .map_err(|e| ProgressRepositoryError::DynamoDb(e.to_string()))?;
        match output.item {
            Some(item) => {
                from_item(item).map_err(|e| ProgressRepositoryError::Serialization(e.to_string()))
            }
            None => Err(ProgressRepositoryError::NotFound),
        }
    }

    async fn list_progress(&self, user_id: &str) -> Result<Vec<Progress>, ProgressRepositoryError> {
        let mut items = Vec::new();
        let mut start_key = None;
        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("#user = :user")
                .expression_attribute_names("#user", "userId")
                .expression_attribute_values(":user", AttributeValue::S(user_id.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| ProgressRepositoryError::DynamoDb(e.to_string()))?;
            items.extend(output.items.unwrap_or_default());
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        from_items(items).map_err(|e| ProgressRepositoryError::Serialization(e.to_string()))
    }

    async fn put_progress(
        &self,
        progress: &Progress,
        expected_version: Option<u64>,
    ) -> Result<(), ProgressRepositoryError> {
        let item =
            to_item(progress).map_err(|e| ProgressRepositoryError::Serialization(e.to_string()))?;
        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item));
        let request = match expected_version {
            None => request
                .condition_expression("attribute_not_exists(#user)")
                .expression_attribute_names("#user", "userId"),
            Some(version) => {
                let condition = if version == 0 {
                    "attribute_not_exists(#version) OR #version = :expected"
                } else {
                    "#version = :expected"
                };
                request
                    .condition_expression(condition)
                    .expression_attribute_names("#version", "version")
                    .expression_attribute_values(":expected", AttributeValue::N(version.to_string()))
            }
        };

        match request.send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ConditionalCheckFailedException") {
                    Err(ProgressRepositoryError::Conflict)
                } else {
                    Err(ProgressRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }
}
