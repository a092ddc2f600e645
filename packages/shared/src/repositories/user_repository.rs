use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_attribute_value, to_item};

#[cfg(test)]
use mockall::automock;

const EMAIL_INDEX: &str = "GSI_UserByEmail";
const USERNAME_INDEX: &str = "GSI_UserByUsername";

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError>;
    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepositoryError>;
    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError>;
    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError>;
}

pub struct DynamoDbUserRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    async fn query_index(
        &self,
        index: &str,
        attribute: &str,
        value: &str,
        limit: i32,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(index)
            .key_condition_expression("#attr = :value")
            .expression_attribute_names("#attr", attribute)
            .expression_attribute_values(
                ":value",
                to_attribute_value(value)
                    .map_err(|e| UserRepositoryError::Serialization(e.to_string()))?,
            )
            .limit(limit)
            .send()
            .await;
        match result {
            Ok(output) => output
                .items
                .unwrap_or_default()
                .into_iter()
                .map(|item| {
                    from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))
                })
                .collect(),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("ResourceNotFoundException")
                    || error_str.contains("ValidationException")
                {
                    return Err(UserRepositoryError::DynamoDb(format!(
                        "User index not available. Please ensure the GSI '{}' exists and is active.",
                        index
                    )));
                }
                Err(UserRepositoryError::DynamoDb(error_str))
            }
        }
    }
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    async fn create_user(&self, user: &User) -> Result<(), UserRepositoryError> {
        let item = to_item(user).map_err(|e| UserRepositoryError::Serialization(e.to_string()))?;
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
                    Err(UserRepositoryError::AlreadyExists)
                } else {
                    Err(UserRepositoryError::DynamoDb(error_str))
                }
            }
        }
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| UserRepositoryError::DynamoDb(e.to_string()))?;
        match output.item {
            Some(item) => {
                from_item(item).map_err(|e| UserRepositoryError::Serialization(e.to_string()))
            }
            None => Err(UserRepositoryError::NotFound),
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepositoryError> {
        self.query_index(EMAIL_INDEX, "email", email, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(UserRepositoryError::NotFound)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError> {
        Ok(!self.query_index(EMAIL_INDEX, "email", email, 1).await?.is_empty())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        Ok(!self
            .query_index(USERNAME_INDEX, "username", username, 1)
            .await?
            .is_empty())
    }
}
