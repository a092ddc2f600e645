use std::sync::Arc;

use tracing::debug;

use crate::models::user::User;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::user_service_errors::UserServiceError;

pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Costs bcrypt accepts.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;
pub const MIN_PASSWORD_LENGTH: usize = 6;
const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=30;

pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>) -> Self {
        Self::with_bcrypt_cost(repository, DEFAULT_BCRYPT_COST)
    }

    pub fn with_bcrypt_cost(
        repository: Arc<dyn UserRepository + Send + Sync>,
        bcrypt_cost: u32,
    ) -> Self {
        UserService {
            repository,
            bcrypt_cost,
        }
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserServiceError> {
        let username = username.trim();
        let email = normalize_email(email);
        validate_username(username)?;
        validate_email(&email)?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserServiceError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if self
            .repository
            .email_exists(&email)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UserAlreadyExists);
        }
        if self
            .repository
            .username_exists(username)
            .await
            .map_err(|e| UserServiceError::RepositoryError(e.to_string()))?
        {
            return Err(UserServiceError::UsernameTaken);
        }

        let cost = self.bcrypt_cost;
        let password = password.to_string();
        let hashed_password = run_blocking(move || bcrypt::hash(password, cost)).await?;
        let user = User::new(username.to_string(), email, hashed_password);
        self.repository
            .create_user(&user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::AlreadyExists => UserServiceError::UserAlreadyExists,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })?;
        debug!("Created user {}", user.id);
        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<User, UserServiceError> {
        if user_id.is_empty() {
            return Err(UserServiceError::ValidationError(
                "User ID cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, UserServiceError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Email cannot be empty".to_string(),
            ));
        }
        self.repository
            .get_user_by_email(&email)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => UserServiceError::UserNotFound,
                _ => UserServiceError::RepositoryError(e.to_string()),
            })
    }

    pub async fn verify_password(
        &self,
        user: &User,
        password: &str,
    ) -> Result<bool, UserServiceError> {
        let password = password.to_string();
        let hash = user.password.clone();
        run_blocking(move || bcrypt::verify(password, &hash)).await
    }
}

// bcrypt is CPU bound, keep it off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, UserServiceError>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| UserServiceError::HashingError(e.to_string()))?
        .map_err(|e| UserServiceError::HashingError(e.to_string()))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_username(username: &str) -> Result<(), UserServiceError> {
    if !USERNAME_LENGTH.contains(&username.chars().count()) {
        return Err(UserServiceError::ValidationError(format!(
            "Username must be between {} and {} characters",
            USERNAME_LENGTH.start(),
            USERNAME_LENGTH.end()
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(UserServiceError::ValidationError(
            "Username may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), UserServiceError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && domain.contains('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(UserServiceError::ValidationError(
            "Please enter a valid email".to_string(),
        ))
    }
}
