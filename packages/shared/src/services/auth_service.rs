use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::debug;

use crate::models::auth::requests::RegisterRequest;
use crate::models::auth::responses::{LoginResponse, TokenClaims};
use crate::models::user::User;
use crate::services::errors::auth_service_errors::AuthServiceError;
use crate::services::errors::user_service_errors::UserServiceError;
use crate::services::user_service::UserService;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

pub struct AuthService {
    user_service: Arc<UserService>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>, jwt_secret: impl Into<String>) -> Self {
        AuthService {
            user_service,
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    pub fn with_token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl = Duration::hours(hours);
        self
    }

    /// Creates the account and signs the new user in.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<(User, LoginResponse), AuthServiceError> {
        let user = self
            .user_service
            .create_user(&request.username, &request.email, &request.password)
            .await?;
        let response = self.generate_token(&user.id)?;
        Ok((user, response))
    }

    pub async fn authenticate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthServiceError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Email and password are required".to_string(),
            ));
        }

        match self.user_service.get_user_by_email(email).await {
            Ok(user) => {
                if self.user_service.verify_password(&user, password).await? {
                    debug!("User {} authenticated", user.id);
                    self.generate_token(&user.id)
                } else {
                    Err(AuthServiceError::InvalidCredentials)
                }
            }
            Err(UserServiceError::UserNotFound) => Err(AuthServiceError::InvalidCredentials),
            Err(err) => Err(AuthServiceError::UserServiceError(err)),
        }
    }

    pub fn generate_token(&self, user_id: &str) -> Result<LoginResponse, AuthServiceError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: (now + self.token_ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(|e| AuthServiceError::JwtError(format!("{:#?}", e)))?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl.num_seconds(),
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<TokenClaims>(token, &decoding_key, &validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(AuthServiceError::ExpiredToken)
                }
                _ => Err(AuthServiceError::InvalidToken),
            },
        }
    }

    pub fn extract_user_id_from_token(&self, token: &str) -> Result<String, AuthServiceError> {
        let claims = self.verify_token(token)?;
        Ok(claims.sub)
    }
}
