use std::sync::Arc;

use games::catalog::GameCatalog;
use shared::repositories::in_memory::{
    InMemoryProgressRepository, InMemoryScoreRepository, InMemoryUserRepository,
};
use shared::repositories::progress_repository::ProgressRepository;
use shared::repositories::score_repository::ScoreRepository;
use shared::repositories::user_repository::UserRepository;
use shared::services::auth_service::AuthService;
use shared::services::progress_service::ProgressService;
use shared::services::score_service::ScoreService;
use shared::services::stats_service::StatsService;
use shared::services::user_service::UserService;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub score_service: Arc<ScoreService>,
    pub progress_service: Arc<ProgressService>,
    pub stats_service: Arc<StatsService>,
    pub catalog: Arc<GameCatalog>,
}

impl AppState {
    pub fn new(
        config: &Config,
        users: Arc<dyn UserRepository + Send + Sync>,
        scores: Arc<dyn ScoreRepository + Send + Sync>,
        progress: Arc<dyn ProgressRepository + Send + Sync>,
        catalog: GameCatalog,
    ) -> Self {
        let user_service = Arc::new(UserService::with_bcrypt_cost(
            users.clone(),
            config.bcrypt_cost,
        ));
        let auth_service = Arc::new(
            AuthService::new(user_service.clone(), config.jwt_secret.clone())
                .with_token_ttl_hours(config.token_ttl_hours),
        );

        AppState {
            auth_service,
            user_service,
            score_service: Arc::new(ScoreService::new(scores.clone())),
            progress_service: Arc::new(ProgressService::new(progress.clone())),
            stats_service: Arc::new(StatsService::new(users, scores, progress)),
            catalog: Arc::new(catalog),
        }
    }

    pub fn in_memory(config: &Config, catalog: GameCatalog) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryScoreRepository::new()),
            Arc::new(InMemoryProgressRepository::new()),
            catalog,
        )
    }
}
