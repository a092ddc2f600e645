use std::env::set_var;
use std::sync::Arc;

use api::build_app;
use api::config::{Config, StorageConfig};
use api::state::AppState;
use games::catalog::GameCatalog;
use lambda_http::{run, Error};
use shared::repositories::progress_repository::DynamoDbProgressRepository;
use shared::repositories::score_repository::DynamoDbScoreRepository;
use shared::repositories::user_repository::DynamoDbUserRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    if config.on_lambda {
        set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");
        // required to enable CloudWatch error logging by the runtime
        lambda_http::tracing::init_default_subscriber();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let catalog = match &config.game_catalog_path {
        Some(path) => GameCatalog::from_path(path)?,
        None => GameCatalog::builtin()?,
    };

    let app_state = match &config.storage {
        StorageConfig::Memory => {
            info!("Using in-memory storage");
            AppState::in_memory(&config, catalog)
        }
        StorageConfig::DynamoDb {
            users_table,
            scores_table,
            progress_table,
        } => {
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            AppState::new(
                &config,
                Arc::new(DynamoDbUserRepository::new(client.clone(), users_table.as_str())),
                Arc::new(DynamoDbScoreRepository::new(client.clone(), scores_table.as_str())),
                Arc::new(DynamoDbProgressRepository::new(client, progress_table.as_str())),
                catalog,
            )
        }
    };

    let app = build_app(app_state);

    if config.on_lambda {
        run(app).await
    } else {
        let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
        info!("Listening on {}", config.bind_addr);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
