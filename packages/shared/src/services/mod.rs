pub mod auth_service;
pub mod errors;
pub mod progress_service;
pub mod score_service;
pub mod stats_service;
pub mod user_service;
