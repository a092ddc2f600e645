pub mod auth_service_errors;
pub mod progress_service_errors;
pub mod score_service_errors;
pub mod stats_service_errors;
pub mod user_service_errors;
