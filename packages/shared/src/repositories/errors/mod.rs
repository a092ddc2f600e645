pub mod progress_repository_errors;
pub mod score_repository_errors;
pub mod user_repository_errors;
