pub mod errors;
pub mod in_memory;
pub mod progress_repository;
pub mod score_repository;
pub mod user_repository;
