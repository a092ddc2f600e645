pub mod auth;
pub mod progress;
pub mod score;
pub mod stats;
pub mod user;
