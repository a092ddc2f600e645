pub mod catalog_errors;
pub mod session_errors;
pub mod word_search_errors;
