// Data models and numeric helpers shared by the engine and its callers.
pub mod models;
pub mod utils;
