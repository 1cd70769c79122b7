/// Post Service Library
///
/// REST API for the Picfeed image feed: posts with an uploaded image,
/// toggled likes and append-only comments, held in process memory.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: route table shared by the binary and tests
/// - `models`: posts, comments, users and request bodies
/// - `services`: business logic and image ingestion
/// - `db`: store traits and the in-memory implementation
/// - `client`: typed API client, feed reducer and local session
/// - `error`: error types and their HTTP mapping
/// - `config`: configuration management
pub mod app_state;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use app_state::AppState;
pub use config::Config;
pub use error::{AppError, Result};
