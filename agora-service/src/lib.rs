/// Agora Service Library
///
/// A blogging/community platform service: users author posts, organize
/// them into groups, comment, follow other authors, and like posts.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for users, groups, posts, comments, follows
/// - `services`: Business logic layer (feed assembly, social graph, engagement)
/// - `db`: Database access layer and repositories
/// - `cache`: Global-feed response caching
/// - `middleware`: HTTP middleware for authentication
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
