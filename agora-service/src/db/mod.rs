/// Database access layer
///
/// One repository module per table, written as free async functions over
/// `&PgPool`. Cascade and nullify rules are enforced by the schema itself
/// (see `schema`), never re-checked here.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod like_repo;
pub mod post_repo;
pub mod schema;
pub mod user_repo;

pub use schema::ensure_schema;
