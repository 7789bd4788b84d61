//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx
//! prepared statements.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User record storage and retrieval
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
