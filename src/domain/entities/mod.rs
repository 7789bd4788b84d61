//! Core business data structures.

pub mod user;

pub use user::{NewUser, User};
