//! HTTP request handlers for API endpoints.

pub mod health;
pub mod users;

pub use health::health_handler;
pub use users::{
    create_user_handler, delete_user_handler, get_user_by_email_handler, get_user_handler,
    rename_user_handler,
};
