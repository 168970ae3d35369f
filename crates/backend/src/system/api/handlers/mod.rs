// Authentication handlers
pub mod auth;
