pub mod api;
pub mod auth;
pub mod middleware;
pub mod tracing;
