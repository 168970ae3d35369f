pub mod app_state;
pub mod coercion;
pub mod config;
pub mod data;
pub mod format;
pub mod ingest;
pub mod remote;
