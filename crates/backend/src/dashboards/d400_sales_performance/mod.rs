pub mod engine;
pub mod filter;
pub mod profit;
pub mod service;
