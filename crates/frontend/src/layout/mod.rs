pub mod global_context;
pub mod main_layout;

pub use global_context::{AppContext, Page};
