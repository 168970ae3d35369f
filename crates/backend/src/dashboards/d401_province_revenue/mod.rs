pub mod matcher;
pub mod region_names;
pub mod service;
