pub mod a001_order;
pub mod a004_reference_data;
