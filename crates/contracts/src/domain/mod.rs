pub mod a001_order;
pub mod a002_sales_user;
pub mod a003_monthly_target;
pub mod a004_reference_data;
