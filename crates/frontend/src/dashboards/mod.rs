pub mod d400_sales_performance;
pub mod d401_province_revenue;
