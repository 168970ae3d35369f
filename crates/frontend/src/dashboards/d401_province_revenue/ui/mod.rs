pub mod province_table;
