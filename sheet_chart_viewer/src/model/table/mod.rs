pub mod cell_value;
pub mod data_table;
