pub mod persistence;
pub mod records;
