pub mod aggregate;
pub mod money;
pub mod neighborhoods;
pub mod ranking;
