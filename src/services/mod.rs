pub mod comparison;
pub mod workspace;
