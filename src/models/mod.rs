pub mod apartment;
pub mod categories;
