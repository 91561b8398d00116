pub mod calculations;
pub mod config;
pub mod logger;
pub mod models;
pub mod report;
pub mod services;
pub mod store;

pub use calculations::aggregate::{
    break_even_months, category_share, cost_per_area, monthly_total, move_in_total,
};
pub use calculations::money::parse_money;
pub use calculations::neighborhoods::{group_average, group_by_neighborhood, group_range};
pub use calculations::ranking::{
    cheapest, cheapest_per_category, most_expensive, rank_by_total, savings, Rankings, Savings,
};
pub use models::apartment::{ApartmentRecord, RecordId};
pub use models::categories::{CostCategory, FieldKey, MetaField, MoveInFee, SheetKey};
pub use store::records::{RecordStore, UpdateOutcome};
