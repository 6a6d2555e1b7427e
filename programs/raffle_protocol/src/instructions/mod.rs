pub mod admin;
pub mod entry;
pub mod upkeep;
pub mod fulfill;
pub mod payout;
pub mod query;
