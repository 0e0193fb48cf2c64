pub mod address;
pub mod filters;
pub mod listing;
pub mod map;
pub mod query;
pub mod selection;
pub mod validation;
