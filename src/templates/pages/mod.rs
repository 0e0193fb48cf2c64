pub mod add_listing;
pub mod home;
pub mod stats;

pub use add_listing::add_listing_page;
pub use home::{home_page, HomeVm};
pub use stats::stats_page;
