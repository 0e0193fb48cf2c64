pub mod connection;
pub mod listings;
pub mod seed;
pub mod stats;

pub use connection::Database;
