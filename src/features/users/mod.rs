pub mod actions;
pub mod client;
pub mod schema;
pub mod types;
