pub mod actions;
pub mod client;
pub mod guards;
pub mod schema;
pub mod session;
pub mod types;
