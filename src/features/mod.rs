pub mod action;
pub mod auth;
pub mod forms;
pub mod users;
