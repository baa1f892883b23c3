pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod list;
pub mod models;
pub mod notify;
pub mod profile;
pub mod validation;
