pub mod infra;
pub mod models;
pub mod services;
