pub mod classify;
pub mod config;
pub mod dates;
pub mod error;
pub mod estimate;
pub mod models;
pub mod notify;
pub mod report;
pub mod services;
pub mod source;
pub mod store;
