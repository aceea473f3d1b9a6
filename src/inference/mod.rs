pub mod classifier;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod policy;
