pub mod config;
pub mod edit;
