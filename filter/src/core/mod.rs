//! Core filter configuration

pub mod config;
pub mod constants;

pub use config::FilterOptions;
