//! Data models: transaction records and pipeline configuration.

pub mod config;
pub mod record;
