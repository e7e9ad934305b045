pub mod analyzers;
pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod monitor;
pub mod output;
pub mod services;
