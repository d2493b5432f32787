pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod feeds;
pub mod infra;
pub mod logging;
pub mod pipeline;
pub mod types;
