//! Data models and configuration.

pub mod config;
pub mod database;
pub mod document;
pub mod stats;
