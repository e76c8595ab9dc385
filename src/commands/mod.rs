//! Command implementations for the CLI
//!
//! - start: Start the web server
//! - predict: One-shot price estimate
//! - cities: List supported cities
//! - test: Check configuration and model artifact
//! - config: Configuration display and validation

pub mod cities;
pub mod config;
pub mod predict;
pub mod start;
