//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging (tracing-subscriber, tracing-appender)
//! - Yard layout seeding from YAML
//! - Project setup and service wiring

pub mod config;
pub mod layout;
pub mod logging;
pub mod setup;
