//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber, with an optional
//! rolling JSON log file from tracing-appender.

pub mod logger;

pub use logger::LoggerImpl;
