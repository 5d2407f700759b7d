//! Domain layer for yard placement
//!
//! This module contains the models, the error taxonomy and the port traits
//! that adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, ErrorKind};
