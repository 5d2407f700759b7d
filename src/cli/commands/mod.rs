//! CLI command implementations.

pub mod bulk;
pub mod containers;
pub mod init;
pub mod placement;
pub mod seed;
