//! Domain errors for the yard placement system.

use thiserror::Error;

/// Coarse classification of a [`DomainError`].
///
/// Validation errors are raised before any store access, conflicts are
/// business-rule rejections, and store errors come from the persistence
/// layer. None of them are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Store,
}

/// Domain-level errors that can occur while suggesting, placing or
/// picking up containers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid container spec: {0}")]
    InvalidSpec(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Yard with code '{0}' not found")]
    YardNotFound(String),

    #[error("Block with code '{block}' not found in yard '{yard}'")]
    BlockNotFound { yard: String, block: String },

    #[error("Container '{0}' not found")]
    ContainerNotFound(String),

    #[error("No available position found for {0}")]
    NoAvailablePosition(String),

    #[error("Position {block}/{slot}/{row}/{tier} is already occupied")]
    PositionOccupied {
        block: String,
        slot: u32,
        row: u32,
        tier: u32,
    },

    #[error("Container '{0}' already placed in yard")]
    DuplicateContainer(String),

    #[error("Cannot place container at tier {0}: tier below is empty")]
    UnsupportedTier(u32),

    #[error("Cannot pick up container '{0}': there are containers on top")]
    ContainerBlocked(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSpec(_) | Self::InvalidPosition(_) | Self::InvalidRequest(_) => {
                ErrorKind::Validation
            }
            Self::YardNotFound(_)
            | Self::BlockNotFound { .. }
            | Self::ContainerNotFound(_)
            | Self::NoAvailablePosition(_) => ErrorKind::NotFound,
            Self::PositionOccupied { .. }
            | Self::DuplicateContainer(_)
            | Self::UnsupportedTier(_)
            | Self::ContainerBlocked(_) => ErrorKind::Conflict,
            Self::DatabaseError(_) | Self::SerializationError(_) => ErrorKind::Store,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
