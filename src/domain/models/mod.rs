//! Domain models for yard placement.

pub mod config;
pub mod container;
pub mod request;
pub mod yard;

pub use config::{BulkConfig, CacheConfig, Config, DatabaseConfig, LogFormat, LoggingConfig, RotationPolicy};
pub use container::{
    Cell, ContainerHeight, ContainerLocation, ContainerRecord, ContainerSize, ContainerSpec,
    ContainerType, NewContainer, Position,
};
pub use request::{PickupRequest, PlacementRequest, SuggestionRequest};
pub use yard::{Block, NewBlock, NewPlan, NewYard, PlacementPlan, Yard};
