//! Placement capability port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ContainerRecord, PickupRequest, PlacementRequest, Position, SuggestionRequest};

/// The suggest / place / pickup surface consumed by the request boundary.
///
/// Implemented by the placement engine and by decorators around it.
#[async_trait]
pub trait PlacementService: Send + Sync {
    /// Find the first free, stack-legal position for the requested spec.
    async fn suggest(&self, request: &SuggestionRequest) -> DomainResult<Position>;

    /// Place a container at an explicit position.
    async fn place(&self, request: &PlacementRequest) -> DomainResult<ContainerRecord>;

    /// Release a container, returning the removed record.
    async fn pickup(&self, request: &PickupRequest) -> DomainResult<ContainerRecord>;
}
