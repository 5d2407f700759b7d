//! Request payloads accepted by the placement capability.

use serde::{Deserialize, Serialize};

use super::container::ContainerSpec;
use crate::domain::errors::{DomainError, DomainResult};

/// Ask for a free, stack-legal position for one container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub yard: String,
    /// Caller-supplied identifier, echoed back by bulk results.
    #[serde(default)]
    pub container_number: String,
    #[serde(rename = "container_size")]
    pub size: u32,
    #[serde(rename = "container_height")]
    pub height: f64,
    pub container_type: String,
}

impl SuggestionRequest {
    pub fn new(
        yard: impl Into<String>,
        container_number: impl Into<String>,
        size: u32,
        height: f64,
        container_type: impl Into<String>,
    ) -> Self {
        Self {
            yard: yard.into(),
            container_number: container_number.into(),
            size,
            height,
            container_type: container_type.into(),
        }
    }

    /// Validate the requested `(size, height, type)` combination.
    pub fn spec(&self) -> DomainResult<ContainerSpec> {
        ContainerSpec::parse(self.size, self.height, &self.container_type)
    }
}

/// Put a container at an explicit position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub yard: String,
    pub container_number: String,
    pub block: String,
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
}

impl PlacementRequest {
    pub fn new(
        yard: impl Into<String>,
        container_number: impl Into<String>,
        block: impl Into<String>,
        slot: u32,
        row: u32,
        tier: u32,
    ) -> Self {
        Self {
            yard: yard.into(),
            container_number: container_number.into(),
            block: block.into(),
            slot,
            row,
            tier,
        }
    }
}

/// Release a container for pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupRequest {
    pub yard: String,
    pub container_number: String,
}

impl PickupRequest {
    pub fn new(yard: impl Into<String>, container_number: impl Into<String>) -> Self {
        Self {
            yard: yard.into(),
            container_number: container_number.into(),
        }
    }
}

/// Reject blank container numbers before touching the store.
pub fn require_container_number(number: &str) -> DomainResult<()> {
    if number.trim().is_empty() {
        return Err(DomainError::InvalidRequest(
            "container number is required".to_string(),
        ));
    }
    Ok(())
}
