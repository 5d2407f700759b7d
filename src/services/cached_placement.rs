//! Cache-aside decorator for a [`PlacementService`].
//!
//! Suggestions are cached per `(yard, spec)` and re-checked against the store
//! before being served. Place and pickup drop every cached suggestion for the
//! yard and maintain a `container:{number}` location record. Cache failures
//! are logged and never reach the caller.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    CacheConfig, ContainerLocation, ContainerRecord, ContainerSpec, PickupRequest, PlacementRequest, Position,
    SuggestionRequest,
};
use crate::domain::ports::{CacheStore, PlacementService, PositionStore};

/// Cache key for a suggestion of `spec` in `yard`.
pub fn suggestion_key(yard: &str, spec: &ContainerSpec) -> String {
    format!(
        "suggestion:{}:{}:{:.1}:{}",
        yard,
        spec.size.feet(),
        spec.height.feet(),
        spec.container_type.as_str()
    )
}

/// Prefix shared by every cached suggestion for `yard`.
pub fn suggestion_prefix(yard: &str) -> String {
    format!("suggestion:{yard}:")
}

pub fn location_key(container_number: &str) -> String {
    format!("container:{container_number}")
}

pub struct CachedPlacementService<P, S>
where
    P: PlacementService + ?Sized,
    S: PositionStore + ?Sized,
{
    inner: Arc<P>,
    store: Arc<S>,
    cache: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl<P, S> CachedPlacementService<P, S>
where
    P: PlacementService + ?Sized,
    S: PositionStore + ?Sized,
{
    pub fn new(inner: Arc<P>, store: Arc<S>, cache: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            inner,
            store,
            cache,
            config,
        }
    }

    /// Last known location of a placed container, from the side record only.
    pub async fn cached_location(&self, container_number: &str) -> Option<ContainerLocation> {
        self.read_json(&location_key(container_number)).await
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "cache read failed");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding undecodable cache entry");
                self.evict(key).await;
                None
            }
        }
    }

    async fn write_json<T: Serialize + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key, error = %e, "cache value encoding failed");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, bytes, ttl).await {
            warn!(key, error = %e, "cache write failed");
        }
    }

    async fn evict(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            warn!(key, error = %e, "cache delete failed");
        }
    }

    async fn invalidate_yard(&self, yard: &str) {
        let prefix = suggestion_prefix(yard);
        if let Err(e) = self.cache.delete_by_prefix(&prefix).await {
            warn!(prefix = %prefix, error = %e, "cache invalidation failed");
        }
    }

    /// Whether a cached position is still free in the store.
    ///
    /// Any store error counts as stale.
    async fn still_free(&self, yard: &str, position: &Position, spec: &ContainerSpec) -> bool {
        match self.position_free(yard, position, spec).await {
            Ok(free) => free,
            Err(e) => {
                warn!(position = %position, error = %e, "revalidating cached suggestion failed");
                false
            }
        }
    }

    async fn position_free(&self, yard: &str, position: &Position, spec: &ContainerSpec) -> DomainResult<bool> {
        let Some(yard) = self.store.resolve_yard(yard).await? else {
            return Ok(false);
        };
        let Some(block) = self.store.resolve_block(yard.id, &position.block).await? else {
            return Ok(false);
        };
        let occupied = self.store.is_occupied(block.id, position.cell(), spec.size).await?;
        Ok(!occupied)
    }
}

#[async_trait]
impl<P, S> PlacementService for CachedPlacementService<P, S>
where
    P: PlacementService + ?Sized + 'static,
    S: PositionStore + ?Sized + 'static,
{
    async fn suggest(&self, request: &SuggestionRequest) -> DomainResult<Position> {
        let spec = request.spec()?;
        let key = suggestion_key(&request.yard, &spec);

        if let Some(position) = self.read_json::<Position>(&key).await {
            if self.still_free(&request.yard, &position, &spec).await {
                debug!(key = %key, position = %position, "suggestion cache hit");
                return Ok(position);
            }
            debug!(key = %key, position = %position, "cached suggestion is stale");
            self.evict(&key).await;
        }

        let position = self.inner.suggest(request).await?;
        self.write_json(&key, &position, self.config.suggestion_ttl()).await;
        Ok(position)
    }

    async fn place(&self, request: &PlacementRequest) -> DomainResult<ContainerRecord> {
        let record = self.inner.place(request).await?;

        self.invalidate_yard(&request.yard).await;
        let location = ContainerLocation {
            yard: request.yard.clone(),
            block: request.block.clone(),
            slot: record.slot,
            row: record.row,
            tier: record.tier,
        };
        self.write_json(&location_key(&record.number), &location, self.config.location_ttl())
            .await;

        Ok(record)
    }

    async fn pickup(&self, request: &PickupRequest) -> DomainResult<ContainerRecord> {
        let record = self.inner.pickup(request).await?;

        self.invalidate_yard(&request.yard).await;
        self.evict(&location_key(&record.number)).await;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ContainerHeight, ContainerSize, ContainerType};

    #[test]
    fn test_key_formats() {
        let spec = ContainerSpec::new(ContainerSize::Forty, ContainerHeight::HighCube, ContainerType::Reefer);
        assert_eq!(suggestion_key("YRD1", &spec), "suggestion:YRD1:40:9.6:REEFER");
        assert_eq!(suggestion_key("YRD1", &ContainerSpec::reference()), "suggestion:YRD1:20:8.6:DRY");
        assert!(suggestion_key("YRD1", &spec).starts_with(&suggestion_prefix("YRD1")));
        assert_eq!(location_key("ALFI000001"), "container:ALFI000001");
    }

    #[test]
    fn test_prefix_does_not_cover_longer_yard_codes() {
        let key = suggestion_key("YRD10", &ContainerSpec::reference());
        assert!(!key.starts_with(&suggestion_prefix("YRD1")));
    }
}
