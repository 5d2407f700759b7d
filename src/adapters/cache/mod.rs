//! In-memory cache adapters.
//!
//! `MokaCacheStore` is the default backend behind the cache-aside placement
//! layer.

pub mod moka_store;

pub use moka_store::MokaCacheStore;
