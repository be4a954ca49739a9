//! Single-slot collection cache with single-flight population.

mod collection_cache;

pub use collection_cache::CollectionCache;
