//! compiler.rs - Builds and caches variant indexes.
//!
//! Building an index generates every variant and compiles the automaton, so
//! the result is kept in a process-wide cache keyed by the catalog
//! fingerprint. Repeated construction from the same catalog is free.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::CatalogConfig;
use crate::errors::LexcleanError;
use crate::index::VariantIndex;

lazy_static! {
    /// A thread-safe, global cache of built indexes.
    /// The key is the catalog fingerprint.
    static ref INDEX_CACHE: RwLock<HashMap<String, Arc<VariantIndex>>> = RwLock::new(HashMap::new());
}

/// Gets a `VariantIndex` from the cache or builds it if not found.
///
/// Returns an `Arc` so scanners on many threads can share one index.
pub fn get_or_build_index(config: &CatalogConfig) -> Result<Arc<VariantIndex>, LexcleanError> {
    let cache_key = config.fingerprint()?;

    {
        let cache = INDEX_CACHE
            .read()
            .map_err(|_| LexcleanError::Fatal("variant index cache lock poisoned".to_string()))?;
        if let Some(index) = cache.get(&cache_key) {
            debug!("Serving variant index from cache for key: {}", &cache_key[..12]);
            return Ok(Arc::clone(index));
        }
    }

    debug!("Variant index not found in cache. Building now.");
    let index = Arc::new(VariantIndex::build(config)?);

    let mut cache = INDEX_CACHE
        .write()
        .map_err(|_| LexcleanError::Fatal("variant index cache lock poisoned".to_string()))?;
    // Another thread may have built the same catalog meanwhile; keep the first.
    let cached = cache.entry(cache_key).or_insert_with(|| Arc::clone(&index));
    debug!("Cached variant index with digest {}.", &cached.digest()[..12]);
    Ok(Arc::clone(cached))
}
