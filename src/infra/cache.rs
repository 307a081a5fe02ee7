//! Host-owned cache of compiled profiles.
//!
//! The engine never caches anything itself. Hosts that resolve profiles by id keep
//! one of these and hand out shared [`Enhancer`]s.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use crate::core::{
    engine::Enhancer,
    profile::{Profile, ProfileError},
};

/// Default number of compiled profiles kept.
const DEFAULT_CAPACITY: u64 = 64;

/// Concurrent, bounded map from profile id to compiled enhancer.
#[derive(Clone)]
pub struct ProfileCache
{
    inner: Cache<String, Arc<Enhancer>>,
}

impl Default for ProfileCache
{
    fn default() -> Self
    {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ProfileCache
{
    pub fn new(capacity: u64) -> Self
    {
        Self { inner: Cache::new(capacity) }
    }

    /// Return the compiled profile for `id`, loading and compiling it on a miss.
    ///
    /// Concurrent misses for the same id run `load` once. Failures are not cached.
    pub fn get_or_load<F>(
        &self,
        id: &str,
        load: F,
    ) -> Result<Arc<Enhancer>, Arc<ProfileError>>
    where
        F: FnOnce() -> Result<Profile, ProfileError>,
    {
        self.inner
            .try_get_with(id.to_string(), || {
                debug!(profile = id, "compiling profile");
                load().and_then(Enhancer::new).map(Arc::new)
            })
    }

    /// Cached entry for `id`, if any.
    pub fn get(
        &self,
        id: &str,
    ) -> Option<Arc<Enhancer>>
    {
        self.inner
            .get(id)
    }

    /// Drop `id` so the next lookup reloads it.
    pub fn invalidate(
        &self,
        id: &str,
    )
    {
        self.inner
            .invalidate(id);
    }

    pub fn contains(
        &self,
        id: &str,
    ) -> bool
    {
        self.inner
            .contains_key(id)
    }
}
