//! Core driver-resolution registry.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::{BoxError, ResolveError};
use crate::host::RegistryHost;

/// Built-in driver factory, fixed at construction time.
///
/// Receives the host, the mapping name being resolved, and the mapping's
/// configuration.
pub type DriverFactory<H> = Box<
    dyn Fn(
            &H,
            &str,
            Option<<H as RegistryHost>::Config>,
        ) -> Result<<H as RegistryHost>::Driver, BoxError>
        + Send
        + Sync,
>;

/// Extension callback registered at runtime via
/// [`DriverRegistry::register`].
///
/// Receives the registry's context value instead of the host, so third
/// parties can construct drivers without access to host internals.
pub type ExtendCallback<H> = Arc<
    dyn Fn(
            &<H as RegistryHost>::Context,
            &str,
            Option<<H as RegistryHost>::Config>,
        ) -> Result<<H as RegistryHost>::Driver, BoxError>
        + Send
        + Sync,
>;

/// Registry resolving named mappings to driver instances.
///
/// Resolution order for a mapping name:
///
/// 1. the instance cache, when the host enables caching;
/// 2. the extension table (runtime-registered driver types);
/// 3. the built-in factory table declared through [`RegistryBuilder`].
///
/// A driver type with no entry in either table fails with
/// [`ResolveError::UnsupportedDriver`]. Extension registrations shadow
/// built-in entries for the same driver-type string.
///
/// Both tables and the cache are scoped to one registry instance; nothing is
/// shared process-wide. Per-entry locking only: two threads racing on the
/// first resolution of a mapping may both run the factory, last write wins.
pub struct DriverRegistry<H: RegistryHost> {
    host: H,
    context: H::Context,
    drivers: HashMap<String, DriverFactory<H>>,
    extensions: DashMap<String, ExtendCallback<H>>,
    cache: DashMap<String, H::Resolved>,
}

impl<H: RegistryHost> DriverRegistry<H> {
    /// Create a registry with no built-in drivers.
    pub fn new(host: H, context: H::Context) -> Self {
        Self::builder(host, context).build()
    }

    /// Start building a registry, declaring built-in drivers up front.
    pub fn builder(host: H, context: H::Context) -> RegistryBuilder<H> {
        RegistryBuilder {
            host,
            context,
            drivers: HashMap::new(),
        }
    }

    /// The host supplying resolution policy.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The context value forwarded to extension callbacks.
    pub fn context(&self) -> &H::Context {
        &self.context
    }

    /// Resolve the default mapping, as named by the host.
    pub fn resolve_default(&self) -> Result<H::Resolved, ResolveError> {
        let mapping = self.host.default_mapping();
        self.resolve(&mapping)
    }

    /// Resolve a mapping name to a driver instance.
    ///
    /// Serves from the cache when the host enables caching; otherwise
    /// constructs the driver, wraps it through
    /// [`RegistryHost::wrap`], caches it (if enabled) and returns it.
    /// A failed resolution never populates the cache.
    pub fn resolve(&self, mapping: &str) -> Result<H::Resolved, ResolveError> {
        // Read the caching flag once so the cache check and the cache store
        // agree within a single resolution.
        let cache_resolved = self.host.cache_resolved();
        if cache_resolved {
            if let Some(hit) = self.cache.get(mapping) {
                debug!(mapping, "serving driver from cache");
                return Ok(hit.clone());
            }
        }

        let driver_type =
            self.host
                .mapping_driver_type(mapping)
                .ok_or_else(|| ResolveError::Configuration {
                    mapping: mapping.to_string(),
                })?;
        let config = self.host.mapping_config(mapping);

        // Clone the callback out of the map so no shard lock is held while
        // running host code.
        let extension = self.extensions.get(&driver_type).map(|cb| cb.clone());

        let raw = match extension {
            Some(callback) => {
                debug!(mapping, driver_type = %driver_type, "constructing driver via extension");
                callback(&self.context, mapping, config)
            }
            None => match self.drivers.get(&driver_type) {
                Some(factory) => {
                    debug!(mapping, driver_type = %driver_type, "constructing built-in driver");
                    factory(&self.host, mapping, config)
                }
                None => {
                    return Err(ResolveError::UnsupportedDriver {
                        driver_type,
                        host: std::any::type_name::<H>(),
                    });
                }
            },
        }
        .map_err(|source| ResolveError::Factory {
            driver_type,
            source,
        })?;

        let resolved = self.host.wrap(mapping, raw);
        if cache_resolved {
            self.cache.insert(mapping.to_string(), resolved.clone());
        }
        Ok(resolved)
    }

    /// Evict the cache entry for a mapping name, if any.
    ///
    /// Purely a cache primitive: the extension table is untouched and the
    /// released value is not disposed. No-op for names never resolved.
    pub fn release(&self, mapping: &str) {
        if self.cache.remove(mapping).is_some() {
            debug!(mapping, "released cached driver");
        }
    }

    /// Register an extension callback for a driver type.
    ///
    /// Inserts or overwrites the entry. An extension shadows a built-in
    /// factory declared for the same driver type.
    pub fn register<F>(&self, driver_type: impl Into<String>, callback: F)
    where
        F: Fn(&H::Context, &str, Option<H::Config>) -> Result<H::Driver, BoxError>
            + Send
            + Sync
            + 'static,
    {
        let driver_type = driver_type.into();
        debug!(driver_type = %driver_type, "registered extension driver");
        self.extensions.insert(driver_type, Arc::new(callback));
    }

    /// Whether either table can serve a driver type.
    pub fn supports(&self, driver_type: &str) -> bool {
        self.extensions.contains_key(driver_type) || self.drivers.contains_key(driver_type)
    }

    /// Whether a resolved value is currently cached for a mapping name.
    pub fn is_cached(&self, mapping: &str) -> bool {
        self.cache.contains_key(mapping)
    }
}

/// Builder declaring the built-in driver table for a [`DriverRegistry`].
pub struct RegistryBuilder<H: RegistryHost> {
    host: H,
    context: H::Context,
    drivers: HashMap<String, DriverFactory<H>>,
}

impl<H: RegistryHost> RegistryBuilder<H> {
    /// Declare a built-in factory for a driver type. Declaring the same
    /// type again replaces the earlier factory.
    pub fn driver<F>(mut self, driver_type: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&H, &str, Option<H::Config>) -> Result<H::Driver, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.drivers.insert(driver_type.into(), Box::new(factory));
        self
    }

    /// Finish building the registry. Cache and extension table start empty.
    pub fn build(self) -> DriverRegistry<H> {
        DriverRegistry {
            host: self.host,
            context: self.context,
            drivers: self.drivers,
            extensions: DashMap::new(),
            cache: DashMap::new(),
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
