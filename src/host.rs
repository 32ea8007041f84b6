//! Host policy trait consumed by the registry.

/// Policy hooks a host must supply to drive resolution.
///
/// The registry owns the lookup algorithm and the caching; the host owns
/// everything domain-specific: which mapping is the default, what
/// configuration a mapping carries, and which driver type backs it.
///
/// Hosts that do not post-process driver values set `Resolved = Driver` and
/// implement [`wrap`](RegistryHost::wrap) as the identity.
pub trait RegistryHost: Sized {
    /// Opaque value forwarded verbatim to extension callbacks, typically an
    /// application container. The registry never inspects it.
    type Context;

    /// Raw value produced by driver factories.
    type Driver;

    /// Value handed back to callers and stored in the cache. `Clone` is what
    /// lets a cache hit share the resolved value; hosts use [`Arc`] when
    /// identity sharing matters.
    ///
    /// [`Arc`]: std::sync::Arc
    type Resolved: Clone;

    /// Per-mapping configuration payload forwarded to factories.
    type Config;

    /// Mapping name used when resolution is requested without an explicit
    /// name. Must itself be resolvable via
    /// [`mapping_driver_type`](RegistryHost::mapping_driver_type).
    fn default_mapping(&self) -> String;

    /// Configuration for a mapping. `None` is valid and is forwarded to the
    /// factory as-is.
    fn mapping_config(&self, mapping: &str) -> Option<Self::Config>;

    /// Driver type backing a mapping. `None` signals a misconfigured
    /// mapping and fails resolution with
    /// [`ResolveError::Configuration`](crate::ResolveError::Configuration).
    fn mapping_driver_type(&self, mapping: &str) -> Option<String>;

    /// Whether resolved values are memoized per mapping name.
    fn cache_resolved(&self) -> bool;

    /// Post-processes a freshly constructed driver before it is cached and
    /// returned. Applies uniformly to built-in and extension drivers.
    fn wrap(&self, mapping: &str, driver: Self::Driver) -> Self::Resolved;
}
