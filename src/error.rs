//! Resolution errors.

use thiserror::Error;

/// Boxed error type returned by driver factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by [`DriverRegistry::resolve`](crate::DriverRegistry::resolve).
///
/// All variants indicate a configuration or programming defect; none are
/// transient. A failed resolution never populates the cache.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The host has no driver type configured for the mapping.
    #[error("no driver type configured for mapping `{mapping}`")]
    Configuration { mapping: String },

    /// The driver type matches neither a registered extension nor a
    /// built-in factory.
    #[error("driver type `{driver_type}` is not supported by `{host}`")]
    UnsupportedDriver {
        driver_type: String,
        host: &'static str,
    },

    /// A driver factory returned an error.
    #[error("factory for driver type `{driver_type}` failed: {source}")]
    Factory {
        driver_type: String,
        #[source]
        source: BoxError,
    },
}
