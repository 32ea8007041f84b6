//! # Driver Registry
//!
//! Lazily-resolved driver registry: a host exposes interchangeable named
//! implementations ("drivers") behind one access method, the registry
//! resolves them on demand, optionally memoizes them, and lets third
//! parties register new driver types at runtime.
//!
//! ## Components
//!
//! - [`DriverRegistry`] - The resolution core: cache, extension table and
//!   built-in factory table
//! - [`RegistryHost`] - Policy hooks the host implements (default mapping,
//!   per-mapping config, per-mapping driver type, caching, wrapping)
//! - [`RegistryBuilder`] - Declares built-in driver factories at
//!   construction time
//! - [`ResolveError`] - Deterministic resolution failures
//!
//! ## Example
//!
//! A mapping name (`"transactional"`) is a logical slot; a driver type
//! (`"smtp"`) names the implementation family backing it. The host decides
//! which type serves which name:
//!
//! ```
//! use std::sync::Arc;
//! use driver_registry::{DriverRegistry, RegistryHost};
//!
//! struct Service;
//!
//! impl RegistryHost for Service {
//!     type Context = ();
//!     type Driver = Arc<str>;
//!     type Resolved = Arc<str>;
//!     type Config = ();
//!
//!     fn default_mapping(&self) -> String {
//!         "transactional".to_string()
//!     }
//!     fn mapping_config(&self, _mapping: &str) -> Option<()> {
//!         None
//!     }
//!     fn mapping_driver_type(&self, _mapping: &str) -> Option<String> {
//!         Some("smtp".to_string())
//!     }
//!     fn cache_resolved(&self) -> bool {
//!         true
//!     }
//!     fn wrap(&self, _mapping: &str, driver: Arc<str>) -> Arc<str> {
//!         driver
//!     }
//! }
//!
//! let registry = DriverRegistry::builder(Service, ())
//!     .driver("smtp", |_host, _mapping, _config| Ok(Arc::from("smtp driver")))
//!     .build();
//!
//! let driver = registry.resolve_default()?;
//! assert_eq!(&*driver, "smtp driver");
//! # Ok::<(), driver_registry::ResolveError>(())
//! ```

pub mod error;
pub mod host;
pub mod registry;

pub use error::{BoxError, ResolveError};
pub use host::RegistryHost;
pub use registry::{DriverFactory, DriverRegistry, ExtendCallback, RegistryBuilder};
