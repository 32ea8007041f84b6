//! Mail service built on the driver registry.
//!
//! One built-in transport (`smtp`) is declared at construction time; a
//! third-party transport (`mailchimp`) is registered at runtime. Mapping
//! policy comes from a JSON config block.
//!
//! Run with `RUST_LOG=debug cargo run --example mail` to see the registry's
//! resolution logging.

use std::error::Error;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use driver_registry::{BoxError, DriverRegistry, RegistryHost};

trait MailTransport: Send + Sync {
    fn send(&self, to: &str, body: &str);
}

#[derive(Debug, Deserialize)]
struct SmtpConfig {
    host: String,
    port: u16,
}

struct SmtpTransport {
    config: SmtpConfig,
}

impl MailTransport for SmtpTransport {
    fn send(&self, to: &str, body: &str) {
        println!(
            "[smtp {}:{}] to={to} body={body:?}",
            self.config.host, self.config.port
        );
    }
}

struct MailchimpTransport {
    api_key: String,
}

impl MailTransport for MailchimpTransport {
    fn send(&self, to: &str, body: &str) {
        println!(
            "[mailchimp key=***{}] to={to} body={body:?}",
            self.api_key.len()
        );
    }
}

/// Host reading mapping policy from a config block shaped like:
///
/// ```json
/// {
///   "default": "transactional",
///   "mailers": {
///     "transactional": { "driver": "smtp", "host": "...", "port": 2525 },
///     "campaigns": { "driver": "mailchimp", "api_key": "..." }
///   }
/// }
/// ```
struct MailService {
    config: Value,
}

impl RegistryHost for MailService {
    type Context = ();
    type Driver = Arc<dyn MailTransport>;
    type Resolved = Arc<dyn MailTransport>;
    type Config = Value;

    fn default_mapping(&self) -> String {
        self.config["default"]
            .as_str()
            .unwrap_or("transactional")
            .to_string()
    }

    fn mapping_config(&self, mapping: &str) -> Option<Value> {
        self.config["mailers"].get(mapping).cloned()
    }

    fn mapping_driver_type(&self, mapping: &str) -> Option<String> {
        self.config["mailers"][mapping]["driver"]
            .as_str()
            .map(str::to_string)
    }

    fn cache_resolved(&self) -> bool {
        true
    }

    fn wrap(&self, _mapping: &str, driver: Arc<dyn MailTransport>) -> Arc<dyn MailTransport> {
        driver
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let service = MailService {
        config: json!({
            "default": "transactional",
            "mailers": {
                "transactional": { "driver": "smtp", "host": "smtp.example.com", "port": 2525 },
                "campaigns": { "driver": "mailchimp", "api_key": "mc-test-key" }
            }
        }),
    };

    let registry = DriverRegistry::builder(service, ())
        .driver("smtp", |_host, mapping, config| {
            let config = config.ok_or_else(|| {
                BoxError::from(format!("missing config for mapping `{mapping}`"))
            })?;
            let config: SmtpConfig = serde_json::from_value(config)?;
            Ok(Arc::new(SmtpTransport { config }) as Arc<dyn MailTransport>)
        })
        .build();

    // Third-party transport added at runtime.
    registry.register("mailchimp", |_context, _mapping, config| {
        let api_key = config
            .as_ref()
            .and_then(|c| c["api_key"].as_str())
            .unwrap_or_default()
            .to_string();
        Ok(Arc::new(MailchimpTransport { api_key }) as Arc<dyn MailTransport>)
    });

    let transactional = registry.resolve_default()?;
    transactional.send("ops@example.com", "password reset");

    // Cache hit: same instance.
    let again = registry.resolve("transactional")?;
    assert!(Arc::ptr_eq(&transactional, &again));

    let campaigns = registry.resolve("campaigns")?;
    campaigns.send("list@example.com", "august newsletter");

    // Release evicts the cache entry; the next resolve builds fresh.
    registry.release("transactional");
    let fresh = registry.resolve("transactional")?;
    assert!(!Arc::ptr_eq(&transactional, &fresh));

    Ok(())
}
