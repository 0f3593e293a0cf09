//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    store::StoreConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod store;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Shipping, uploads and cart housekeeping settings.
    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn store_settings_have_defaults() -> TestResult {
        let config =
            ServerConfig::try_parse_from(["storefront-json", "--database-url", "postgres://db"])?;

        assert_eq!(config.store.default_shipping_price, 0);
        assert_eq!(config.store.cart_purge_interval_seconds, 3_600);
        assert_eq!(config.store.uploads_dir.to_str(), Some("uploads"));
        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.server.shutdown_grace_seconds, 30);
        assert_eq!(config.database.database_max_connections, 10);

        Ok(())
    }

    #[test]
    fn store_settings_can_be_overridden() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://db",
            "--default-shipping-price",
            "1500",
            "--uploads-base-url",
            "https://cdn.example.com/uploads",
        ])?;

        assert_eq!(config.store.default_shipping_price, 1_500);
        assert_eq!(
            config.store.uploads_base_url,
            "https://cdn.example.com/uploads"
        );

        Ok(())
    }
}
