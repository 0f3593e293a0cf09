//! Store Config

use std::path::PathBuf;

use clap::Args;

/// Shipping, uploads and cart housekeeping settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Shipping price, in minor units, used until one is set through the API
    #[arg(long, env = "DEFAULT_SHIPPING_PRICE", default_value_t = 0_u64)]
    pub default_shipping_price: u64,

    /// Directory uploaded images are written to
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Public URL the uploads directory is served from
    #[arg(
        long,
        env = "UPLOADS_BASE_URL",
        default_value = "http://localhost:8698/uploads"
    )]
    pub uploads_base_url: String,

    /// Seconds between abandoned cart sweeps
    #[arg(long, env = "CART_PURGE_INTERVAL_SECONDS", default_value_t = 3_600_u64)]
    pub cart_purge_interval_seconds: u64,
}
