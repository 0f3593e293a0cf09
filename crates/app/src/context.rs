//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        coupons::{CouponsService, PgCouponsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        shipping::{PgShippingService, ShippingService},
        users::{PgUsersService, UsersService},
    },
    uploads::{ImageUploader, LocalImageStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Settings the services need beyond a database connection.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Upper bound on pooled database connections.
    pub max_connections: u32,

    /// Shipping price used while the registry holds no value.
    pub default_shipping_price: u64,

    /// Directory uploaded images are written to.
    pub uploads_dir: PathBuf,

    /// Public URL the uploads directory is served from.
    pub uploads_base_url: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub users: Arc<dyn UsersService>,
    pub carts: Arc<dyn CartsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub shipping: Arc<dyn ShippingService>,
    pub auth: Arc<dyn AuthService>,
    pub uploads: Arc<dyn ImageUploader>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, options: AppOptions) -> Result<Self, AppInitError> {
        let pool = database::connect_pool(url, options.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db.clone(),
                options.default_shipping_price,
            )),
            shipping: Arc::new(PgShippingService::new(
                db.clone(),
                options.default_shipping_price,
            )),
            auth: Arc::new(PgAuthService::new(db)),
            uploads: Arc::new(LocalImageStore::new(
                options.uploads_dir,
                &options.uploads_base_url,
            )),
        })
    }
}
