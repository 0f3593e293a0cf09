//! Shipping price service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::shipping::{errors::ShippingServiceError, repository::PgShippingRepository},
};

#[derive(Debug, Clone)]
pub struct PgShippingService {
    db: Db,
    repository: PgShippingRepository,
    default_price: u64,
}

impl PgShippingService {
    /// `default_price` is reported until an admin stores a price.
    #[must_use]
    pub fn new(db: Db, default_price: u64) -> Self {
        Self {
            db,
            repository: PgShippingRepository::new(),
            default_price,
        }
    }
}

#[async_trait]
impl ShippingService for PgShippingService {
    async fn get_shipping_price(&self) -> Result<u64, ShippingServiceError> {
        let mut tx = self.db.begin().await?;

        let price = self.repository.get_shipping_price(&mut tx).await?;

        tx.commit().await?;

        Ok(price.unwrap_or(self.default_price))
    }

    async fn set_shipping_price(&self, price: i64) -> Result<u64, ShippingServiceError> {
        let price = u64::try_from(price)?;

        let mut tx = self.db.begin().await?;

        let stored = self.repository.set_shipping_price(&mut tx, price).await?;

        tx.commit().await?;

        info!(shipping_price = stored, "updated shipping price");

        Ok(stored)
    }
}

#[automock]
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// The current shipping price.
    async fn get_shipping_price(&self) -> Result<u64, ShippingServiceError>;

    /// Replace the shipping price. Negative prices are rejected.
    async fn set_shipping_price(&self, price: i64) -> Result<u64, ShippingServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn falls_back_to_default_until_set() -> TestResult {
        let ctx = TestContext::new().await;

        assert_eq!(ctx.shipping.get_shipping_price().await?, 0);

        assert_eq!(ctx.shipping.set_shipping_price(1_250).await?, 1_250);
        assert_eq!(ctx.shipping.set_shipping_price(900).await?, 900);
        assert_eq!(ctx.shipping.get_shipping_price().await?, 900);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shipping_prices")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(rows, 1, "registry holds a single row");

        Ok(())
    }

    #[tokio::test]
    async fn configured_default_is_used_when_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let service = PgShippingService::new(ctx.app_db(), 500);

        assert_eq!(service.get_shipping_price().await?, 500);

        Ok(())
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.shipping.set_shipping_price(-1).await;

        assert!(
            matches!(result, Err(ShippingServiceError::InvalidPrice(_))),
            "expected InvalidPrice, got {result:?}"
        );
    }
}
