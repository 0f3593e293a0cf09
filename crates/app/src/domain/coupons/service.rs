//! Coupons service.

use async_trait::async_trait;
use mockall::automock;
use storefront::listing::ListingQuery;

use crate::{
    database::Db,
    domain::coupons::{
        data::{CouponUpdate, NewCoupon},
        errors::CouponsServiceError,
        records::{CouponRecord, CouponUuid},
        repository::PgCouponsRepository,
    },
    listing::Page,
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn list_coupons(
        &self,
        listing: ListingQuery,
    ) -> Result<Page<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let page = self.repository.list_coupons(&mut tx, &listing).await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupon = self.repository.get_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        Ok(coupon)
    }

    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_coupon(
        &self,
        coupon: CouponUuid,
        update: CouponUpdate,
    ) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_coupon(&mut tx, coupon, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_coupon(&mut tx, coupon).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Retrieve one page of coupons.
    async fn list_coupons(
        &self,
        listing: ListingQuery,
    ) -> Result<Page<CouponRecord>, CouponsServiceError>;

    /// Retrieve a single coupon.
    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError>;

    /// Create a coupon. Names are unique.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Update the given fields of a coupon.
    async fn update_coupon(
        &self,
        coupon: CouponUuid,
        update: CouponUpdate,
    ) -> Result<CouponRecord, CouponsServiceError>;

    /// Delete a coupon.
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError>;
}
