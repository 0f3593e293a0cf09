//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use storefront::carts::{abandoned_cutoff, cart_total};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemUuid, CartRecord},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        coupons::repository::PgCouponsRepository,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    coupons_repository: PgCouponsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            coupons_repository: PgCouponsRepository::new(),
        }
    }

    /// Recompute the cart total from its items and drop any applied discount.
    async fn refresh_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &CartRecord,
    ) -> Result<CartRecord, CartsServiceError> {
        let items = self.items_repository.get_cart_items(tx, cart.uuid).await?;
        let total = cart_total(&items)?;

        let mut refreshed = self
            .carts_repository
            .update_totals(tx, cart.uuid, total, None)
            .await?;

        refreshed.items = items;

        Ok(refreshed)
    }

    async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        self.carts_repository
            .lock_cart_by_user(tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .get_cart_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            product_uuid = %item.product_uuid,
            cart_uuid = tracing::field::Empty,
            total_cart_price = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let price = self
            .items_repository
            .get_product_price(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let cart = self.carts_repository.ensure_cart(&mut tx, user).await?;

        self.items_repository
            .upsert_cart_item(&mut tx, cart.uuid, item, price)
            .await?;

        let cart = self.refresh_totals(&mut tx, &cart).await?;

        tx.commit().await?;

        let span = Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));
        span.record("total_cart_price", cart.total_cart_price);

        Ok(cart)
    }

    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.lock_cart(&mut tx, user).await?;

        self.items_repository
            .update_item_quantity(&mut tx, cart.uuid, item, quantity)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        let cart = self.refresh_totals(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.lock_cart(&mut tx, user).await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound);
        }

        let cart = self.refresh_totals(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .carts_repository
            .delete_cart_by_user(&mut tx, user)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.apply_coupon",
        skip(self, code),
        fields(
            user_uuid = %user,
            total_price_after_discount = tracing::field::Empty
        ),
        err
    )]
    async fn apply_coupon(
        &self,
        user: UserUuid,
        code: &str,
        now: Timestamp,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupon = self
            .coupons_repository
            .find_redeemable(&mut tx, code, now)
            .await?
            .ok_or(CartsServiceError::CouponInvalid)?;

        let cart = self.lock_cart(&mut tx, user).await?;

        let discounted = coupon.discount.apply(cart.total_cart_price)?;

        let mut cart = self
            .carts_repository
            .update_totals(&mut tx, cart.uuid, cart.total_cart_price, Some(discounted))
            .await?;

        cart.items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        Span::current().record("total_price_after_discount", discounted);

        Ok(cart)
    }

    async fn purge_abandoned_carts(&self, now: Timestamp) -> Result<u64, CartsServiceError> {
        let cutoff = abandoned_cutoff(now)?;

        let mut tx = self.db.begin().await?;

        let purged = self
            .carts_repository
            .purge_created_before(&mut tx, cutoff)
            .await?;

        tx.commit().await?;

        if purged > 0 {
            info!(purged, %cutoff, "purged abandoned carts");
        }

        Ok(purged)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with its items.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add an item, creating the cart on first use. Adding a product and
    /// color already in the cart increases that line's quantity.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Set the quantity of one cart line.
    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove one cart line.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Delete the user's cart entirely.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;

    /// Apply a coupon code to the cart total.
    ///
    /// Unknown and expired codes fail with the same
    /// [`CartsServiceError::CouponInvalid`].
    async fn apply_coupon(
        &self,
        user: UserUuid,
        code: &str,
        now: Timestamp,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Delete carts created before the retention window, returning how many
    /// were removed.
    async fn purge_abandoned_carts(&self, now: Timestamp) -> Result<u64, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::{
        domain::products::records::ProductUuid,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn get_cart_without_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;

        let result = ctx.carts.get_cart(user.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_creates_cart_and_merges_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;
        let lamp = helpers::create_product(&ctx, "Lamp", 1_500, 10).await?;

        ctx.carts
            .add_item(user.uuid, NewCartItem::single(lamp.uuid))
            .await?;

        let cart = ctx
            .carts
            .add_item(
                user.uuid,
                NewCartItem {
                    product_uuid: lamp.uuid,
                    color: None,
                    quantity: 2,
                },
            )
            .await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|item| item.quantity), Some(3));
        assert_eq!(cart.total_cart_price, 4_500);

        let red = ctx
            .carts
            .add_item(
                user.uuid,
                NewCartItem {
                    product_uuid: lamp.uuid,
                    color: Some("red".to_string()),
                    quantity: 1,
                },
            )
            .await?;

        assert_eq!(red.items.len(), 2, "a new color is a separate line");
        assert_eq!(red.total_cart_price, 6_000);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_keeps_price_captured_at_first_add() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;
        let lamp = helpers::create_product(&ctx, "Lamp", 1_000, 10).await?;

        ctx.carts
            .add_item(user.uuid, NewCartItem::single(lamp.uuid))
            .await?;

        helpers::set_product_price(&ctx, lamp.uuid, 2_000).await?;

        let cart = ctx
            .carts
            .add_item(user.uuid, NewCartItem::single(lamp.uuid))
            .await?;

        assert_eq!(cart.total_cart_price, 2_000);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_unknown_product_and_zero_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;
        let lamp = helpers::create_product(&ctx, "Lamp", 1_000, 10).await?;

        let unknown = ctx
            .carts
            .add_item(
                user.uuid,
                NewCartItem::single(ProductUuid::new()),
            )
            .await;

        assert!(
            matches!(unknown, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {unknown:?}"
        );

        let zero = ctx
            .carts
            .add_item(
                user.uuid,
                NewCartItem {
                    product_uuid: lamp.uuid,
                    color: None,
                    quantity: 0,
                },
            )
            .await;

        assert!(
            matches!(zero, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {zero:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn coupon_discount_is_cleared_by_item_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;
        let lamp = helpers::create_product(&ctx, "Lamp", 1_999, 10).await?;
        helpers::create_coupon(&ctx, "TEN", 10, SignedDuration::from_hours(1)).await?;

        let cart = ctx
            .carts
            .add_item(user.uuid, NewCartItem::single(lamp.uuid))
            .await?;

        let discounted = ctx
            .carts
            .apply_coupon(user.uuid, "TEN", Timestamp::now())
            .await?;

        assert_eq!(discounted.total_cart_price, 1_999);
        assert_eq!(discounted.total_price_after_discount, Some(1_799));

        let item = cart
            .items
            .first()
            .map(|item| item.uuid)
            .ok_or(CartsServiceError::ItemNotFound)?;

        let updated = ctx.carts.update_item_quantity(user.uuid, item, 2).await?;

        assert_eq!(updated.total_cart_price, 3_998);
        assert_eq!(updated.total_price_after_discount, None);

        Ok(())
    }

    #[tokio::test]
    async fn expired_and_unknown_coupons_fail_identically() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;
        let lamp = helpers::create_product(&ctx, "Lamp", 1_000, 10).await?;
        helpers::create_coupon(&ctx, "TEN", 10, SignedDuration::from_hours(1)).await?;
        helpers::create_coupon(&ctx, "OLD", 50, SignedDuration::from_hours(-1)).await?;

        ctx.carts
            .add_item(user.uuid, NewCartItem::single(lamp.uuid))
            .await?;

        let discounted = ctx
            .carts
            .apply_coupon(user.uuid, "TEN", Timestamp::now())
            .await?;

        assert_eq!(discounted.total_price_after_discount, Some(900));

        for code in ["OLD", "NEVER"] {
            let result = ctx.carts.apply_coupon(user.uuid, code, Timestamp::now()).await;

            assert!(
                matches!(result, Err(CartsServiceError::CouponInvalid)),
                "expected CouponInvalid for {code}, got {result:?}"
            );
        }

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.total_cart_price, 1_000);
        assert_eq!(
            cart.total_price_after_discount,
            Some(900),
            "a rejected code keeps the discount already applied"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_and_clear() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;
        let lamp = helpers::create_product(&ctx, "Lamp", 1_000, 10).await?;

        let cart = ctx
            .carts
            .add_item(user.uuid, NewCartItem::single(lamp.uuid))
            .await?;

        let item = cart
            .items
            .first()
            .map(|item| item.uuid)
            .ok_or(CartsServiceError::ItemNotFound)?;

        let emptied = ctx.carts.remove_item(user.uuid, item).await?;

        assert!(emptied.items.is_empty());
        assert_eq!(emptied.total_cart_price, 0);

        let missing = ctx.carts.remove_item(user.uuid, item).await;

        assert!(
            matches!(missing, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {missing:?}"
        );

        ctx.carts.clear_cart(user.uuid).await?;

        let cleared = ctx.carts.clear_cart(user.uuid).await;

        assert!(
            matches!(cleared, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {cleared:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn purge_removes_only_carts_past_retention() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "shopper@example.com").await?;
        let lamp = helpers::create_product(&ctx, "Lamp", 1_000, 10).await?;

        ctx.carts
            .add_item(user.uuid, NewCartItem::single(lamp.uuid))
            .await?;

        assert_eq!(ctx.carts.purge_abandoned_carts(Timestamp::now()).await?, 0);

        let later = Timestamp::now().checked_add(SignedDuration::from_hours(8 * 24))?;

        assert_eq!(ctx.carts.purge_abandoned_carts(later).await?, 1);

        Ok(())
    }
}
