//! Orders service.

use std::slice;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::{
    listing::ListingQuery,
    orders::{CheckoutStage, DeletionDenied, PaymentStatus, authorize_deletion},
    pricing::{OrderTotals, reprice_shipping, subtotal},
    stock::{StockError, aggregate_demand},
    users::Requester,
};
use tracing::{Span, error, info};

use crate::{
    database::Db,
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        inventory::{InventoryError, PgInventoryReconciler},
        orders::{
            data::{Checkout, NewOrderLine, OrderScope, OrderSource},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{NewOrder, NewOrderItem, PgOrderItemsRepository, PgOrdersRepository},
        },
        shipping::repository::PgShippingRepository,
    },
    listing::Page,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    carts: PgCartsRepository,
    cart_items: PgCartItemsRepository,
    shipping: PgShippingRepository,
    inventory: PgInventoryReconciler,
    default_shipping_price: u64,
}

impl PgOrdersService {
    /// `default_shipping_price` applies when neither the checkout nor the
    /// shipping registry supplies a price.
    #[must_use]
    pub fn new(db: Db, default_shipping_price: u64) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            carts: PgCartsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
            shipping: PgShippingRepository::new(),
            inventory: PgInventoryReconciler::new(),
            default_shipping_price,
        }
    }
}

fn record_stage(span: &Span, stage: CheckoutStage) {
    span.record("stage", tracing::field::display(stage));
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.checkout",
        skip(self, checkout),
        fields(
            order_uuid = %checkout.uuid,
            user_uuid = %checkout.user,
            stage = tracing::field::Empty,
            line_count = tracing::field::Empty,
            total_order_price = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(
        &self,
        checkout: Checkout,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let Checkout {
            uuid,
            user,
            source,
            shipping_address,
            payment_method,
            payment_proof_url,
            shipping_price,
        } = checkout;

        let span = Span::current();

        record_stage(&span, CheckoutStage::Building);

        let mut tx = self.db.begin().await?;

        let (lines, cart) = match source {
            OrderSource::Cart => {
                let cart = self
                    .carts
                    .lock_cart_by_user(&mut tx, user)
                    .await?
                    .ok_or(OrdersServiceError::CartNotFound)?;

                let lines: Vec<NewOrderLine> = self
                    .cart_items
                    .get_cart_items(&mut tx, cart.uuid)
                    .await?
                    .into_iter()
                    .map(|item| NewOrderLine {
                        product_uuid: item.product_uuid,
                        quantity: item.quantity,
                        color: item.color,
                    })
                    .collect();

                (lines, Some(cart))
            }
            OrderSource::Items(lines) => (lines, None),
        };

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        if lines.iter().any(|line| line.quantity == 0) {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        span.record("line_count", lines.len());

        record_stage(&span, CheckoutStage::Validating);

        let demand = aggregate_demand(
            lines
                .iter()
                .map(|line| (line.product_uuid.into_uuid(), line.quantity)),
        );

        let stock = self
            .inventory
            .verify_availability(&mut tx, &demand)
            .await?;

        let items = lines
            .into_iter()
            .map(|line| {
                let price = stock
                    .iter()
                    .find(|record| record.uuid == line.product_uuid)
                    .map(|record| record.price)
                    .ok_or(StockError::ProductNotFound(line.product_uuid.into_uuid()))?;

                Ok(NewOrderItem {
                    product_uuid: line.product_uuid,
                    quantity: line.quantity,
                    price,
                    color: line.color,
                })
            })
            .collect::<Result<Vec<_>, OrdersServiceError>>()?;

        let shipping_price = match shipping_price {
            Some(price) => price,
            None => self
                .shipping
                .get_shipping_price(&mut tx)
                .await?
                .unwrap_or(self.default_shipping_price),
        };

        let totals = OrderTotals::compute(
            subtotal(&items)?,
            cart.as_ref()
                .and_then(|cart| cart.total_price_after_discount),
            shipping_price,
        )?;

        let payment = PaymentStatus::at_checkout(payment_method, payment_proof_url.is_some(), now);

        record_stage(&span, CheckoutStage::Committing);

        self.orders
            .insert_order(
                &mut tx,
                NewOrder {
                    uuid,
                    user,
                    shipping_address,
                    payment_method,
                    payment_proof_url,
                    shipping_price: totals.shipping_price,
                    total_order_price: totals.total_order_price,
                    payment,
                },
            )
            .await?;

        self.items.insert_items(&mut tx, uuid, items).await?;

        if let Err(failure) = self.inventory.apply_deltas(&mut tx, &demand).await {
            if let InventoryError::Reconciliation { expected, applied } = &failure {
                error!(
                    stage = %CheckoutStage::Committing,
                    order_uuid = %uuid,
                    expected,
                    applied,
                    "stock reconciliation failed; checkout rolled back"
                );
            }

            return Err(failure.into());
        }

        record_stage(&span, CheckoutStage::Fulfilling);

        if let Some(cart) = cart {
            self.carts.delete_cart(&mut tx, cart.uuid).await?;
        }

        let mut order = self.orders.get_order(&mut tx, uuid).await?;

        self.items
            .attach_items(&mut tx, slice::from_mut(&mut order))
            .await?;

        tx.commit().await?;

        span.record("total_order_price", order.total_order_price);

        info!(order_uuid = %order.uuid, "placed order");

        Ok(order)
    }

    async fn list_orders(
        &self,
        scope: OrderScope,
        listing: ListingQuery,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut page = self.orders.list_orders(&mut tx, scope, &listing).await?;

        self.items.attach_items(&mut tx, &mut page.items).await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn get_order(
        &self,
        order: OrderUuid,
        requester: Requester,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders.get_order(&mut tx, order).await?;

        if !requester.can_access(order.user.uuid.into_uuid()) {
            return Err(OrdersServiceError::Forbidden);
        }

        self.items
            .attach_items(&mut tx, slice::from_mut(&mut order))
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.update_shipping_price",
        skip(self),
        fields(
            order_uuid = %order,
            total_order_price = tracing::field::Empty
        ),
        err
    )]
    async fn update_shipping_price(
        &self,
        order: OrderUuid,
        shipping_price: i64,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let shipping_price = u64::try_from(shipping_price)?;

        let mut tx = self.db.begin().await?;

        let current = self.orders.lock_order(&mut tx, order).await?;

        let total_order_price = reprice_shipping(
            current.total_order_price,
            current.shipping_price,
            shipping_price,
        )?;

        self.orders
            .update_shipping(&mut tx, order, shipping_price, total_order_price)
            .await?;

        let mut updated = self.orders.get_order(&mut tx, order).await?;

        self.items
            .attach_items(&mut tx, slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        Span::current().record("total_order_price", total_order_price);

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.delete_order",
        skip(self, requester),
        fields(order_uuid = %order, requester_uuid = %requester.user),
        err
    )]
    async fn delete_order(
        &self,
        order: OrderUuid,
        requester: Requester,
        now: Timestamp,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders.lock_order(&mut tx, order).await?;

        authorize_deletion(
            &requester,
            current.user.uuid.into_uuid(),
            current.created_at,
            now,
        )
        .map_err(|denied| match denied {
            DeletionDenied::NotOwner => OrdersServiceError::Forbidden,
            DeletionDenied::WindowElapsed => OrdersServiceError::DeletionWindowElapsed,
        })?;

        self.orders.delete_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(order_uuid = %order, "deleted order");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn a cart, or directly supplied lines, into an order.
    ///
    /// Stock is locked, checked, recorded, and decremented in one
    /// transaction. Any failure leaves the cart and stock untouched.
    async fn checkout(
        &self,
        checkout: Checkout,
        now: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve one page of orders within the scope.
    async fn list_orders(
        &self,
        scope: OrderScope,
        listing: ListingQuery,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Retrieve an order owned by the requester, or any order for admins.
    async fn get_order(
        &self,
        order: OrderUuid,
        requester: Requester,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Replace an order's shipping price, shifting its total by the
    /// difference.
    async fn update_shipping_price(
        &self,
        order: OrderUuid,
        shipping_price: i64,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete an order. Stock is not restored.
    async fn delete_order(
        &self,
        order: OrderUuid,
        requester: Requester,
        now: Timestamp,
    ) -> Result<(), OrdersServiceError>;
}
