//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::pricing::PricedLine;
use uuid::Uuid;

use crate::{
    database::{encode_amount, encode_quantity, try_get_amount, try_get_quantity},
    domain::{
        orders::records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        products::records::ProductUuid,
    },
};

const INSERT_ORDER_ITEMS_SQL: &str = include_str!("../sql/insert_order_items.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

/// Priced line written at checkout.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: u64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the lines in order; their position is their index.
    pub(crate) async fn insert_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        items: Vec<NewOrderItem>,
    ) -> Result<(), sqlx::Error> {
        let mut uuids = Vec::with_capacity(items.len());
        let mut products = Vec::with_capacity(items.len());
        let mut quantities = Vec::with_capacity(items.len());
        let mut prices = Vec::with_capacity(items.len());
        let mut colors = Vec::with_capacity(items.len());
        let mut positions = Vec::with_capacity(items.len());

        for (position, item) in items.into_iter().enumerate() {
            uuids.push(OrderItemUuid::new().into_uuid());
            products.push(item.product_uuid.into_uuid());
            quantities.push(encode_quantity(item.quantity)?);
            prices.push(encode_amount(item.price)?);
            colors.push(item.color);
            positions.push(
                i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?,
            );
        }

        query(INSERT_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(quantities)
            .bind(prices)
            .bind(colors)
            .bind(positions)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Load the items of every given order.
    pub(crate) async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let items = query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        for item in items {
            if let Some(order) = orders.iter_mut().find(|order| order.uuid == item.order_uuid) {
                order.items.push(item);
            }
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            price: try_get_amount(row, "price")?,
            color: row.try_get("color")?,
        })
    }
}

impl PricedLine for NewOrderItem {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn unit_price(&self) -> u64 {
        self.price
    }
}
