//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::{
    listing::ListingQuery,
    orders::{PaymentMethod, PaymentStatus},
};

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{
        orders::{
            data::OrderScope,
            records::{OrderOwner, OrderRecord, OrderUuid, ShippingAddress},
        },
        users::records::UserUuid,
    },
    listing::{ListingSource, Page, Scope, fetch_page},
};

const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("../sql/count_orders.sql");
const INSERT_ORDER_SQL: &str = include_str!("../sql/insert_order.sql");
const UPDATE_ORDER_SHIPPING_SQL: &str = include_str!("../sql/update_order_shipping.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");

const ORDERS_SOURCE: ListingSource = ListingSource {
    select: LIST_ORDERS_SQL,
    count: COUNT_ORDERS_SQL,
};

/// Order row written at checkout.
#[derive(Debug, Clone)]
pub(crate) struct NewOrder {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub payment_proof_url: Option<String>,
    pub shipping_price: u64,
    pub total_order_price: u64,
    pub payment: PaymentStatus,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(order.shipping_address.address)
            .bind(order.shipping_address.phone)
            .bind(order.shipping_address.city)
            .bind(order.payment_method.as_str())
            .bind(order.payment_proof_url)
            .bind(encode_amount(order.shipping_price)?)
            .bind(encode_amount(order.total_order_price)?)
            .bind(order.payment.is_paid)
            .bind(order.payment.paid_at.map(SqlxTimestamp::from))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        scope: OrderScope,
        listing: &ListingQuery,
    ) -> Result<Page<OrderRecord>, sqlx::Error> {
        let scope = match scope {
            OrderScope::All => None,
            OrderScope::User(user) => Some(Scope {
                column: "user_uuid",
                uuid: user.into_uuid(),
            }),
        };

        fetch_page(tx, ORDERS_SOURCE, scope, listing).await
    }

    pub(crate) async fn update_shipping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        shipping_price: u64,
        total_order_price: u64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_SHIPPING_SQL)
            .bind(order.into_uuid())
            .bind(encode_amount(shipping_price)?)
            .bind(encode_amount(total_order_price)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_method: String = row.try_get("payment_method")?;

        let payment_method =
            PaymentMethod::from_str(&payment_method).map_err(|e| sqlx::Error::ColumnDecode {
                index: "payment_method".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: OrderOwner {
                uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
                name: row.try_get("user_name")?,
                email: row.try_get("user_email")?,
            },
            items: Vec::new(),
            shipping_address: ShippingAddress {
                address: row.try_get("shipping_address")?,
                phone: row.try_get("shipping_phone")?,
                city: row.try_get("shipping_city")?,
            },
            payment_method,
            payment_proof_url: row.try_get("payment_proof_url")?,
            shipping_price: try_get_amount(row, "shipping_price")?,
            total_order_price: try_get_amount(row, "total_order_price")?,
            is_paid: row.try_get("is_paid")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            is_delivered: row.try_get("is_delivered")?,
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
