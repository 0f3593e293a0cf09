//! Inventory Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use storefront::stock::StockDemand;
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{inventory::records::StockRecord, products::records::ProductUuid},
};

const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const APPLY_STOCK_DELTAS_SQL: &str = include_str!("sql/apply_stock_deltas.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the live products in uuid order.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<Vec<StockRecord>, sqlx::Error> {
        query_as::<Postgres, StockRecord>(LOCK_PRODUCTS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await
    }

    /// Decrement stock and increment sold for every demand whose product still
    /// has enough stock, returning the products that were updated.
    pub(crate) async fn apply_deltas(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        demand: &[StockDemand],
    ) -> Result<Vec<Uuid>, sqlx::Error> {
        let products: Vec<Uuid> = demand.iter().map(|wanted| wanted.product).collect();

        let quantities = demand
            .iter()
            .map(|wanted| encode_amount(wanted.quantity))
            .collect::<Result<Vec<i64>, _>>()?;

        query_scalar(APPLY_STOCK_DELTAS_SQL)
            .bind(products)
            .bind(quantities)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StockRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            price: try_get_amount(row, "price")?,
            quantity: try_get_amount(row, "quantity")?,
        })
    }
}
