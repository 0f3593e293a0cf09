//! Shipping Price Repository

use sqlx::{Postgres, Transaction, query_scalar};

use crate::database::encode_amount;

const GET_SHIPPING_PRICE_SQL: &str = include_str!("sql/get_shipping_price.sql");
const SET_SHIPPING_PRICE_SQL: &str = include_str!("sql/set_shipping_price.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgShippingRepository;

impl PgShippingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The stored shipping price, if one has ever been set.
    pub(crate) async fn get_shipping_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<u64>, sqlx::Error> {
        let price: Option<i64> = query_scalar(GET_SHIPPING_PRICE_SQL)
            .fetch_optional(&mut **tx)
            .await?;

        price.map(decode_price).transpose()
    }

    pub(crate) async fn set_shipping_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        price: u64,
    ) -> Result<u64, sqlx::Error> {
        let stored: i64 = query_scalar(SET_SHIPPING_PRICE_SQL)
            .bind(encode_amount(price)?)
            .fetch_one(&mut **tx)
            .await?;

        decode_price(stored)
    }
}

fn decode_price(price: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(price).map_err(|e| sqlx::Error::ColumnDecode {
        index: "shipping_price".to_string(),
        source: Box::new(e),
    })
}
