//! Coupons Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::{
    coupons::{DiscountPercent, is_redeemable},
    listing::ListingQuery,
};

use crate::{
    domain::coupons::{
        data::{CouponUpdate, NewCoupon},
        records::{CouponRecord, CouponUuid},
    },
    listing::{ListingSource, Page, fetch_page},
};

const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const COUNT_COUPONS_SQL: &str = include_str!("sql/count_coupons.sql");
const GET_COUPON_SQL: &str = include_str!("sql/get_coupon.sql");
const FIND_REDEEMABLE_COUPON_SQL: &str = include_str!("sql/find_redeemable_coupon.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/update_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/delete_coupon.sql");

const COUPONS_SOURCE: ListingSource = ListingSource {
    select: LIST_COUPONS_SQL,
    count: COUNT_COUPONS_SQL,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &ListingQuery,
    ) -> Result<Page<CouponRecord>, sqlx::Error> {
        fetch_page(tx, COUPONS_SOURCE, None, listing).await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_COUPON_SQL)
            .bind(coupon.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Find the coupon named `code` if it has not expired at `now`.
    ///
    /// Unknown and expired codes both yield `None`.
    pub(crate) async fn find_redeemable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        now: Timestamp,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        let coupon = query_as::<Postgres, CouponRecord>(FIND_REDEEMABLE_COUPON_SQL)
            .bind(code)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await?;

        Ok(coupon.filter(|coupon| is_redeemable(coupon.expires_at, now)))
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: NewCoupon,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL)
            .bind(coupon.uuid.into_uuid())
            .bind(coupon.name)
            .bind(encode_discount(coupon.discount)?)
            .bind(SqlxTimestamp::from(coupon.expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        update: CouponUpdate,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(UPDATE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .bind(update.name)
            .bind(update.discount.map(encode_discount).transpose()?)
            .bind(update.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn encode_discount(discount: DiscountPercent) -> Result<i16, sqlx::Error> {
    i16::try_from(discount.value()).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_i16: i16 = row.try_get("discount")?;

        let discount = DiscountPercent::try_from(i64::from(discount_i16)).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "discount".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            discount,
            expires_at: row.try_get::<SqlxTimestamp, _>("expires_at")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
