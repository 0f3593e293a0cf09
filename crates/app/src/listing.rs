//! Listing queries rendered to SQL.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, QueryBuilder, Transaction, postgres::PgRow};
use storefront::listing::{FilterValue, ListingQuery};
use uuid::Uuid;

use crate::database::encode_amount;

/// One page of listing results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records on the requested page.
    pub items: Vec<T>,

    /// Number of records matching the filters across every page.
    pub total: u64,
}

impl<T> Page<T> {
    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map the page's records, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Base statements for one listable relation.
///
/// Both statements must end in a `WHERE` clause so conditions can be appended
/// with `AND`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListingSource {
    pub select: &'static str,
    pub count: &'static str,
}

/// Restrict a listing to rows where `column` equals the given uuid.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    pub column: &'static str,
    pub uuid: Uuid,
}

pub(crate) async fn fetch_page<T>(
    tx: &mut Transaction<'_, Postgres>,
    source: ListingSource,
    scope: Option<Scope>,
    query: &ListingQuery,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut count = QueryBuilder::<Postgres>::new(source.count);
    push_conditions(&mut count, scope, query);

    let total: i64 = count.build_query_scalar().fetch_one(&mut **tx).await?;

    let mut select = QueryBuilder::<Postgres>::new(source.select);
    push_conditions(&mut select, scope, query);

    select.push(" ORDER BY ");

    for key in &query.sort {
        select
            .push(key.column)
            .push(" ")
            .push(key.direction.as_sql())
            .push(", ");
    }

    select.push("uuid ASC LIMIT ");
    select.push_bind(encode_amount(query.page.limit())?);
    select.push(" OFFSET ");
    select.push_bind(encode_amount(query.page.offset())?);

    let items = select.build_query_as::<T>().fetch_all(&mut **tx).await?;

    Ok(Page {
        items,
        total: u64::try_from(total).unwrap_or_default(),
    })
}

fn push_conditions(builder: &mut QueryBuilder<'_, Postgres>, scope: Option<Scope>, query: &ListingQuery) {
    if let Some(scope) = scope {
        builder
            .push(" AND ")
            .push(scope.column)
            .push(" = ")
            .push_bind(scope.uuid);
    }

    for filter in &query.filters {
        builder
            .push(" AND ")
            .push(filter.column)
            .push(" ")
            .push(filter.comparison.as_sql())
            .push(" ");

        match &filter.value {
            FilterValue::Text(value) => builder.push_bind(value.clone()),
            FilterValue::Integer(value) => builder.push_bind(*value),
            FilterValue::Boolean(value) => builder.push_bind(*value),
            FilterValue::Uuid(value) => builder.push_bind(*value),
            FilterValue::Timestamp(value) => builder.push_bind(SqlxTimestamp::from(*value)),
        };
    }

    if let Some(search) = &query.search {
        let pattern = search.like_pattern();

        builder.push(" AND (");

        for (index, column) in search.columns().iter().enumerate() {
            if index > 0 {
                builder.push(" OR ");
            }

            builder
                .push(*column)
                .push(" ILIKE ")
                .push_bind(pattern.clone());
        }

        builder.push(")");
    }
}
