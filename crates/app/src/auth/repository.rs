//! Auth repository.

use sqlx::{PgPool, Row};
use storefront::users::Requester;

use crate::domain::users::repository::try_get_role;

const FIND_USER_BY_TOKEN_HASH_SQL: &str = include_str!("sql/find_user_by_token_hash.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_user_by_token_hash(
        &self,
        hash: &str,
    ) -> Result<Option<Requester>, sqlx::Error> {
        let row = sqlx::query(FIND_USER_BY_TOKEN_HASH_SQL)
            .bind(hash)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            Ok(Requester {
                user: row.try_get("uuid")?,
                role: try_get_role(&row, "role")?,
            })
        })
        .transpose()
    }
}
