//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::token::ApiTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The bearer value is not an `sf_<hex>` token. Nothing was looked up.
    #[error(transparent)]
    MalformedToken(#[from] ApiTokenError),

    /// Well-formed token that no user holds.
    #[error("no user holds this token")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
