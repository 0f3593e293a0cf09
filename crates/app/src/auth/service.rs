//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use storefront::users::Requester;

use crate::{
    auth::{
        errors::AuthServiceError,
        repository::PgAuthRepository,
        token::{hash_api_token, parse_api_token},
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Requester, AuthServiceError> {
        parse_api_token(bearer_token)?;

        self.repository
            .find_user_by_token_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Requester, AuthServiceError>;
}
