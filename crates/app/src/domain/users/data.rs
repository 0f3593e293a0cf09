//! Users Data

use storefront::users::Role;

use crate::domain::users::records::UserUuid;

/// New User Data
///
/// Only the SHA-256 hash of the user's API token is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub token_hash: String,
}
