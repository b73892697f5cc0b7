//! User Data

use crate::domain::users::records::{Role, UserUuid};

/// New user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub name: Option<String>,
    pub email: String,
    pub phone: String,
    pub role: Role,
}
