use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. Only the salted digest of the password is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signup {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password_salt: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

/// What callers are allowed to see of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Signup> for PublicUser {
    fn from(signup: &Signup) -> Self {
        Self {
            id: signup.id,
            name: signup.name.clone(),
            email: signup.email.clone(),
            created_at: signup.created_at,
        }
    }
}
