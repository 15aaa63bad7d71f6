use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored identity. The password hash is an Argon2id PHC string.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    #[must_use]
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}
