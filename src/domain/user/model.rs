//! Domain user model and operation inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully populated user row, including store-assigned fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Auto-assigned primary key, immutable once created
    pub id: i32,
    /// Unique across all rows
    pub username: String,
    /// Stored verbatim, no hashing in this service
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user; id and timestamps are store-assigned.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Partial update; only present fields are written.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
}
