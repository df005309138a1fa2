use async_trait::async_trait;

use super::{NewUser, User, UserPatch};
use crate::domain::DomainResult;

/// The only component permitted to issue queries against the `users` table.
///
/// Every operation is a single round-trip to the store; no state is held
/// across calls. Callers must ensure migrations have run before using it.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Returns the row matching `id`, or `None` when absent.
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    /// Inserts a new row and returns it fully populated (id + timestamps).
    ///
    /// Fails with `Conflict` when the username is already taken and with
    /// `Validation` when either field is empty.
    async fn create(&self, new_user: NewUser) -> DomainResult<User>;

    /// Applies only the fields present in `patch`; returns the updated row
    /// or `None` when no row matches. A username collision is a `Conflict`.
    async fn update(&self, id: i32, patch: UserPatch) -> DomainResult<Option<User>>;

    /// Removes the row matching `id`; returns whether a row was removed.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
