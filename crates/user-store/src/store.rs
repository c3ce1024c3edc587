use async_trait::async_trait;

use crate::{Result, User, UserFields, UserId};

/// Core trait for user record stores.
///
/// Every method performs exactly one round trip to the backend. There are
/// no retries and no multi-record transactions. All implementations must be
/// thread-safe (Send + Sync) so a single instance can be shared by every
/// request handler.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns every persisted user, oldest first.
    ///
    /// Returns an empty list when the store holds no records.
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Retrieves a single user.
    ///
    /// Returns None if no record has the given id.
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Inserts a new user. The store assigns the id and creation time.
    async fn create(&self, fields: UserFields) -> Result<User>;

    /// Overwrites name, email and image of an existing user.
    ///
    /// Returns the record as it is after the update, or None if no record
    /// has the given id. Never inserts.
    async fn update_by_id(&self, id: UserId, fields: UserFields) -> Result<Option<User>>;

    /// Removes a user, returning the removed record.
    ///
    /// A non-matching id is not an error and yields None.
    async fn delete_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Releases backend resources. Called once at shutdown.
    async fn close(&self) {}
}

pub(crate) fn record_operation(op: &'static str) {
    metrics::counter!("user_store_operations_total", "op" => op).increment(1);
}
