use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    Result, User, UserFields, UserId,
    store::{UserStore, record_operation},
};

/// In-memory user store.
///
/// Records are kept in insertion order, which matches the creation-time
/// ordering of the PostgreSQL implementation. Used as the default backend
/// when no database is configured, and by tests.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    /// Creates a new empty in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of users stored.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns true if no users are stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<User>> {
        record_operation("list_all");
        Ok(self.users.read().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        record_operation("get_by_id");
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    #[tracing::instrument(skip(self, fields))]
    async fn create(&self, fields: UserFields) -> Result<User> {
        record_operation("create");
        let user = User::from_fields(UserId::new(), fields, Utc::now());
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update_by_id(&self, id: UserId, fields: UserFields) -> Result<Option<User>> {
        record_operation("update_by_id");
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.apply(fields);
        Ok(Some(user.clone()))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: UserId) -> Result<Option<User>> {
        record_operation("delete_by_id");
        let mut users = self.users.write().await;
        let removed = users
            .iter()
            .position(|u| u.id == id)
            .map(|index| users.remove(index));
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> UserFields {
        UserFields::new("Ann", "ann@x.com", "a.png")
    }

    #[tokio::test]
    async fn list_all_on_empty_store() {
        let store = InMemoryUserStore::new();
        let users = store.list_all().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_lists_record() {
        let store = InMemoryUserStore::new();

        let first = store.create(ann()).await.unwrap();
        let second = store.create(ann()).await.unwrap();
        assert_ne!(first.id, second.id);

        let users = store.list_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0], first);
        assert_eq!(users[1], second);
        assert_eq!(users[0].fields(), ann());
    }

    #[tokio::test]
    async fn get_by_id_finds_created_record() {
        let store = InMemoryUserStore::new();
        let created = store.create(ann()).await.unwrap();

        let found = store.get_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn get_by_id_unknown_returns_none() {
        let store = InMemoryUserStore::new();
        store.create(ann()).await.unwrap();

        let found = store.get_by_id(UserId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let store = InMemoryUserStore::new();
        let created = store.create(ann()).await.unwrap();
        let bea = UserFields::new("Bea", "bea@x.com", "b.png");

        let updated = store
            .update_by_id(created.id, bea.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields(), bea);
        assert_eq!(updated.created_at, created.created_at);

        let reloaded = store.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(reloaded, updated);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_an_upsert() {
        let store = InMemoryUserStore::new();

        let result = store
            .update_by_id(UserId::new(), UserFields::new("Bea", "bea@x.com", "b.png"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_then_delete_leaves_store_empty() {
        let store = InMemoryUserStore::new();
        let created = store.create(ann()).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        let removed = store.delete_by_id(created.id).await.unwrap();
        assert_eq!(removed, Some(created.clone()));

        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_an_error() {
        let store = InMemoryUserStore::new();
        let kept = store.create(ann()).await.unwrap();

        let removed = store.delete_by_id(UserId::new()).await.unwrap();
        assert!(removed.is_none());
        assert_eq!(store.list_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn delete_preserves_order_of_remaining_records() {
        let store = InMemoryUserStore::new();
        let a = store.create(UserFields::new("A", "a@x.com", "")).await.unwrap();
        let b = store.create(UserFields::new("B", "b@x.com", "")).await.unwrap();
        let c = store.create(UserFields::new("C", "c@x.com", "")).await.unwrap();

        store.delete_by_id(b.id).await.unwrap();

        let ids: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryUserStore::new();
        let handle = store.clone();

        handle.create(ann()).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
