//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p user-store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use sqlx::PgPool;
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use user_store::{PostgresUserStore, UserFields, UserId, UserStore};

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Oldest supported major is 13 (built-in `gen_random_uuid()`).
const POSTGRES_TAG: &str = "16-alpine";

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default()
                .with_tag(POSTGRES_TAG)
                .start()
                .await
                .unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_store = PostgresUserStore::connect(&connection_string)
                .await
                .unwrap();
            temp_store.run_migrations().await.unwrap();
            temp_store.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and an emptied users table
async fn get_test_store() -> PostgresUserStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE users")
        .execute(&pool)
        .await
        .unwrap();

    PostgresUserStore::new(pool)
}

fn ann() -> UserFields {
    UserFields::new("Ann", "ann@x.com", "a.png")
}

#[tokio::test]
async fn list_all_on_empty_table() {
    let store = get_test_store().await;
    let users = store.list_all().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn create_then_list() {
    let store = get_test_store().await;

    let created = store.create(ann()).await.unwrap();
    assert_eq!(created.fields(), ann());

    let users = store.list_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, created.id);
    assert_eq!(users[0].fields(), ann());
}

#[tokio::test]
async fn database_assigns_distinct_ids() {
    let store = get_test_store().await;

    let first = store.create(ann()).await.unwrap();
    let second = store.create(ann()).await.unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn get_by_id_roundtrip() {
    let store = get_test_store().await;
    let created = store.create(ann()).await.unwrap();

    let found = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.fields(), ann());

    let missing = store.get_by_id(UserId::new()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn update_overwrites_fields() {
    let store = get_test_store().await;
    let created = store.create(ann()).await.unwrap();
    let bea = UserFields::new("Bea", "bea@x.com", "b.png");

    let updated = store
        .update_by_id(created.id, bea.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.fields(), bea);

    let reloaded = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.fields(), bea);
}

#[tokio::test]
async fn update_unknown_id_does_not_insert() {
    let store = get_test_store().await;

    let result = store
        .update_by_id(UserId::new(), UserFields::new("Bea", "bea@x.com", "b.png"))
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_record() {
    let store = get_test_store().await;
    let created = store.create(ann()).await.unwrap();

    let removed = store.delete_by_id(created.id).await.unwrap();
    assert_eq!(removed.map(|u| u.id), Some(created.id));

    assert!(store.get_by_id(created.id).await.unwrap().is_none());
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_id_is_not_an_error() {
    let store = get_test_store().await;

    let removed = store.delete_by_id(UserId::new()).await.unwrap();
    assert!(removed.is_none());
}

#[tokio::test]
async fn closed_pool_surfaces_database_error() {
    let info = get_container_info().await;
    let pool = PgPool::connect(&info.connection_string).await.unwrap();
    let store = PostgresUserStore::new(pool);

    store.close().await;

    let result = store.list_all().await;
    assert!(matches!(
        result,
        Err(user_store::UserStoreError::Database(_))
    ));
}
