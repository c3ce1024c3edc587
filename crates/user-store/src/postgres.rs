use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Result, User, UserFields, UserId,
    store::{UserStore, record_operation},
};

/// PostgreSQL-backed user store.
///
/// Ids are generated by the database (`gen_random_uuid()`), so a record's
/// identity is always assigned by the store.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Creates a new PostgreSQL user store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to the given database URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_user(row: PgRow) -> Result<User> {
        Ok(User {
            id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            image: row.try_get("image")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<User>> {
        record_operation("list_all");
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, image, created_at
            FROM users
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        record_operation("get_by_id");
        let row = sqlx::query(
            r#"
            SELECT id, name, email, image, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    #[tracing::instrument(skip(self, fields))]
    async fn create(&self, fields: UserFields) -> Result<User> {
        record_operation("create");
        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, image)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, image, created_at
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.image)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_user(row)
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update_by_id(&self, id: UserId, fields: UserFields) -> Result<Option<User>> {
        record_operation("update_by_id");
        let row = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, image = $4
            WHERE id = $1
            RETURNING id, name, email, image, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.image)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: UserId) -> Result<Option<User>> {
        record_operation("delete_by_id");
        let row = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, image, created_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_user).transpose()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
