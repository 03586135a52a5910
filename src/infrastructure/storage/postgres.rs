//! PostgreSQL storage, one JSONB table per entity kind

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};

use crate::domain::DomainError;
use crate::domain::entity::EntityId;
use crate::domain::storage::{Storage, StorageEntity};

/// Pool settings for the PostgreSQL backend
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a caller waits for a free connection
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/timetable".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Opens the pool shared by every table of the process
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Cannot reach PostgreSQL: {}", e)))
    }
}

/// Statements of one table, rendered once from its name
#[derive(Debug)]
struct Statements {
    create_table: String,
    select_one: String,
    select_all: String,
    insert: String,
    update: String,
    delete_one: String,
    delete_all: String,
    count: String,
    exists: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id BIGSERIAL PRIMARY KEY,
                    data JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )"
            ),
            select_one: format!("SELECT id, data FROM {table} WHERE id = $1"),
            select_all: format!("SELECT id, data FROM {table} ORDER BY id"),
            insert: format!("INSERT INTO {table} (data) VALUES ($1) RETURNING id"),
            update: format!("UPDATE {table} SET data = $2, updated_at = NOW() WHERE id = $1"),
            delete_one: format!("DELETE FROM {table} WHERE id = $1"),
            delete_all: format!("DELETE FROM {table}"),
            count: format!("SELECT COUNT(*) FROM {table}"),
            exists: format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)"),
        }
    }
}

/// Stores entities as `(id BIGSERIAL, data JSONB)` rows.
///
/// The id column is authoritative: the id embedded in `data` is
/// overwritten when a row is read back.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table: String,
    sql: Statements,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("kind", &E::KIND)
            .field("table", &self.table)
            .finish()
    }
}

fn db_error<E: StorageEntity>(operation: &str) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::storage(format!("Failed to {} {}: {}", operation, E::KIND, e))
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        let table = table.into();

        Self {
            pool,
            sql: Statements::for_table(&table),
            table,
            _phantom: PhantomData,
        }
    }

    /// Creates the table when it does not exist yet
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(&self.sql.create_table)
            .execute(&self.pool)
            .await
            .map_err(db_error::<E>("create table for"))?;

        Ok(())
    }

    fn decode(row: &PgRow) -> Result<E, DomainError> {
        let id: i64 = row.try_get("id").map_err(db_error::<E>("read id of"))?;
        let data: serde_json::Value = row.try_get("data").map_err(db_error::<E>("read"))?;

        let mut entity: E = serde_json::from_value(data)
            .map_err(|e| DomainError::storage(format!("Corrupt {} row {}: {}", E::KIND, id, e)))?;
        entity.set_id(EntityId::new(id));

        Ok(entity)
    }

    fn encode(entity: &E) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(entity)
            .map_err(|e| DomainError::storage(format!("Cannot encode {}: {}", E::KIND, e)))
    }
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, id: EntityId) -> Result<Option<E>, DomainError> {
        let row = sqlx::query(&self.sql.select_one)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error::<E>("get"))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let rows = sqlx::query(&self.sql.select_all)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error::<E>("list"))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn create(&self, mut entity: E) -> Result<E, DomainError> {
        let data = Self::encode(&entity)?;

        let id: i64 = sqlx::query_scalar(&self.sql.insert)
            .bind(&data)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error::<E>("insert"))?;

        entity.set_id(EntityId::new(id));
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let data = Self::encode(&entity)?;

        let result = sqlx::query(&self.sql.update)
            .bind(entity.id().value())
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(db_error::<E>("update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::identity(format!(
                "{} '{}' not found",
                E::KIND,
                entity.id()
            )));
        }

        Ok(entity)
    }

    async fn delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query(&self.sql.delete_one)
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_error::<E>("delete"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        sqlx::query(&self.sql.delete_all)
            .execute(&self.pool)
            .await
            .map_err(db_error::<E>("clear"))?;

        Ok(())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar(&self.sql.count)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error::<E>("count"))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn exists(&self, id: EntityId) -> Result<bool, DomainError> {
        sqlx::query_scalar(&self.sql.exists)
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error::<E>("look up"))
    }
}
