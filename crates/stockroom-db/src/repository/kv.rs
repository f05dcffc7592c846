//! # Key-Value Repository
//!
//! String storage keyed by name. Absent keys read as `None`; writes replace.

use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const UPSERT_SQL: &str = r#"
    INSERT INTO kv_store (key, value)
    VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
"#;

/// Repository for raw key-value strings.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, present = value.is_some(), "kv get");
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        upsert(&self.pool, key, value).await?;
        debug!(key = %key, bytes = value.len(), "kv set");
        Ok(())
    }

    /// Stores several entries atomically: either all land or none do.
    pub async fn set_many(&self, entries: &[(&str, String)]) -> DbResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for (key, value) in entries {
            upsert(&mut *tx, key, value).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(count = entries.len(), "kv set_many committed");
        Ok(())
    }

    /// Removes `key`. Returns true if a value was present.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "kv remove");
        Ok(result.rows_affected() > 0)
    }
}

async fn upsert<'e, E>(executor: E, key: &str, value: &str) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(UPSERT_SQL)
        .bind(key)
        .bind(value)
        .execute(executor)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn repo() -> super::KvRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().kv()
    }

    #[tokio::test]
    async fn test_absent_key_reads_none() {
        let kv = repo().await;

        assert_eq!(kv.get("productos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_replaces_value() {
        let kv = repo().await;

        kv.set("isAdmin", "false").await.unwrap();
        kv.set("isAdmin", "true").await.unwrap();

        assert_eq!(kv.get("isAdmin").await.unwrap().as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let kv = repo().await;
        kv.set("isAdmin", "true").await.unwrap();

        assert!(kv.remove("isAdmin").await.unwrap());
        assert!(!kv.remove("isAdmin").await.unwrap());
        assert_eq!(kv.get("isAdmin").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_many_writes_every_entry() {
        let kv = repo().await;

        kv.set_many(&[("categorias", "[]".to_string()), ("productos", "[]".to_string())])
            .await
            .unwrap();

        assert_eq!(kv.get("categorias").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(kv.get("productos").await.unwrap().as_deref(), Some("[]"));
    }
}
