//! # Session Repository
//!
//! The stored admin flag. Only the exact string `"true"` counts as set;
//! the access gate reads the raw value and decides.

use sqlx::SqlitePool;
use tracing::info;

use stockroom_core::ADMIN_FLAG_KEY;

use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Repository for the `isAdmin` flag.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    kv: KvRepository,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository {
            kv: KvRepository::new(pool),
        }
    }

    /// Raw stored flag, if any.
    pub async fn admin_flag(&self) -> DbResult<Option<String>> {
        self.kv.get(ADMIN_FLAG_KEY).await
    }

    /// Stores the flag as `"true"` or `"false"`.
    pub async fn set_admin_flag(&self, admin: bool) -> DbResult<()> {
        info!(admin, "Storing admin flag");
        self.kv
            .set(ADMIN_FLAG_KEY, if admin { "true" } else { "false" })
            .await
    }

    /// Removes the flag entirely (logout).
    pub async fn clear_admin_flag(&self) -> DbResult<()> {
        let removed = self.kv.remove(ADMIN_FLAG_KEY).await?;
        info!(removed, "Admin flag cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_flag_lifecycle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let session = db.session();

        assert_eq!(session.admin_flag().await.unwrap(), None);

        session.set_admin_flag(true).await.unwrap();
        assert_eq!(session.admin_flag().await.unwrap().as_deref(), Some("true"));

        session.set_admin_flag(false).await.unwrap();
        assert_eq!(session.admin_flag().await.unwrap().as_deref(), Some("false"));

        session.clear_admin_flag().await.unwrap();
        assert_eq!(session.admin_flag().await.unwrap(), None);
    }
}
