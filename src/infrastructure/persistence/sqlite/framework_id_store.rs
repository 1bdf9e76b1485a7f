//! Durable, singleton [`FrameworkIdStore`] backed by SQLite.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::SchedulerResult;
use crate::domain::models::FrameworkId;
use crate::domain::ports::FrameworkIdStore;

#[derive(Clone)]
pub struct SqliteFrameworkIdStore {
    pool: SqlitePool,
}

impl SqliteFrameworkIdStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FrameworkIdStore for SqliteFrameworkIdStore {
    async fn load(&self) -> SchedulerResult<Option<FrameworkId>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT framework_id FROM framework_id WHERE singleton = 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id,)| FrameworkId(id)))
    }

    async fn save(&self, id: &FrameworkId) -> SchedulerResult<()> {
        sqlx::query(
            "INSERT INTO framework_id (singleton, framework_id) VALUES (1, ?)
             ON CONFLICT (singleton) DO UPDATE SET framework_id = excluded.framework_id",
        )
        .bind(&id.0)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::connection::create_test_pool;

    #[tokio::test]
    async fn load_before_save_is_none() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteFrameworkIdStore::new(pool);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteFrameworkIdStore::new(pool);

        store.save(&FrameworkId("fw-1".to_string())).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(FrameworkId("fw-1".to_string())));
    }

    #[tokio::test]
    async fn save_replaces_the_single_id() {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteFrameworkIdStore::new(pool);

        store.save(&FrameworkId("fw-1".to_string())).await.unwrap();
        store.save(&FrameworkId("fw-2".to_string())).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(FrameworkId("fw-2".to_string())));
    }
}
