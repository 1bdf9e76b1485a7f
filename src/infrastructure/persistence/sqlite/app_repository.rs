//! Durable, versioned [`AppRepository`] backed by SQLite.
//!
//! Every `store` inserts a new row rather than updating in place, so
//! historical versions survive (spec.md §3 "historical versions are
//! retained by AppRepository").

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::errors::SchedulerResult;
use crate::domain::models::App;
use crate::domain::ports::AppRepository;

#[derive(Clone)]
pub struct SqliteAppRepository {
    pool: SqlitePool,
}

impl SqliteAppRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: String,
    version: String,
    instances: i64,
    task_rate_limit: f64,
    launch_params: String,
}

impl TryFrom<AppRow> for App {
    type Error = serde_json::Error;

    fn try_from(row: AppRow) -> Result<Self, Self::Error> {
        Ok(App {
            id: row.id,
            instances: row.instances as u32,
            task_rate_limit: row.task_rate_limit,
            version: row
                .version
                .parse::<DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now()),
            launch_params: serde_json::from_str(&row.launch_params)?,
        })
    }
}

#[async_trait]
impl AppRepository for SqliteAppRepository {
    async fn store(&self, app: &App) -> SchedulerResult<()> {
        let launch_params = serde_json::to_string(&app.launch_params)?;
        sqlx::query(
            "INSERT INTO apps (id, version, instances, task_rate_limit, launch_params) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&app.id)
        .bind(app.version.to_rfc3339())
        .bind(app.instances as i64)
        .bind(app.task_rate_limit)
        .bind(launch_params)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn current_version(&self, id: &str) -> SchedulerResult<Option<App>> {
        let row: Option<AppRow> = sqlx::query_as(
            "SELECT id, version, instances, task_rate_limit, launch_params FROM apps WHERE id = ? ORDER BY version DESC LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(App::try_from)
            .transpose()
            .map_err(Into::into)
    }

    async fn expunge(&self, id: &str) -> SchedulerResult<Vec<bool>> {
        let removed: Vec<(String,)> =
            sqlx::query_as("DELETE FROM apps WHERE id = ? RETURNING version")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;
        Ok(removed.into_iter().map(|_| true).collect())
    }

    async fn app_ids(&self) -> SchedulerResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT DISTINCT id FROM apps")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::connection::create_test_pool;

    async fn repo() -> SqliteAppRepository {
        let pool = create_test_pool().await.unwrap();
        SqliteAppRepository::new(pool)
    }

    #[tokio::test]
    async fn store_then_current_version_round_trips() {
        let repo = repo().await;
        let app = App::new("x", 2, 1.5);
        repo.store(&app).await.unwrap();

        let loaded = repo.current_version("x").await.unwrap().unwrap();
        assert_eq!(loaded.id, "x");
        assert_eq!(loaded.instances, 2);
    }

    #[tokio::test]
    async fn newer_version_wins() {
        let repo = repo().await;
        let v1 = App::new("x", 1, 1.0);
        repo.store(&v1).await.unwrap();

        let v2 = v1.with_instances(5, v1.version + chrono::Duration::seconds(1));
        repo.store(&v2).await.unwrap();

        let loaded = repo.current_version("x").await.unwrap().unwrap();
        assert_eq!(loaded.instances, 5);
    }

    #[tokio::test]
    async fn app_ids_lists_distinct_ids() {
        let repo = repo().await;
        repo.store(&App::new("x", 1, 1.0)).await.unwrap();
        repo.store(&App::new("y", 1, 1.0)).await.unwrap();

        let mut ids = repo.app_ids().await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["x".to_string(), "y".to_string()]);
    }

    #[tokio::test]
    async fn expunge_removes_all_versions() {
        let repo = repo().await;
        let v1 = App::new("x", 1, 1.0);
        repo.store(&v1).await.unwrap();
        repo.store(&v1.with_instances(2, v1.version + chrono::Duration::seconds(1)))
            .await
            .unwrap();

        let results = repo.expunge("x").await.unwrap();
        assert!(results.iter().all(|ok| *ok));
        assert!(repo.current_version("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expunging_an_already_gone_app_is_a_no_op_not_a_failure() {
        let repo = repo().await;
        repo.store(&App::new("x", 1, 1.0)).await.unwrap();
        repo.expunge("x").await.unwrap();

        let retried = repo.expunge("x").await.unwrap();
        assert!(retried.is_empty());
    }
}
