//! SQLite-backed adapters for the durable ports (spec.md §2, §6).

pub mod app_repository;
pub mod connection;
pub mod framework_id_store;
pub mod migrations;
pub mod task_store;

pub use app_repository::SqliteAppRepository;
pub use connection::{create_pool, create_test_pool, ConnectionError, PoolConfig};
pub use framework_id_store::SqliteFrameworkIdStore;
pub use migrations::{all_embedded_migrations, MigrationError, Migration, Migrator};
pub use task_store::SqliteTaskStore;
