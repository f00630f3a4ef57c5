//! Database testing utilities
//!
//! Every [`TestDb`] is a private SQLite in-memory database with the course
//! schema applied, so tests never observe each other's rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use courses_api::testing::TestDb;
//!
//! #[tokio::test]
//! async fn test_with_database() {
//!     let test_db = TestDb::new().await.expect("Failed to create test database");
//!     let app = courses_api::testing::course_app(&test_db);
//! }
//! ```

use futures::future::BoxFuture;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use sea_orm_migration::MigratorTrait;

use crate::database::{Migrator, reset_database};
use crate::error::{ApiError, Result};

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Owns an isolated test database connection
pub struct TestDb {
    pub connection: DatabaseConnection,
}

impl TestDb {
    /// Create a fresh in-memory database with the course schema
    pub async fn new() -> std::result::Result<Self, DbErr> {
        Self::new_with_migrator::<Migrator>().await
    }

    /// Create a fresh in-memory database and run the given migrator
    pub async fn new_with_migrator<M: MigratorTrait>() -> std::result::Result<Self, DbErr> {
        let instance = Self::empty().await?;
        M::up(&instance.connection, None).await?;
        Ok(instance)
    }

    /// Create a fresh in-memory database without running migrations
    pub async fn empty() -> std::result::Result<Self, DbErr> {
        // One pooled connection that never idles out: the in-memory
        // database lives exactly as long as that connection
        let mut opt = ConnectOptions::new(IN_MEMORY_URL);
        opt.max_connections(1)
            .min_connections(1)
            .idle_timeout(std::time::Duration::from_secs(3600))
            .sqlx_logging(false);

        let connection = Database::connect(opt).await?;
        connection
            .execute_unprepared("PRAGMA foreign_keys = ON;")
            .await?;

        Ok(Self { connection })
    }

    /// Get a clone of the database connection
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Execute raw SQL statements to seed fixtures
    pub async fn seed(&self, statements: &[&str]) -> std::result::Result<(), DbErr> {
        for statement in statements {
            self.connection.execute_unprepared(statement).await?;
        }
        Ok(())
    }

    /// Drop every table and re-apply the course migrations
    pub async fn reset(&self) -> Result<()> {
        reset_database::<Migrator>(&self.connection).await
    }

    /// Run `f` inside a transaction that is always rolled back
    ///
    /// ```rust,ignore
    /// db.with_transaction_rollback(|txn| Box::pin(async move {
    ///     courses_api::courses::store::create(txn, "Scratch").await?;
    ///     Ok::<(), ApiError>(())
    /// })).await?;
    /// ```
    pub async fn with_transaction_rollback<F>(&self, f: F) -> Result<()>
    where
        F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<()>>,
    {
        let txn = self.connection.begin().await?;

        let result = f(&txn).await;

        txn.rollback()
            .await
            .map_err(|e| ApiError::internal(format!("Rollback failed: {}", e)))?;

        result
    }
}

/// Create a migrated test database, panicking on failure
///
/// ```rust,ignore
/// let db = courses_api::test_db!();
/// ```
#[macro_export]
macro_rules! test_db {
    () => {{
        $crate::testing::TestDb::new()
            .await
            .expect("Failed to create test database")
    }};
    ($migrator:ty) => {{
        $crate::testing::TestDb::new_with_migrator::<$migrator>()
            .await
            .expect("Failed to create test database")
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courses::store;

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDb::new().await.unwrap();
        let second = TestDb::new().await.unwrap();

        store::create(&first.connection, "Only here").await.unwrap();

        assert_eq!(store::count(&first.connection).await.unwrap(), 1);
        assert_eq!(store::count(&second.connection).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_and_reset() {
        let db = crate::test_db!();
        db.seed(&["INSERT INTO courses (name) VALUES ('Seeded')"])
            .await
            .unwrap();
        assert_eq!(store::count(&db.connection).await.unwrap(), 1);

        db.reset().await.unwrap();
        assert_eq!(store::count(&db.connection).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rollback_even_on_error() {
        let db = TestDb::new().await.unwrap();

        let result = db
            .with_transaction_rollback(|txn| {
                Box::pin(async move {
                    store::create(txn, "Temporary").await?;
                    Err::<(), ApiError>(ApiError::bad_request("abort"))
                })
            })
            .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
        assert_eq!(store::count(&db.connection).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_has_no_schema() {
        let db = TestDb::empty().await.unwrap();
        assert!(store::count(&db.connection).await.is_err());
    }
}
