use crate::error::{ApiError, Result};
use sea_orm_migration::MigratorTrait;

/// Run pending migrations
///
/// # Example
///
/// ```rust,ignore
/// use courses_api::database::{run_migrations, Migrator};
///
/// run_migrations::<Migrator>(&db).await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(db: &sea_orm::DatabaseConnection) -> Result<()> {
    M::up(db, None)
        .await
        .map_err(|e| ApiError::internal(format!("Migration failed: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Reset the database (drop every table, then re-apply all migrations)
pub async fn reset_database<M: MigratorTrait>(db: &sea_orm::DatabaseConnection) -> Result<()> {
    M::fresh(db)
        .await
        .map_err(|e| ApiError::internal(format!("Database reset failed: {}", e)))?;

    tracing::info!("Database reset completed");
    Ok(())
}
