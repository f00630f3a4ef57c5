use sea_orm::DatabaseConnection;

use crate::error::{ApiError, Result};

/// Application context shared with every handler through `State<AppContext>`
///
/// SeaORM's `DatabaseConnection` is itself a cheaply clonable pool handle,
/// so the context can be cloned per request.
#[derive(Clone, Default)]
pub struct AppContext {
    pub database: Option<DatabaseConnection>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern for constructing AppContext
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }

    /// Get the database connection, returning an error if not configured
    pub fn database(&self) -> Result<&DatabaseConnection> {
        self.database
            .as_ref()
            .ok_or_else(|| ApiError::internal("Database connection not configured"))
    }

    /// Get the database connection as an Option
    pub fn database_opt(&self) -> Option<&DatabaseConnection> {
        self.database.as_ref()
    }
}

/// Builder for AppContext with fluent API
#[derive(Default)]
#[must_use = "builder does nothing until you call build()"]
pub struct AppContextBuilder {
    database: Option<DatabaseConnection>,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database connection
    pub fn with_database(mut self, database: DatabaseConnection) -> Self {
        self.database = Some(database);
        self
    }

    pub fn build(self) -> AppContext {
        AppContext {
            database: self.database,
        }
    }
}
