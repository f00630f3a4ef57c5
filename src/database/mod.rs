//! Database connection management and schema migrations.
//!
//! Courses are stored through SeaORM; the schema is owned by the
//! sea-orm-migration [`Migrator`] in [`migrations`].

pub mod config;
pub mod connection;
pub mod migration;
pub mod migrations;

pub use config::{DatabaseConfig, redact_database_url};
pub use connection::{connect, ping};
pub use migration::{reset_database, run_migrations};
pub use migrations::Migrator;
pub use sea_orm;
