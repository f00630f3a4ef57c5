//! Schema migrations for the courses database.
//!
//! # Tables
//!
//! - `courses` - Course records (`id` autoincrement, `name` text)

use sea_orm_migration::prelude::*;

pub mod m20240101_000001_create_courses;

/// Applies every migration in order
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_courses::Migration)]
    }
}
