//! Courses API - a small REST service for managing courses
//!
//! Built on Axum and Tokio with SeaORM over SQLite. Courses are exposed under
//! `/api/v1/courses/` with list filters, create, retrieve, update and delete.
//!
//! # Features
//!
//! - **HTTP**: Axum routing, JSON or form-encoded request bodies
//! - **Database**: SeaORM persistence with sea-orm-migration schema
//! - **Health Checks**: `GET /health` with a database ping
//! - **Testing**: Alba-style HTTP testing utilities and isolated test databases
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use courses_api::{App, AppContext, ConfigBuilder, CoursesModule, database};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigBuilder::new().from_env().build()?;
//!     courses_api::init_tracing_with_config(&config);
//!
//!     let db = database::connect(&config.database).await?;
//!     database::run_migrations::<database::Migrator>(&db).await?;
//!
//!     App::with_config(config)
//!         .with_context(AppContext::builder().with_database(db).build())
//!         .register_module(CoursesModule)
//!         .serve()
//!         .await?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod core;
pub mod courses;
pub mod database;
mod error;
pub mod health;
pub mod http;
pub mod testing;
pub mod utils;

// Re-exports for public API
pub use app::{AppContext, AppContextBuilder};
pub use config::{Config, ConfigBuilder, LoggingConfig, ServerConfig};
pub use crate::core::{App, AppBuilder};
pub use courses::{Course, CourseFilter, CoursesModule};
pub use error::{ApiError, ErrorResponse, Result};
pub use health::{ComponentHealth, HealthCheck, HealthChecker, HealthStatus};
pub use http::{CreatedResponse, NoContentResponse, Payload, RouteModule};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging with sensible defaults
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "courses_api=debug")
/// - `COURSES_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("COURSES_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    install_subscriber(env_filter, json_logs);
}

/// Initialize tracing from the logging section of a [`Config`]
///
/// `RUST_LOG` still wins over `config.logging.level` when it is set.
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    install_subscriber(env_filter, config.logging.json);
}

fn install_subscriber(env_filter: EnvFilter, json: bool) {
    // try_init: a second call (e.g. from tests) keeps the first subscriber
    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}
