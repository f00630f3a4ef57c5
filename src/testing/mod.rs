//! Testing utilities for the courses API
//!
//! - Alba-style HTTP endpoint testing without running a server
//! - Isolated SQLite in-memory databases with the course schema
//! - A course factory and random-data helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use courses_api::testing::{CourseFactory, TestDb, test_client};
//!
//! #[tokio::test]
//! async fn test_get_one_course() {
//!     let db = TestDb::new().await.unwrap();
//!     let client = test_client(&db);
//!     let course = CourseFactory::new(&db.connection).create().await.unwrap();
//!
//!     client
//!         .get(&courses_api::courses::item_path(course.id))
//!         .execute()
//!         .await
//!         .assert_ok();
//! }
//! ```

mod client;
mod database;
mod fixtures;
mod scenario;

pub use client::TestClient;
pub use database::TestDb;
pub use fixtures::{CourseFactory, SAMPLE_COURSE_NAME, fake, one_course};
pub use scenario::{Scenario, ScenarioAssert, delete, get, patch, post, put};

use axum::Router;

use crate::app::AppContext;
use crate::core::App;
use crate::courses::CoursesModule;

/// Full application router (courses + health) backed by `db`
pub fn course_app(db: &TestDb) -> Router {
    App::builder()
        .with_context(AppContext::builder().with_database(db.connection()).build())
        .register_module(CoursesModule)
        .build()
        .into_test_router()
}

/// API client fixture for the application backed by `db`
pub fn test_client(db: &TestDb) -> TestClient {
    TestClient::new(course_app(db))
}
