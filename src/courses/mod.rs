//! The courses resource: entity, persistence, handlers and routes.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/v1/courses/` | 200, list (filters: `id`, `name`) |
//! | POST | `/api/v1/courses/` | 201, created course |
//! | GET | `/api/v1/courses/{id}/` | 200, course |
//! | PATCH | `/api/v1/courses/{id}/` | 200, updated course |
//! | PUT | `/api/v1/courses/{id}/` | 200, updated course |
//! | DELETE | `/api/v1/courses/{id}/` | 204, empty |

pub mod entity;
pub mod handlers;
pub mod store;

use axum::{Router, routing::get};

use crate::app::AppContext;
use crate::http::RouteModule;

pub use store::{Course, CourseFilter};

/// Prefix every course route is mounted under
pub const API_PREFIX: &str = "/api/v1";

/// Collection endpoint, including the prefix
pub fn collection_path() -> String {
    format!("{}/courses/", API_PREFIX)
}

/// Item endpoint for `id`, including the prefix
pub fn item_path(id: i32) -> String {
    format!("{}/courses/{}/", API_PREFIX, id)
}

/// Route module exposing the courses API
pub struct CoursesModule;

impl RouteModule for CoursesModule {
    fn routes(&self) -> Router<AppContext> {
        Router::new()
            .route(
                "/courses/",
                get(handlers::list_courses).post(handlers::create_course),
            )
            .route(
                "/courses/{id}/",
                get(handlers::retrieve_course)
                    .patch(handlers::partial_update_course)
                    .put(handlers::update_course)
                    .delete(handlers::destroy_course),
            )
    }

    fn prefix(&self) -> Option<&str> {
        Some(API_PREFIX)
    }
}
