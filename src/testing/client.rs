//! In-process API client fixture.

use axum::Router;

use super::scenario::{self, Scenario};

/// Hands out request scenarios against one application router
///
/// # Example
///
/// ```rust,ignore
/// let client = TestClient::new(app);
/// client.get("/api/v1/courses/").execute().await.assert_ok();
/// client.post("/api/v1/courses/")
///     .json_body(&json!({"name": "Rust"}))
///     .execute()
///     .await
///     .assert_created();
/// ```
#[derive(Clone)]
pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub fn get(&self, uri: &str) -> Scenario {
        scenario::get(self.app.clone(), uri)
    }

    pub fn post(&self, uri: &str) -> Scenario {
        scenario::post(self.app.clone(), uri)
    }

    pub fn put(&self, uri: &str) -> Scenario {
        scenario::put(self.app.clone(), uri)
    }

    pub fn patch(&self, uri: &str) -> Scenario {
        scenario::patch(self.app.clone(), uri)
    }

    pub fn delete(&self, uri: &str) -> Scenario {
        scenario::delete(self.app.clone(), uri)
    }

    /// The underlying router
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}
