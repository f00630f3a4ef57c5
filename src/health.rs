use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::AppContext;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check result for a single component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: Vec<ComponentHealth>,
}

impl IntoResponse for HealthResponse {
    fn into_response(self) -> Response {
        let status_code = match self.status {
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status_code, Json(self)).into_response()
    }
}

/// A single component check
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self) -> BoxFuture<'_, ComponentHealth>;
}

/// Reports the process itself as healthy
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicHealthCheck;

impl HealthCheck for BasicHealthCheck {
    fn name(&self) -> &str {
        "application"
    }

    fn check(&self) -> BoxFuture<'_, ComponentHealth> {
        Box::pin(async {
            ComponentHealth {
                name: self.name().to_string(),
                status: HealthStatus::Healthy,
                message: Some("Application is running".to_string()),
            }
        })
    }
}

/// Pings the course database
pub struct DatabaseHealthCheck {
    conn: DatabaseConnection,
}

impl DatabaseHealthCheck {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

impl HealthCheck for DatabaseHealthCheck {
    fn name(&self) -> &str {
        "database"
    }

    fn check(&self) -> BoxFuture<'_, ComponentHealth> {
        Box::pin(async {
            match crate::database::ping(&self.conn).await {
                Ok(()) => ComponentHealth {
                    name: self.name().to_string(),
                    status: HealthStatus::Healthy,
                    message: None,
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Database health check failed");
                    ComponentHealth {
                        name: self.name().to_string(),
                        status: HealthStatus::Unhealthy,
                        message: Some("Database unreachable".to_string()),
                    }
                }
            }
        })
    }
}

/// Runs every registered check and folds them into one status
pub struct HealthChecker {
    checks: Vec<Arc<dyn HealthCheck>>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            checks: vec![Arc::new(BasicHealthCheck)],
        }
    }

    pub fn with_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.checks.push(check);
        self
    }

    pub async fn check_health(&self) -> HealthResponse {
        let mut checks = Vec::new();
        let mut overall_status = HealthStatus::Healthy;

        for check in &self.checks {
            let result = check.check().await;

            match result.status {
                HealthStatus::Unhealthy => overall_status = HealthStatus::Unhealthy,
                HealthStatus::Degraded if overall_status == HealthStatus::Healthy => {
                    overall_status = HealthStatus::Degraded
                }
                _ => {}
            }

            checks.push(result);
        }

        HealthResponse {
            status: overall_status,
            checks,
        }
    }
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler for `GET /health`
pub async fn health_handler(State(ctx): State<AppContext>) -> HealthResponse {
    let mut checker = HealthChecker::new();
    if let Some(conn) = ctx.database_opt() {
        checker = checker.with_check(Arc::new(DatabaseHealthCheck::new(conn.clone())));
    }
    checker.check_health().await
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingCheck;

    impl HealthCheck for FailingCheck {
        fn name(&self) -> &str {
            "failing"
        }

        fn check(&self) -> BoxFuture<'_, ComponentHealth> {
            Box::pin(async {
                ComponentHealth {
                    name: "failing".to_string(),
                    status: HealthStatus::Unhealthy,
                    message: None,
                }
            })
        }
    }

    #[tokio::test]
    async fn test_basic_checker_is_healthy() {
        let response = HealthChecker::new().check_health().await;
        assert_eq!(response.status, HealthStatus::Healthy);
        assert_eq!(response.checks.len(), 1);
    }

    #[tokio::test]
    async fn test_unhealthy_component_wins() {
        let response = HealthChecker::new()
            .with_check(Arc::new(FailingCheck))
            .check_health()
            .await;
        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(
            response.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
