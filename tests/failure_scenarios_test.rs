use axum::response::IntoResponse;
use courses_api::{ApiError, AppContext, ConfigBuilder};

async fn body_json(error: ApiError) -> (u16, serde_json::Value) {
    let response = error.into_response();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_config_validation_failures() {
    // Test invalid server address
    let result = ConfigBuilder::new()
        .with_host("invalid..host")
        .with_port(8000)
        .build();

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Invalid server address")
    );

    // Test invalid log level
    let result = ConfigBuilder::new().with_log_level("invalid_level").build();

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid log level"));

    // Test zero port
    let result = ConfigBuilder::new().with_port(0).build();

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Server port must be greater than 0")
    );

    // Test empty database url
    let result = ConfigBuilder::new().with_database_url("  ").build();
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Database URL must not be empty")
    );
}

#[tokio::test]
async fn test_error_response_format() {
    let (status, body) = body_json(ApiError::field("name", "This field is required.")).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["field_errors"]["name"][0], "This field is required.");
    assert!(body["error_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_not_found_has_no_field_errors() {
    let (status, body) = body_json(ApiError::not_found("Course 9 not found")).await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not found: Course 9 not found");
    assert!(body.get("field_errors").is_none());
}

#[tokio::test]
async fn test_server_errors_hide_details() {
    let (status, body) = body_json(ApiError::Database("disk I/O error".into())).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Database error");

    let (status, body) = body_json(ApiError::from(anyhow::anyhow!("secret detail"))).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_unsupported_media_type_status() {
    let (status, _) = body_json(ApiError::unsupported_media_type("text/plain")).await;
    assert_eq!(status, 415);
}

#[tokio::test]
async fn test_app_context_missing_database() {
    let ctx = AppContext::new();

    assert!(ctx.database().is_err());
    assert!(ctx.database_opt().is_none());
}
