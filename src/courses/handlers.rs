//! HTTP handlers for the courses collection and item endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use super::item_path;
use super::store::{self, Course, CourseFilter};
use crate::app::AppContext;
use crate::error::{ApiError, Result};
use crate::http::{CreatedResponse, NoContentResponse, Payload};

/// Longest accepted course name, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Raw `?id=..&name=..` query; empty values mean "no filter"
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ListParams {
    /// Filter for these params; `None` when no course can match them
    ///
    /// Ids are compared as 64-bit integers. Whole numbers beyond that range
    /// simply match nothing; anything that is not a whole number is rejected.
    pub fn into_filter(self) -> Result<Option<CourseFilter>> {
        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) if is_whole_number(raw) => return Ok(None),
                Err(_) => return Err(ApiError::field("id", "Enter a number.")),
            },
        };
        let name = self.name.filter(|name| !name.is_empty());

        Ok(Some(CourseFilter { id, name }))
    }
}

fn is_whole_number(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Body of create/update requests
///
/// `name` is `Some(None)` when the client sent an explicit `null`.
#[derive(Debug, Default, Deserialize)]
pub struct CourseInput {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl CourseInput {
    /// Trimmed name, if a non-null one was sent
    pub fn name(&self) -> Option<String> {
        self.name
            .as_ref()
            .and_then(Option::as_deref)
            .map(|name| name.trim().to_string())
    }

    /// Trimmed name, or a field error when it is missing
    pub fn required_name(&self) -> Result<String> {
        self.name()
            .ok_or_else(|| ApiError::field("name", "This field is required."))
    }
}

impl Validate for CourseInput {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let error = match &self.name {
            None => None,
            Some(None) => Some(
                ValidationError::new("null")
                    .with_message(Cow::Borrowed("This field may not be null.")),
            ),
            Some(Some(name)) => validate_course_name(name).err(),
        };

        match error {
            None => Ok(()),
            Some(error) => {
                let mut errors = ValidationErrors::new();
                errors.add("name", error);
                Err(errors)
            }
        }
    }
}

fn validate_course_name(name: &str) -> std::result::Result<(), ValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("This field may not be blank.")));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new("max_length").with_message(Cow::Owned(format!(
            "Ensure this field has no more than {} characters.",
            MAX_NAME_LENGTH
        ))));
    }

    Ok(())
}

/// Item ids that are not integers cannot match any course
fn parse_course_id(raw: &str) -> Result<i32> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("Course {} not found", raw)))
}

fn course_not_found(id: i32) -> ApiError {
    ApiError::not_found(format!("Course {} not found", id))
}

/// `GET /courses/` with optional `id` / `name` filters
pub async fn list_courses(
    State(ctx): State<AppContext>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Course>>> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let Some(filter) = params.into_filter()? else {
        return Ok(Json(Vec::new()));
    };

    let courses = store::list(ctx.database()?, &filter).await?;
    Ok(Json(courses))
}

/// `GET /courses/{id}/`
pub async fn retrieve_course(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<Course>> {
    let id = parse_course_id(&raw_id)?;

    let course = store::find(ctx.database()?, id)
        .await?
        .ok_or_else(|| course_not_found(id))?;
    Ok(Json(course))
}

/// `POST /courses/`
pub async fn create_course(
    State(ctx): State<AppContext>,
    Payload(input): Payload<CourseInput>,
) -> Result<CreatedResponse<Course>> {
    let name = input.required_name()?;

    let course = store::create(ctx.database()?, name).await?;
    tracing::info!(course_id = course.id, "Course created");

    let location = item_path(course.id);
    Ok(CreatedResponse::new(course, location))
}

/// `PATCH /courses/{id}/`: a body without `name` leaves the course unchanged
pub async fn partial_update_course(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
    Payload(input): Payload<CourseInput>,
) -> Result<Json<Course>> {
    let id = parse_course_id(&raw_id)?;
    let db = ctx.database()?;

    let course = match input.name() {
        Some(name) => store::update_name(db, id, name).await?,
        None => store::find(db, id).await?,
    }
    .ok_or_else(|| course_not_found(id))?;

    tracing::info!(course_id = course.id, "Course updated");
    Ok(Json(course))
}

/// `PUT /courses/{id}/`
pub async fn update_course(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
    Payload(input): Payload<CourseInput>,
) -> Result<Json<Course>> {
    let id = parse_course_id(&raw_id)?;
    let name = input.required_name()?;

    let course = store::update_name(ctx.database()?, id, name)
        .await?
        .ok_or_else(|| course_not_found(id))?;

    tracing::info!(course_id = course.id, "Course replaced");
    Ok(Json(course))
}

/// `DELETE /courses/{id}/`
pub async fn destroy_course(
    State(ctx): State<AppContext>,
    Path(raw_id): Path<String>,
) -> Result<NoContentResponse> {
    let id = parse_course_id(&raw_id)?;

    if !store::delete(ctx.database()?, id).await? {
        return Err(course_not_found(id));
    }

    tracing::info!(course_id = id, "Course deleted");
    Ok(NoContentResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_mean_no_filter() {
        let params = ListParams {
            id: Some(String::new()),
            name: Some(String::new()),
        };
        assert_eq!(params.into_filter().unwrap(), Some(CourseFilter::default()));
    }

    #[test]
    fn test_id_param_parsed() {
        let params = ListParams {
            id: Some("12".into()),
            name: None,
        };
        assert_eq!(params.into_filter().unwrap(), Some(CourseFilter::by_id(12)));
    }

    #[test]
    fn test_large_id_param_is_kept_as_i64() {
        let params = ListParams {
            id: Some("99999999999".into()),
            name: None,
        };
        assert_eq!(
            params.into_filter().unwrap(),
            Some(CourseFilter::by_id(99_999_999_999_i64))
        );
    }

    #[test]
    fn test_id_param_beyond_i64_matches_nothing() {
        let params = ListParams {
            id: Some("123456789012345678901234567890".into()),
            name: None,
        };
        assert_eq!(params.into_filter().unwrap(), None);
    }

    #[test]
    fn test_non_numeric_id_param_rejected() {
        let params = ListParams {
            id: Some("abc".into()),
            name: None,
        };
        assert!(matches!(params.into_filter(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_course_name("Rust").is_ok());
        assert!(validate_course_name("   ").is_err());
        assert!(validate_course_name(&"x".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_course_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_input_trims_name() {
        let input = CourseInput {
            name: Some(Some("  Java course ".into())),
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.required_name().unwrap(), "Java course");
    }

    #[test]
    fn test_missing_name_required() {
        let input = CourseInput::default();
        assert!(input.validate().is_ok());
        assert!(input.name().is_none());
        assert!(matches!(input.required_name(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let input = CourseInput {
            name: Some(Some("".into())),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_null_name_fails_validation() {
        let input: CourseInput = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(input.name, Some(None));

        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_absent_name_deserializes_to_none() {
        let input: CourseInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.name, None);
    }

    #[test]
    fn test_parse_course_id() {
        assert_eq!(parse_course_id("5").unwrap(), 5);
        assert!(matches!(parse_course_id("five"), Err(ApiError::NotFound(_))));
    }
}
