//! Server actions: validated mutations that always answer with an envelope.
//!
//! Every action returns [`ActionResult`], serialized as
//! `{"success": true, "data": ...}` or
//! `{"success": false, "error": ..., "code": ..., "details"?: ...}`.
//! Storage errors are logged here and never leak past this module.

pub mod auth;
pub mod blog;
pub mod contact;
pub mod newsletter;
pub mod project;

use atelier_core::error::CoreError;
use atelier_core::slug::validate_slug;
use atelier_core::validation::{field_errors, FieldErrors};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use validator::Validate;

use crate::error::{conflict_message, unique_violation};

/// Message shown to clients for any storage or unexpected failure.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// Why an action did not succeed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    /// Input failed validation. `details` maps field names to messages.
    #[error("{message}")]
    Validation {
        message: String,
        details: FieldErrors,
    },

    /// A uniqueness rule or state rule was violated.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Storage or unexpected failure. The message is safe to show.
    #[error("{0}")]
    Internal(String),
}

impl ActionError {
    /// Validation failure carrying per-field messages.
    pub fn validation(details: FieldErrors) -> Self {
        ActionError::Validation {
            message: "Please correct the highlighted fields".to_string(),
            details,
        }
    }

    /// Validation failure for a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut details = FieldErrors::new();
        details.insert(field.to_string(), vec![message.into()]);
        Self::validation(details)
    }

    pub fn internal() -> Self {
        ActionError::Internal(GENERIC_FAILURE.to_string())
    }

    pub fn code(&self) -> &'static str {
        match self {
            ActionError::Validation { .. } => "VALIDATION_ERROR",
            ActionError::Conflict(_) => "CONFLICT",
            ActionError::NotFound(_) => "NOT_FOUND",
            ActionError::Unauthorized(_) => "UNAUTHORIZED",
            ActionError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ActionError::Validation { .. } => StatusCode::BAD_REQUEST,
            ActionError::Conflict(_) => StatusCode::CONFLICT,
            ActionError::NotFound(_) => StatusCode::NOT_FOUND,
            ActionError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ActionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ActionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { entity, id } => {
                ActionError::NotFound(format!("{entity} with id {id} not found"))
            }
            CoreError::SlugNotFound { entity, slug } => {
                ActionError::NotFound(format!("{entity} '{slug}' not found"))
            }
            CoreError::Validation(msg) => ActionError::Validation {
                message: msg,
                details: FieldErrors::new(),
            },
            CoreError::Conflict(msg) => ActionError::Conflict(msg),
            CoreError::Unauthorized(msg) => ActionError::Unauthorized(msg),
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error in action");
                ActionError::internal()
            }
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ActionResult::<()>::Failure(self))).into_response()
    }
}

/// Outcome of a server action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success(T),
    Failure(ActionError),
}

impl<T> ActionResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    /// Respond with `success_status` on success or the error's status
    /// otherwise. The body is always the envelope.
    pub fn into_response_with(self, success_status: StatusCode) -> Response
    where
        T: Serialize,
    {
        let status = match &self {
            ActionResult::Success(_) => success_status,
            ActionResult::Failure(err) => err.status(),
        };
        (status, Json(self)).into_response()
    }
}

impl<T> From<Result<T, ActionError>> for ActionResult<T> {
    fn from(result: Result<T, ActionError>) -> Self {
        match result {
            Ok(data) => ActionResult::Success(data),
            Err(err) => ActionResult::Failure(err),
        }
    }
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ActionResult::Success(data) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            ActionResult::Failure(err) => {
                let details = match err {
                    ActionError::Validation { details, .. } if !details.is_empty() => {
                        Some(details)
                    }
                    _ => None,
                };
                let len = if details.is_some() { 4 } else { 3 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", &err.to_string())?;
                map.serialize_entry("code", err.code())?;
                if let Some(details) = details {
                    map.serialize_entry("details", details)?;
                }
                map.end()
            }
        }
    }
}

/// Classify storage errors at the action boundary.
pub(crate) trait StorageResultExt<T> {
    /// Map a unique violation to [`ActionError::Conflict`] and anything else
    /// to a logged [`ActionError::Internal`].
    fn storage(self, context: &'static str) -> Result<T, ActionError>;
}

impl<T> StorageResultExt<T> for Result<T, sqlx::Error> {
    fn storage(self, context: &'static str) -> Result<T, ActionError> {
        self.map_err(|err| {
            if let Some(constraint) = unique_violation(&err) {
                tracing::info!(context, constraint = %constraint, "Unique constraint violated");
                return ActionError::Conflict(conflict_message(&constraint));
            }
            tracing::error!(context, error = %err, "Storage error in action");
            ActionError::internal()
        })
    }
}

/// Run derive-based validation, reporting failures per field.
pub(crate) fn validate_input<T: Validate>(input: &T) -> Result<(), ActionError> {
    input
        .validate()
        .map_err(|errors| ActionError::validation(field_errors(&errors)))
}

/// Decode a JSON request body into an action input.
///
/// Malformed JSON and type mismatches become validation failures keyed
/// under `body`, so callers see the same envelope as for field errors.
pub fn parse_payload<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ActionError> {
    let Json(value) =
        payload.map_err(|rejection| ActionError::invalid_field("body", rejection.body_text()))?;
    serde_json::from_value(value).map_err(|err| ActionError::invalid_field("body", err.to_string()))
}

/// Check a resolved slug, reporting failures against the `slug` field.
pub(crate) fn checked_slug(slug: String) -> Result<String, ActionError> {
    match validate_slug(&slug) {
        Ok(()) => Ok(slug),
        Err(CoreError::Validation(msg)) => Err(ActionError::invalid_field("slug", msg)),
        Err(other) => Err(other.into()),
    }
}

/// Trim a string in place.
pub(crate) fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim an optional string, turning blank values into `None`.
pub(crate) fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim each entry and drop blanks.
pub(crate) fn trim_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| trim_optional(Some(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn success_envelope() {
        let result: ActionResult<_> = Ok::<_, ActionError>(json!({"id": 1})).into();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "data": {"id": 1}})
        );
    }

    #[test]
    fn validation_envelope_carries_details() {
        let result = ActionResult::<()>::Failure(ActionError::invalid_field(
            "email",
            "Must be a valid email address",
        ));
        let body = serde_json::to_value(&result).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["email"][0], "Must be a valid email address");
    }

    #[test]
    fn conflict_envelope_has_no_details() {
        let result = ActionResult::<()>::Failure(ActionError::Conflict(
            "This email is already subscribed".into(),
        ));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": false,
                "error": "This email is already subscribed",
                "code": "CONFLICT",
            })
        );
    }

    #[test]
    fn statuses_follow_kind() {
        assert_eq!(ActionError::internal().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ActionError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ActionError::validation(FieldErrors::new()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn non_unique_storage_errors_are_generic() {
        let result: Result<(), _> = Err::<(), _>(sqlx::Error::PoolTimedOut).storage("test");
        assert_matches!(result, Err(ActionError::Internal(msg)) if msg == GENERIC_FAILURE);
    }

    #[test]
    fn core_errors_map_to_action_kinds() {
        let err: ActionError = CoreError::Conflict("Submission is already archived".into()).into();
        assert_matches!(err, ActionError::Conflict(_));

        let err: ActionError = CoreError::NotFound { entity: "Project", id: 7 }.into();
        assert_eq!(err.to_string(), "Project with id 7 not found");
    }

    #[test]
    fn payload_type_errors_are_validation_failures() {
        #[derive(Debug, serde::Deserialize)]
        struct Input {
            #[allow(dead_code)]
            email: String,
        }
        let err = parse_payload::<Input>(Ok(Json(json!({"email": 5})))).unwrap_err();
        assert_matches!(
            err,
            ActionError::Validation { details, .. } if details.contains_key("body")
        );
    }

    #[test]
    fn slug_errors_are_field_errors() {
        assert_eq!(checked_slug("my-post".into()), Ok("my-post".to_string()));
        assert_matches!(
            checked_slug(String::new()),
            Err(ActionError::Validation { details, .. }) if details.contains_key("slug")
        );
    }

    #[test]
    fn trims_optional_and_lists() {
        assert_eq!(trim_optional(Some("  ".into())), None);
        assert_eq!(trim_optional(Some(" Acme ".into())), Some("Acme".into()));
        assert_eq!(trim_list(vec![" rust ".into(), "".into()]), vec!["rust".to_string()]);
    }
}
