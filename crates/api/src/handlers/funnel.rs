//! Public contact and newsletter endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::actions::contact::{submit_contact, ContactInput};
use crate::actions::newsletter::{subscribe_newsletter, SubscribeInput};
use crate::actions::{parse_payload, ActionResult};
use crate::state::AppState;

/// POST /api/contact
pub async fn contact(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = match parse_payload::<ContactInput>(payload) {
        Ok(input) => submit_contact(&state, input).await,
        Err(e) => ActionResult::Failure(e),
    };
    result.into_response_with(StatusCode::CREATED)
}

/// POST /api/newsletter
pub async fn newsletter(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = match parse_payload::<SubscribeInput>(payload) {
        Ok(input) => subscribe_newsletter(&state, input).await,
        Err(e) => ActionResult::Failure(e),
    };
    result.into_response_with(StatusCode::CREATED)
}
