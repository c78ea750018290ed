//! Submission endpoints: collect answers and report them paired with the
//! form's current fields.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::domain::{ResponseMap, Submission, SubmissionReport};
use crate::AppState;

/// Create the submissions router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/forms/{id}/submissions",
        post(submit_form).get(get_submissions),
    )
}

/// Submission request: field identifier to answer mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmitRequest {
    /// Collected answers keyed by field identifier.
    #[serde(default)]
    pub responses: ResponseMap,
}

/// Submission confirmation.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    /// Confirmation message.
    pub message: String,
    /// The stored submission.
    pub submission: Submission,
}

/// Submit answers for a form.
#[utoipa::path(
    post,
    path = "/forms/{id}/submissions",
    params(("id" = String, Path, description = "Form identifier")),
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Submission stored", body = SubmitResponse),
        (status = 404, description = "No such form", body = crate::api::error::ErrorBody)
    ),
    tag = "submissions"
)]
pub async fn submit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let submission = state
        .store
        .create_submission(&id, req.responses)
        .await
        .map_err(|e| ApiError::internal("Failed to submit form", e))?
        .ok_or_else(ApiError::form_not_found)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Submission successful".to_string(),
            submission,
        }),
    ))
}

/// Fetch all submissions for a form, each paired with the form's current
/// field definitions.
#[utoipa::path(
    get,
    path = "/forms/{id}/submissions",
    params(("id" = String, Path, description = "Form identifier")),
    responses(
        (status = 200, description = "Paired submissions report", body = SubmissionReport),
        (status = 404, description = "No such form", body = crate::api::error::ErrorBody)
    ),
    tag = "submissions"
)]
pub async fn get_submissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionReport>, ApiError> {
    let form = state
        .store
        .get_form(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch submissions", e))?
        .ok_or_else(ApiError::form_not_found)?;

    let submissions = state
        .store
        .list_submissions(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch submissions", e))?;

    Ok(Json(SubmissionReport::build(&form, submissions)))
}
