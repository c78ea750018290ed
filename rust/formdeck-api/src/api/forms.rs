//! Form endpoints: create, list, fetch (by id and by share token), update,
//! delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::domain::{FieldSpec, FieldUpsert, Form, FormSummary};
use crate::AppState;

/// Create the forms router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forms", post(create_form).get(list_forms))
        .route(
            "/forms/{id}",
            get(get_form).put(update_form).delete(delete_form),
        )
        .route("/forms/share/{share_id}", get(get_form_by_share))
}

/// Form creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateFormRequest {
    /// Form title.
    pub title: String,
    /// Form description.
    #[serde(default)]
    pub description: String,
    /// Ordered field specifications.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Identifiers returned on create: the primary key and the public share
/// token for the fill-in link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormResponse {
    /// Primary identifier.
    pub id: String,
    /// Public share token.
    pub share_id: String,
}

/// Form update request. Fields with a known identifier update in place,
/// the rest insert; omitted fields are removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateFormRequest {
    /// New title.
    pub title: String,
    /// New description.
    #[serde(default)]
    pub description: String,
    /// The full replacement field set, in order.
    #[serde(default)]
    pub fields: Vec<FieldUpsert>,
}

/// Delete confirmation.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteFormResponse {
    /// Confirmation message.
    pub message: String,
}

/// Create a new form with nested fields.
#[utoipa::path(
    post,
    path = "/forms",
    request_body = CreateFormRequest,
    responses(
        (status = 201, description = "Form created", body = CreateFormResponse),
        (status = 500, description = "Store rejected the write", body = crate::api::error::ErrorBody)
    ),
    tag = "forms"
)]
pub async fn create_form(
    State(state): State<AppState>,
    Json(req): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<CreateFormResponse>), ApiError> {
    let form = state
        .store
        .create_form(req.title, req.description, req.fields)
        .await
        .map_err(|e| ApiError::internal("Failed to create form", e))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateFormResponse {
            id: form.id,
            share_id: form.share_id,
        }),
    ))
}

/// List all forms (summary projection).
#[utoipa::path(
    get,
    path = "/forms",
    responses(
        (status = 200, description = "All forms", body = [FormSummary])
    ),
    tag = "forms"
)]
pub async fn list_forms(
    State(state): State<AppState>,
) -> Result<Json<Vec<FormSummary>>, ApiError> {
    let forms = state
        .store
        .list_forms()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch forms", e))?;

    Ok(Json(forms))
}

/// Fetch a form with its fields by primary identifier.
#[utoipa::path(
    get,
    path = "/forms/{id}",
    params(("id" = String, Path, description = "Form identifier")),
    responses(
        (status = 200, description = "Form with fields", body = Form),
        (status = 404, description = "No such form", body = crate::api::error::ErrorBody)
    ),
    tag = "forms"
)]
pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Form>, ApiError> {
    state
        .store
        .get_form(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch form", e))?
        .map(Json)
        .ok_or_else(ApiError::form_not_found)
}

/// Fetch a form with its fields by public share token.
#[utoipa::path(
    get,
    path = "/forms/share/{share_id}",
    params(("share_id" = String, Path, description = "Public share token")),
    responses(
        (status = 200, description = "Form with fields", body = Form),
        (status = 404, description = "No such form", body = crate::api::error::ErrorBody)
    ),
    tag = "forms"
)]
pub async fn get_form_by_share(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Json<Form>, ApiError> {
    state
        .store
        .get_form_by_share(&share_id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch form", e))?
        .map(Json)
        .ok_or_else(ApiError::form_not_found)
}

/// Update a form's title, description, and field set.
#[utoipa::path(
    put,
    path = "/forms/{id}",
    params(("id" = String, Path, description = "Form identifier")),
    request_body = UpdateFormRequest,
    responses(
        (status = 200, description = "Updated form with fields", body = Form),
        (status = 404, description = "No such form", body = crate::api::error::ErrorBody)
    ),
    tag = "forms"
)]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFormRequest>,
) -> Result<Json<Form>, ApiError> {
    state
        .store
        .update_form(&id, req.title, req.description, req.fields)
        .await
        .map_err(|e| ApiError::internal("Failed to update form", e))?
        .map(Json)
        .ok_or_else(ApiError::form_not_found)
}

/// Delete a form, its fields, and its submissions.
#[utoipa::path(
    delete,
    path = "/forms/{id}",
    params(("id" = String, Path, description = "Form identifier")),
    responses(
        (status = 200, description = "Form deleted", body = DeleteFormResponse),
        (status = 404, description = "No such form", body = crate::api::error::ErrorBody)
    ),
    tag = "forms"
)]
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteFormResponse>, ApiError> {
    let deleted = state
        .store
        .delete_form(&id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete form", e))?;

    if deleted {
        Ok(Json(DeleteFormResponse {
            message: "Form deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::form_not_found())
    }
}
