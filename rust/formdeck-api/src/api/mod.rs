//! HTTP API endpoints.

pub mod error;
pub mod forms;
pub mod health;
pub mod submissions;

use axum::Router;
use utoipa::OpenApi;

use crate::AppState;

/// Create the API router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(forms::router())
        .merge(submissions::router())
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Formdeck API",
        version = "0.1.0",
        description = "Form builder REST API - create, share, and collect form submissions",
        license(name = "MIT")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        forms::create_form,
        forms::list_forms,
        forms::get_form,
        forms::get_form_by_share,
        forms::update_form,
        forms::delete_form,
        submissions::submit_form,
        submissions::get_submissions,
    ),
    components(schemas(
        error::ErrorBody,
        health::HealthResponse,
        health::ReadinessResponse,
        forms::CreateFormRequest,
        forms::CreateFormResponse,
        forms::UpdateFormRequest,
        forms::DeleteFormResponse,
        submissions::SubmitRequest,
        submissions::SubmitResponse,
        crate::domain::Form,
        crate::domain::FormSummary,
        crate::domain::Field,
        crate::domain::FieldKind,
        crate::domain::FieldType,
        crate::domain::FieldSpec,
        crate::domain::FieldUpsert,
        crate::domain::ChoiceOption,
        crate::domain::Answer,
        crate::domain::Submission,
        crate::domain::SubmissionReport,
        crate::domain::SubmissionDetail,
        crate::domain::PairedAnswer,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forms", description = "Form management and sharing"),
        (name = "submissions", description = "Submission collection and reporting")
    )
)]
pub struct ApiDoc;
