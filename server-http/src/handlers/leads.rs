use crate::models::{ErrorResponse, LeadRequest, SubmitResponse};
use crate::state::AppState;
use crate::validation;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};
use waitlist::submission::SubmissionPolicy;

/// POST /api/leads
///
/// Provider failures are masked behind a success response under the fail-open
/// policy; the true outcome is only visible in server logs.
pub async fn submit_lead(
    State(state): State<AppState>,
    Json(req): Json<LeadRequest>,
) -> Response {
    let lead = match validation::validate(req) {
        Ok(lead) => lead,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(err.to_string())),
            )
                .into_response();
        }
    };

    info!(company = %lead.company, "lead submission received");

    let Some(service) = state.leads.as_ref() else {
        error!("FLODESK_API_KEY is not set");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Server configuration error")),
        )
            .into_response();
    };

    match service.submit(&lead).await {
        Ok(()) => (StatusCode::OK, Json(SubmitResponse::thanks())).into_response(),
        Err(err) => {
            error!("Subscriber upsert failed: {}", err);
            match state.policy {
                SubmissionPolicy::FailOpen => {
                    (StatusCode::OK, Json(SubmitResponse::thanks())).into_response()
                }
                SubmissionPolicy::Strict => (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::new("Upstream provider error")),
                )
                    .into_response(),
            }
        }
    }
}
