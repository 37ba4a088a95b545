use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::{ContactSubmission, CreditReportRequest};
use super::mailer::Mailer;
use super::service::{LeadService, LeadServiceError};

/// Router builder exposing the lead-capture forms.
pub fn lead_router<M>(service: Arc<LeadService<M>>) -> Router
where
    M: Mailer + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/leads/contact", post(contact_handler::<M>))
        .route("/api/v1/leads/credit-report", post(credit_report_handler::<M>))
        .with_state(service)
}

pub(crate) async fn contact_handler<M>(
    State(service): State<Arc<LeadService<M>>>,
    axum::Json(submission): axum::Json<ContactSubmission>,
) -> Response
where
    M: Mailer + ?Sized + 'static,
{
    match service.submit_contact(submission).await {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn credit_report_handler<M>(
    State(service): State<Arc<LeadService<M>>>,
    axum::Json(request): axum::Json<CreditReportRequest>,
) -> Response
where
    M: Mailer + ?Sized + 'static,
{
    match service.request_credit_report(request).await {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn status_for(error: &LeadServiceError) -> StatusCode {
    match error {
        LeadServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LeadServiceError::Notification(_) => StatusCode::BAD_GATEWAY,
        LeadServiceError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: LeadServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), axum::Json(payload)).into_response()
}
