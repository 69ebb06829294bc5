use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{BookingId, BookingRequest, PetDescriptor};
use super::eligibility::{BookingDecision, ClassificationView};
use super::repository::{BookingRepository, PetRegistry, RepositoryError};
use super::service::{BookingIntakeService, BookingServiceError};

/// Router exposing eligibility checks and booking intake.
pub fn booking_router<R, P>(service: Arc<BookingIntakeService<R, P>>) -> Router
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    Router::new()
        .route("/api/v1/pets/classify", post(classify_handler::<R, P>))
        .route(
            "/api/v1/bookings/eligibility",
            post(eligibility_handler::<R, P>),
        )
        .route("/api/v1/bookings/review", post(review_handler::<R, P>))
        .route("/api/v1/bookings", post(submit_handler::<R, P>))
        .route("/api/v1/bookings/:booking_id", get(status_handler::<R, P>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EligibilityRequest {
    #[serde(default)]
    pub(crate) pets: Vec<PetDescriptor>,
    #[serde(default)]
    pub(crate) client_is_new: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EligibilityResponse {
    #[serde(flatten)]
    pub(crate) decision: BookingDecision,
    pub(crate) pets: Vec<ClassificationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) notice: Option<String>,
}

pub(crate) async fn classify_handler<R, P>(
    State(service): State<Arc<BookingIntakeService<R, P>>>,
    Json(pet): Json<PetDescriptor>,
) -> Json<ClassificationView>
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    Json(service.engine().classify_pet(&pet).view())
}

pub(crate) async fn eligibility_handler<R, P>(
    State(service): State<Arc<BookingIntakeService<R, P>>>,
    Json(request): Json<EligibilityRequest>,
) -> Json<EligibilityResponse>
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    let report = service
        .engine()
        .assess(&request.pets, request.client_is_new);

    Json(EligibilityResponse {
        decision: report.decision,
        pets: report.pets.iter().map(|result| result.view()).collect(),
        notice: report.notice.map(|notice| notice.message().to_string()),
    })
}

pub(crate) async fn review_handler<R, P>(
    State(service): State<Arc<BookingIntakeService<R, P>>>,
    Json(request): Json<BookingRequest>,
) -> Response
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    match service.assess(&request) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<R, P>(
    State(service): State<Arc<BookingIntakeService<R, P>>>,
    Json(request): Json<BookingRequest>,
) -> Response
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    match service.submit(request) {
        Ok(record) => (StatusCode::CREATED, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, P>(
    State(service): State<Arc<BookingIntakeService<R, P>>>,
    Path(booking_id): Path<String>,
) -> Response
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    let id = BookingId(booking_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: BookingServiceError) -> Response {
    let (status, payload) = match &err {
        BookingServiceError::Intake(violation) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": violation.to_string() }),
        ),
        BookingServiceError::BlockedPet { messages } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": "booking includes a pet we cannot board", "reasons": messages }),
        ),
        BookingServiceError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            json!({ "error": "booking already exists" }),
        ),
        BookingServiceError::Repository(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            json!({ "error": "booking not found" }),
        ),
        BookingServiceError::Repository(RepositoryError::Unavailable(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": err.to_string() }),
        ),
    };
    (status, Json(payload)).into_response()
}
