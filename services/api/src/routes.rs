use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use denboard::workflows::booking::{
    booking_router, BookingIntakeService, BookingRepository, PetRegistry, RuleTables,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_booking_routes<R, P>(service: Arc<BookingIntakeService<R, P>>) -> axum::Router
where
    R: BookingRepository + 'static,
    P: PetRegistry + 'static,
{
    booking_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/rules", axum::routing::get(rules_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Active rule tables, so staff can confirm which policy is live.
pub(crate) async fn rules_endpoint(Extension(state): Extension<AppState>) -> Json<RuleTables> {
    Json(state.rules.as_ref().clone())
}
