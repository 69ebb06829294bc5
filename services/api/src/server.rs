use crate::cli::ServeArgs;
use crate::infra::{load_engine, AppState, InMemoryBookingRepository, InMemoryPetRegistry};
use crate::routes::with_booking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use denboard::config::AppConfig;
use denboard::error::AppError;
use denboard::telemetry;
use denboard::workflows::booking::BookingIntakeService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = load_engine(&config.rules)?;
    let rules = engine.rules();
    info!(
        source = ?config.rules.path,
        blocked = rules.blocked_breed_keywords().len(),
        meet_greet = rules.meet_greet_breed_keywords().len(),
        threshold_lbs = rules.large_dog_weight_threshold_lbs(),
        "rule tables loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        rules: Arc::new(rules.clone()),
    };

    let bookings = Arc::new(InMemoryBookingRepository::default());
    let roster = config.pets.load_roster()?;
    info!(source = ?config.pets.path, pets = roster.len(), "pet roster loaded");
    let pets = Arc::new(InMemoryPetRegistry::with_roster(roster));
    let service = Arc::new(BookingIntakeService::new(bookings, pets, engine));

    let app = with_booking_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "booking eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
