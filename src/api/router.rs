use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use tower_cookies::CookieManagerLayer;
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::api::handlers::{appointment, auth, calendar, health, pet, schedule, vet};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Veterinarians
        .route("/api/v1/vets", get(vet::list_vets).post(vet::create_vet))
        .route("/api/v1/vets/{vet_id}", get(vet::get_vet).put(vet::update_vet))
        .route("/api/v1/vets/{vet_id}/schedule", get(schedule::get_schedule).put(schedule::put_schedule))

        // Public booking flow
        .route("/api/v1/vets/{vet_id}/calendar", get(calendar::get_calendar))
        .route("/api/v1/vets/{vet_id}/dates", get(calendar::get_available_dates))
        .route("/api/v1/vets/{vet_id}/slots", get(calendar::get_slots))

        // Appointments
        .route("/api/v1/appointments", post(appointment::create_appointment).get(appointment::list_appointments))
        .route("/api/v1/appointments/{appointment_id}", get(appointment::get_appointment))
        .route("/api/v1/appointments/{appointment_id}/status", put(appointment::update_status))
        .route("/api/v1/appointments/{appointment_id}/cancel", post(appointment::cancel_appointment))
        .route("/api/v1/appointments/{appointment_id}/ics", get(appointment::get_appointment_ics))

        // Pets
        .route("/api/v1/pets", get(pet::list_my_pets).post(pet::create_pet))
        .route("/api/v1/pets/{pet_id}", get(pet::get_pet).put(pet::update_pet).delete(pet::delete_pet))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
