use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, chain, hotel, room, client, employee, availability, reservation, rental, payment};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Room search
        .route("/api/rooms/available", get(availability::search_available_rooms))

        // Booking flow
        .route("/api/reservations", post(reservation::create_reservation).get(reservation::list_reservations))
        .route("/api/reservations/{id}", get(reservation::get_reservation).delete(reservation::delete_reservation))
        .route("/api/reservations/{id}/confirm", post(reservation::confirm_reservation))
        .route("/api/reservations/{id}/cancel", post(reservation::cancel_reservation))
        .route("/api/reservations/{id}/convert", post(reservation::convert_reservation))

        // Check-in flow
        .route("/api/rentals", post(rental::create_rental).get(rental::list_rentals))
        .route("/api/rentals/{id}", get(rental::get_rental))

        // Admin
        .route("/api/chains", post(chain::create_chain).get(chain::list_chains))
        .route("/api/chains/{id}", get(chain::get_chain).put(chain::update_chain).delete(chain::delete_chain))
        .route("/api/hotels", post(hotel::create_hotel).get(hotel::list_hotels))
        .route("/api/hotels/{id}", get(hotel::get_hotel).put(hotel::update_hotel).delete(hotel::delete_hotel))
        .route("/api/rooms", post(room::create_room).get(room::list_rooms))
        .route("/api/rooms/{number}", get(room::get_room).put(room::update_room).delete(room::delete_room))
        .route("/api/clients", post(client::create_client).get(client::list_clients))
        .route("/api/clients/{nas}", get(client::get_client).put(client::update_client).delete(client::delete_client))
        .route("/api/employees", post(employee::create_employee).get(employee::list_employees))
        .route("/api/employees/{nas}", get(employee::get_employee).put(employee::update_employee).delete(employee::delete_employee))
        .route("/api/payments", post(payment::create_payment).get(payment::list_payments))
        .route("/api/payments/{id}", get(payment::get_payment))

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
        .with_state(state)
}
