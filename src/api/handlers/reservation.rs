use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{ConvertReservationRequest, CreateReservationRequest};
use crate::api::dtos::responses::ReservationCreatedResponse;
use crate::domain::models::reservation::{NewReservationParams, Reservation};
use crate::domain::services::availability::validate_range;
use crate::domain::services::pricing::{nights, total_price};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_range(payload.start, payload.end)?;

    state.client_repo.find_by_nas(&payload.client_id).await?
        .ok_or(AppError::NotFound("Client not found".into()))?;
    let room = state.room_repo.find_by_number(payload.room_number).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    if let Some(ref method) = payload.payment_method {
        // Payment is simulated at booking time; nothing is charged or stored.
        info!("Reservation payment method declared: {}", method);
    }

    let reservation = Reservation::new(NewReservationParams {
        room_number: payload.room_number,
        client_nas: payload.client_id,
        start_date: payload.start,
        end_date: payload.end,
        guest_note: payload.guest_details,
    });

    // The repository re-runs the overlap test inside the insert transaction.
    let created = state.reservation_repo.create_if_available(&reservation).await?;
    info!("Reservation created: {} for room {}", created.id, created.room_number);

    Ok(Json(ReservationCreatedResponse {
        nights: nights(created.start_date, created.end_date),
        total_price: total_price(room.price, created.start_date, created.end_date),
        reservation: created,
    }))
}

pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservation_repo.list().await?;
    Ok(Json(reservations))
}

pub async fn get_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;
    Ok(Json(reservation))
}

pub async fn confirm_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let confirmed = state.reservation_repo.confirm(id).await?;
    info!("Reservation confirmed: {}", confirmed.id);
    Ok(Json(confirmed))
}

pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.reservation_repo.cancel(id).await?;
    info!("Reservation cancelled: {}", cancelled.id);
    Ok(Json(cancelled))
}

pub async fn convert_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<ConvertReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    // Conversion is a check-in action: a stay that already ended stays a
    // reservation. In-progress stays still convert (late check-in).
    if reservation.end_date < Utc::now().date_naive() {
        return Err(AppError::Validation("Reservation dates have already passed".into()));
    }

    state.employee_repo.find_by_nas(&payload.employee_id).await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;
    state.payment_repo.find_by_id(payload.payment_id).await?
        .ok_or(AppError::NotFound("Payment not found".into()))?;

    // Status is re-checked inside the conversion transaction.
    let rental = state.reservation_repo.convert(id, &payload.employee_id, payload.payment_id).await?;
    info!("Reservation {} converted to rental {}", id, rental.id);
    Ok(Json(rental))
}

pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.reservation_repo.delete(id).await?;
    info!("Reservation archived and deleted: {}", id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
