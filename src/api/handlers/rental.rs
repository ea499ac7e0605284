use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateRentalRequest;
use crate::api::dtos::responses::RentalCreatedResponse;
use crate::domain::models::client::Client;
use crate::domain::models::payment::Payment;
use crate::domain::models::rental::{NewRentalParams, Rental};
use crate::domain::services::availability::validate_range;
use crate::domain::services::pricing::{nights, total_price};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_rental(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRentalRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_range(payload.start, payload.end)?;

    state.employee_repo.find_by_nas(&payload.employee_id).await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;
    let room = state.room_repo.find_by_number(payload.room_number).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    let total = total_price(room.price, payload.start, payload.end);
    if let Some(expected) = payload.payment_amount
        && (expected - total).abs() > 0.005 {
        return Err(AppError::Validation(format!(
            "Payment amount {:.2} does not match {:.2} for the stay", expected, total
        )));
    }

    let today = Utc::now().date_naive();
    let payment = Payment::new(
        total,
        payload.payment_method.unwrap_or_else(|| "CASH".to_string()),
        today,
    );

    // Walk-ins unknown to the system get registered inside the same
    // transaction as the rental.
    let client_draft = Client::new(
        payload.client_id.clone(),
        payload.client_name.unwrap_or_default(),
        payload.client_address.unwrap_or_default(),
        today,
    );

    let rental = Rental::new(NewRentalParams {
        room_number: payload.room_number,
        client_nas: payload.client_id,
        employee_nas: payload.employee_id,
        payment_id: 0,
        start_date: payload.start,
        end_date: payload.end,
    });

    let created = state.rental_repo.create_walk_in(&rental, &payment, &client_draft).await?;
    info!("Walk-in rental created: {} for room {}", created.id, created.room_number);

    Ok(Json(RentalCreatedResponse {
        nights: nights(created.start_date, created.end_date),
        total_price: total,
        rental: created,
    }))
}

pub async fn list_rentals(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rentals = state.rental_repo.list().await?;
    Ok(Json(rentals))
}

pub async fn get_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rental = state.rental_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Rental not found".into()))?;
    Ok(Json(rental))
}
