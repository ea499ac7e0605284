use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreatePaymentRequest;
use crate::domain::models::payment::Payment;
use crate::error::AppError;
use crate::state::AppState;

// Payments are immutable once recorded; the API exposes create and read only.
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.amount < 0.0 {
        return Err(AppError::Validation("Amount cannot be negative".into()));
    }

    let payment = Payment::new(
        payload.amount,
        payload.method.unwrap_or_else(|| "CASH".to_string()),
        Utc::now().date_naive(),
    );

    let created = state.payment_repo.create(&payment).await?;
    info!("Payment recorded: {} ({:.2})", created.id, created.amount);
    Ok(Json(created))
}

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.payment_repo.list().await?;
    Ok(Json(payments))
}

pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let payment = state.payment_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Payment not found".into()))?;
    Ok(Json(payment))
}
