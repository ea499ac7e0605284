use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateHotelRequest, HotelListQuery, UpdateHotelRequest};
use crate::domain::models::hotel::Hotel;
use crate::error::AppError;
use crate::state::AppState;

fn validate_star_category(stars: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&stars) {
        return Err(AppError::Validation("Star category must be between 1 and 5".into()));
    }
    Ok(())
}

pub async fn create_hotel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateHotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Hotel name is required".into()));
    }
    validate_star_category(payload.star_category)?;

    let hotel = Hotel::new(payload.chain_id, payload.name, payload.address, payload.star_category);

    let created = state.hotel_repo.create(&hotel).await?;
    info!("Hotel created: {} (chain {})", created.id, created.chain_id);
    Ok(Json(created))
}

pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HotelListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hotels = state.hotel_repo.list(params.chain_id).await?;
    Ok(Json(hotels))
}

pub async fn get_hotel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let hotel = state.hotel_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Hotel not found".into()))?;
    Ok(Json(hotel))
}

pub async fn update_hotel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateHotelRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut hotel = state.hotel_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Hotel not found".into()))?;

    if let Some(name) = payload.name { hotel.name = name; }
    if let Some(address) = payload.address { hotel.address = address; }
    if let Some(stars) = payload.star_category {
        validate_star_category(stars)?;
        hotel.star_category = stars;
    }

    let updated = state.hotel_repo.update(&hotel).await?;
    info!("Hotel updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_hotel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.hotel_repo.delete(id).await?;
    info!("Hotel deleted: {}", id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
