use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateRoomRequest, RoomListQuery, UpdateRoomRequest};
use crate::domain::models::room::Room;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.price < 0.0 {
        return Err(AppError::Validation("Price cannot be negative".into()));
    }
    if payload.capacity < 1 {
        return Err(AppError::Validation("Capacity must be at least 1".into()));
    }

    let room = Room {
        number: payload.number,
        hotel_id: payload.hotel_id,
        price: payload.price,
        capacity: payload.capacity,
        area: payload.area,
        view_type: payload.view_type,
        amenities: payload.amenities.unwrap_or_default(),
        extensions_possible: payload.extensions_possible.unwrap_or(false),
        damages: payload.damages,
    };

    let created = state.room_repo.create(&room).await?;
    info!("Room created: {} (hotel {})", created.number, created.hotel_id);
    Ok(Json(created))
}

pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RoomListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = state.room_repo.list(params.hotel_id).await?;
    Ok(Json(rooms))
}

pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(number): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let room = state.room_repo.find_by_number(number).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;
    Ok(Json(room))
}

pub async fn update_room(
    State(state): State<Arc<AppState>>,
    Path(number): Path<i64>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut room = state.room_repo.find_by_number(number).await?
        .ok_or(AppError::NotFound("Room not found".into()))?;

    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err(AppError::Validation("Price cannot be negative".into()));
        }
        room.price = price;
    }
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        room.capacity = capacity;
    }
    if let Some(area) = payload.area { room.area = area; }
    if let Some(view_type) = payload.view_type { room.view_type = view_type; }
    if let Some(amenities) = payload.amenities { room.amenities = amenities; }
    if let Some(extensions) = payload.extensions_possible { room.extensions_possible = extensions; }

    if let Some(damages) = payload.damages {
        if damages.is_empty() {
            room.damages = None;
        } else {
            room.damages = Some(damages);
        }
    }

    let updated = state.room_repo.update(&room).await?;
    info!("Room updated: {}", updated.number);
    Ok(Json(updated))
}

pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Path(number): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.room_repo.delete(number).await?;
    info!("Room deleted: {}", number);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
