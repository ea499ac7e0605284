use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateClientRequest, UpdateClientRequest};
use crate::domain::models::client::Client;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.nas.trim().is_empty() {
        return Err(AppError::Validation("Client NAS is required".into()));
    }

    let client = Client::new(
        payload.nas,
        payload.full_name,
        payload.address,
        Utc::now().date_naive(),
    );

    let created = state.client_repo.create(&client).await?;
    info!("Client registered: {}", created.nas);
    Ok(Json(created))
}

pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let clients = state.client_repo.list().await?;
    Ok(Json(clients))
}

pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(nas): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let client = state.client_repo.find_by_nas(&nas).await?
        .ok_or(AppError::NotFound("Client not found".into()))?;
    Ok(Json(client))
}

pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Path(nas): Path<String>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut client = state.client_repo.find_by_nas(&nas).await?
        .ok_or(AppError::NotFound("Client not found".into()))?;

    if let Some(full_name) = payload.full_name { client.full_name = full_name; }
    if let Some(address) = payload.address { client.address = address; }

    let updated = state.client_repo.update(&client).await?;
    info!("Client updated: {}", updated.nas);
    Ok(Json(updated))
}

pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(nas): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.client_repo.delete(&nas).await?;
    info!("Client deleted: {}", nas);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
