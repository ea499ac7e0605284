use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateChainRequest, UpdateChainRequest};
use crate::domain::models::chain::Chain;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_chain(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateChainRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Chain name is required".into()));
    }

    let chain = Chain::new(
        payload.name,
        payload.head_office_address,
        payload.contact_emails.unwrap_or_default(),
        payload.contact_phones.unwrap_or_default(),
    );

    let created = state.chain_repo.create(&chain).await?;
    info!("Chain created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_chains(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let chains = state.chain_repo.list().await?;
    Ok(Json(chains))
}

pub async fn get_chain(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let chain = state.chain_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Chain not found".into()))?;
    Ok(Json(chain))
}

pub async fn update_chain(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateChainRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut chain = state.chain_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Chain not found".into()))?;

    if let Some(name) = payload.name { chain.name = name; }
    if let Some(address) = payload.head_office_address { chain.head_office_address = address; }
    if let Some(emails) = payload.contact_emails { chain.contact_emails = sqlx::types::Json(emails); }
    if let Some(phones) = payload.contact_phones { chain.contact_phones = sqlx::types::Json(phones); }

    let updated = state.chain_repo.update(&chain).await?;
    info!("Chain updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_chain(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.chain_repo.delete(id).await?;
    info!("Chain deleted: {}", id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
