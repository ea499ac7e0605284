use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateEmployeeRequest, EmployeeListQuery, UpdateEmployeeRequest};
use crate::domain::models::employee::Employee;
use crate::error::AppError;
use crate::state::AppState;

const KNOWN_ROLES: [&str; 3] = ["Manager", "Receptionist", "Housekeeping"];

fn validate_roles(roles: &[String]) -> Result<(), AppError> {
    for role in roles {
        if !KNOWN_ROLES.contains(&role.as_str()) {
            return Err(AppError::Validation(format!("Unknown role: {}", role)));
        }
    }
    Ok(())
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.nas.trim().is_empty() {
        return Err(AppError::Validation("Employee NAS is required".into()));
    }
    let roles = payload.roles.unwrap_or_default();
    validate_roles(&roles)?;

    state.hotel_repo.find_by_id(payload.hotel_id).await?
        .ok_or(AppError::NotFound("Hotel not found".into()))?;

    let employee = Employee::new(payload.nas, payload.full_name, payload.address, payload.hotel_id, roles);

    let created = state.employee_repo.create(&employee).await?;
    info!("Employee registered: {} (hotel {})", created.nas, created.hotel_id);
    Ok(Json(created))
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EmployeeListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let employees = state.employee_repo.list(params.hotel_id).await?;
    Ok(Json(employees))
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(nas): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let employee = state.employee_repo.find_by_nas(&nas).await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;
    Ok(Json(employee))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(nas): Path<String>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut employee = state.employee_repo.find_by_nas(&nas).await?
        .ok_or(AppError::NotFound("Employee not found".into()))?;

    if let Some(full_name) = payload.full_name { employee.full_name = full_name; }
    if let Some(address) = payload.address { employee.address = address; }
    if let Some(hotel_id) = payload.hotel_id {
        state.hotel_repo.find_by_id(hotel_id).await?
            .ok_or(AppError::NotFound("Hotel not found".into()))?;
        employee.hotel_id = hotel_id;
    }
    if let Some(roles) = payload.roles {
        validate_roles(&roles)?;
        employee.roles = sqlx::types::Json(roles);
    }

    let updated = state.employee_repo.update(&employee).await?;
    info!("Employee updated: {}", updated.nas);
    Ok(Json(updated))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(nas): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.employee_repo.delete(&nas).await?;
    info!("Employee deleted: {}", nas);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
