use axum::{extract::{Query, State}, response::IntoResponse, Json};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::AvailabilityQuery;
use crate::domain::models::room::RoomSearchFilters;
use crate::domain::services::availability::{filter_available, validate_range};
use crate::error::AppError;
use crate::state::AppState;

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} date (expected YYYY-MM-DD)", field)))
}

// "any" or an empty value on a select box means no constraint.
fn text_filter(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("any"))
}

fn numeric_filter<T: std::str::FromStr>(value: Option<String>, field: &str) -> Result<Option<T>, AppError> {
    match text_filter(value) {
        Some(raw) => raw.parse::<T>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid {} filter", field))),
        None => Ok(None),
    }
}

pub async fn search_available_rooms(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start = parse_date(&params.start, "start")?;
    let end = parse_date(&params.end, "end")?;
    validate_range(start, end)?;

    let filters = RoomSearchFilters {
        location: text_filter(params.location),
        chain: text_filter(params.chain),
        star_category: numeric_filter(params.stars, "stars")?,
        min_capacity: numeric_filter(params.capacity, "capacity")?,
        view_type: text_filter(params.view),
        min_price: numeric_filter(params.min_price, "min_price")?,
        max_price: numeric_filter(params.max_price, "max_price")?,
        min_area: numeric_filter(params.min_area, "min_area")?,
        max_area: numeric_filter(params.max_area, "max_area")?,
    };

    let rooms = state.room_repo.search(&filters).await?;
    let reservations = state.reservation_repo.list_blocking_in_range(start, end).await?;
    let rentals = state.rental_repo.list_in_range(start, end).await?;

    let available = filter_available(rooms, &reservations, &rentals, start, end);
    info!("Availability search {} to {}: {} rooms free", start, end, available.len());

    Ok(Json(available))
}
