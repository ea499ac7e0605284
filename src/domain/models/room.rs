use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Room {
    pub number: i64,
    pub hotel_id: i64,
    pub price: f64,
    pub capacity: i32,
    pub area: f64,
    pub view_type: String,
    pub amenities: String,
    pub extensions_possible: bool,
    pub damages: Option<String>,
}

// A room joined with its hotel and chain, as returned by availability search.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RoomListing {
    pub number: i64,
    pub hotel_id: i64,
    pub price: f64,
    pub capacity: i32,
    pub area: f64,
    pub view_type: String,
    pub amenities: String,
    pub extensions_possible: bool,
    pub hotel_name: String,
    pub hotel_address: String,
    pub star_category: i32,
    pub chain_id: i64,
    pub chain_name: String,
}

#[derive(Debug, Default, Clone)]
pub struct RoomSearchFilters {
    pub location: Option<String>,
    pub chain: Option<String>,
    pub star_category: Option<i32>,
    pub min_capacity: Option<i32>,
    pub view_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
}
