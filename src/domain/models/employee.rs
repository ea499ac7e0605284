use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Employee {
    pub nas: String,
    pub full_name: String,
    pub address: String,
    pub hotel_id: i64,
    pub roles: Json<Vec<String>>,
}

impl Employee {
    pub fn new(nas: String, full_name: String, address: String, hotel_id: i64, roles: Vec<String>) -> Self {
        Self {
            nas,
            full_name,
            address,
            hotel_id,
            roles: Json(roles),
        }
    }
}
