use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Hotel {
    pub id: i64,
    pub chain_id: i64,
    pub name: String,
    pub address: String,
    pub star_category: i32,
    pub room_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Hotel {
    pub fn new(chain_id: i64, name: String, address: String, star_category: i32) -> Self {
        Self {
            id: 0,
            chain_id,
            name,
            address,
            star_category,
            room_count: 0,
            created_at: Utc::now(),
        }
    }
}
