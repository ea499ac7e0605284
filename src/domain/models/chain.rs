use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Chain {
    pub id: i64,
    pub name: String,
    pub head_office_address: String,
    pub contact_emails: Json<Vec<String>>,
    pub contact_phones: Json<Vec<String>>,
    pub hotel_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Chain {
    pub fn new(
        name: String,
        head_office_address: String,
        contact_emails: Vec<String>,
        contact_phones: Vec<String>,
    ) -> Self {
        Self {
            id: 0,
            name,
            head_office_address,
            contact_emails: Json(contact_emails),
            contact_phones: Json(contact_phones),
            hotel_count: 0,
            created_at: Utc::now(),
        }
    }
}
