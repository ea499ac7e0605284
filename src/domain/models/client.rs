use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Client {
    pub nas: String,
    pub full_name: String,
    pub address: String,
    pub registered_on: NaiveDate,
}

impl Client {
    pub fn new(nas: String, full_name: String, address: String, registered_on: NaiveDate) -> Self {
        Self {
            nas,
            full_name,
            address,
            registered_on,
        }
    }
}
