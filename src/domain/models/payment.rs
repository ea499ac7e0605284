use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Payment {
    pub id: i64,
    pub amount: f64,
    pub method: String,
    pub paid_on: NaiveDate,
}

impl Payment {
    pub fn new(amount: f64, method: String, paid_on: NaiveDate) -> Self {
        Self {
            id: 0,
            amount,
            method,
            paid_on,
        }
    }
}
