use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

// The operational record of a guest occupying a room, created at check-in
// either directly (walk-in) or by converting a reservation.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Rental {
    pub id: i64,
    pub room_number: i64,
    pub client_nas: String,
    pub employee_nas: String,
    pub payment_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

pub struct NewRentalParams {
    pub room_number: i64,
    pub client_nas: String,
    pub employee_nas: String,
    pub payment_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Rental {
    pub fn new(params: NewRentalParams) -> Self {
        Self {
            id: 0,
            room_number: params.room_number,
            client_nas: params.client_nas,
            employee_nas: params.employee_nas,
            payment_id: params.payment_id,
            start_date: params.start_date,
            end_date: params.end_date,
            created_at: Utc::now(),
        }
    }
}
