use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
    pub id: i64,
    pub room_number: i64,
    pub client_nas: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewReservationParams {
    pub room_number: i64,
    pub client_nas: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_note: Option<String>,
}

impl Reservation {
    // The store assigns the serial id on insert.
    pub fn new(params: NewReservationParams) -> Self {
        Self {
            id: 0,
            room_number: params.room_number,
            client_nas: params.client_nas,
            start_date: params.start_date,
            end_date: params.end_date,
            guest_note: params.guest_note,
            status: "CONFIRMED".to_string(),
            created_at: Utc::now(),
        }
    }

    // PENDING and CONFIRMED reservations block the room; terminal ones never do.
    pub fn blocks_room(&self) -> bool {
        matches!(self.status.as_str(), "PENDING" | "CONFIRMED")
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "CANCELLED" | "CONVERTED")
    }
}
