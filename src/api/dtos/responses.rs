use serde::Serialize;

use crate::domain::models::{rental::Rental, reservation::Reservation};

#[derive(Serialize)]
pub struct ReservationCreatedResponse {
    pub reservation: Reservation,
    pub nights: i64,
    pub total_price: f64,
}

#[derive(Serialize)]
pub struct RentalCreatedResponse {
    pub rental: Rental,
    pub nights: i64,
    pub total_price: f64,
}
