use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateChainRequest {
    pub name: String,
    pub head_office_address: String,
    pub contact_emails: Option<Vec<String>>,
    pub contact_phones: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdateChainRequest {
    pub name: Option<String>,
    pub head_office_address: Option<String>,
    pub contact_emails: Option<Vec<String>>,
    pub contact_phones: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CreateHotelRequest {
    pub chain_id: i64,
    pub name: String,
    pub address: String,
    pub star_category: i32,
}

#[derive(Deserialize)]
pub struct UpdateHotelRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub star_category: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub number: i64,
    pub hotel_id: i64,
    pub price: f64,
    pub capacity: i32,
    pub area: f64,
    pub view_type: String,
    pub amenities: Option<String>,
    pub extensions_possible: Option<bool>,
    pub damages: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateRoomRequest {
    pub price: Option<f64>,
    pub capacity: Option<i32>,
    pub area: Option<f64>,
    pub view_type: Option<String>,
    pub amenities: Option<String>,
    pub extensions_possible: Option<bool>,
    pub damages: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub nas: String,
    pub full_name: String,
    pub address: String,
}

#[derive(Deserialize)]
pub struct UpdateClientRequest {
    pub full_name: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub nas: String,
    pub full_name: String,
    pub address: String,
    pub hotel_id: i64,
    pub roles: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdateEmployeeRequest {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub hotel_id: Option<i64>,
    pub roles: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub client_id: String,
    pub room_number: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub guest_details: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Deserialize)]
pub struct ConvertReservationRequest {
    pub employee_id: String,
    pub payment_id: i64,
}

#[derive(Deserialize)]
pub struct CreateRentalRequest {
    pub employee_id: String,
    pub client_id: String,
    pub room_number: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub payment_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: f64,
    pub method: Option<String>,
}

// Query params arrive as raw strings so that select-box placeholders like
// "any" can stand for "no constraint".
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub start: String,
    pub end: String,
    pub location: Option<String>,
    pub chain: Option<String>,
    pub stars: Option<String>,
    pub capacity: Option<String>,
    pub view: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_area: Option<String>,
    pub max_area: Option<String>,
}

#[derive(Deserialize)]
pub struct HotelListQuery {
    pub chain_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct RoomListQuery {
    pub hotel_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct EmployeeListQuery {
    pub hotel_id: Option<i64>,
}
