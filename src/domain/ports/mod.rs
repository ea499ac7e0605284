use crate::domain::models::{
    chain::Chain, hotel::Hotel, room::{Room, RoomListing, RoomSearchFilters},
    client::Client, employee::Employee, reservation::Reservation,
    rental::Rental, payment::Payment,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait ChainRepository: Send + Sync {
    async fn create(&self, chain: &Chain) -> Result<Chain, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Chain>, AppError>;
    async fn list(&self) -> Result<Vec<Chain>, AppError>;
    async fn update(&self, chain: &Chain) -> Result<Chain, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Hotel>, AppError>;
    async fn list(&self, chain_id: Option<i64>) -> Result<Vec<Hotel>, AppError>;
    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &Room) -> Result<Room, AppError>;
    async fn find_by_number(&self, number: i64) -> Result<Option<Room>, AppError>;
    async fn list(&self, hotel_id: Option<i64>) -> Result<Vec<Room>, AppError>;
    async fn search(&self, filters: &RoomSearchFilters) -> Result<Vec<RoomListing>, AppError>;
    async fn update(&self, room: &Room) -> Result<Room, AppError>;
    async fn delete(&self, number: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<Client, AppError>;
    async fn find_by_nas(&self, nas: &str) -> Result<Option<Client>, AppError>;
    async fn list(&self) -> Result<Vec<Client>, AppError>;
    async fn update(&self, client: &Client) -> Result<Client, AppError>;
    async fn delete(&self, nas: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, employee: &Employee) -> Result<Employee, AppError>;
    async fn find_by_nas(&self, nas: &str) -> Result<Option<Employee>, AppError>;
    async fn list(&self, hotel_id: Option<i64>) -> Result<Vec<Employee>, AppError>;
    async fn update(&self, employee: &Employee) -> Result<Employee, AppError>;
    async fn delete(&self, nas: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // Check-then-insert must be atomic per room: the overlap test against
    // blocking reservations and rentals runs inside the same transaction
    // as the insert, so two concurrent overlapping bookings cannot both
    // succeed.
    async fn create_if_available(&self, reservation: &Reservation) -> Result<Reservation, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError>;
    async fn list(&self) -> Result<Vec<Reservation>, AppError>;
    async fn list_blocking_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Reservation>, AppError>;
    async fn confirm(&self, id: i64) -> Result<Reservation, AppError>;
    async fn cancel(&self, id: i64) -> Result<Reservation, AppError>;
    // Rental insert and status flip to CONVERTED succeed or fail together.
    async fn convert(&self, id: i64, employee_nas: &str, payment_id: i64) -> Result<Rental, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait RentalRepository: Send + Sync {
    // Walk-in check-in: payment insert, optional client auto-registration
    // and rental insert share one transaction with the overlap check.
    async fn create_walk_in(
        &self,
        rental: &Rental,
        payment: &Payment,
        new_client: &Client,
    ) -> Result<Rental, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Rental>, AppError>;
    async fn list(&self) -> Result<Vec<Rental>, AppError>;
    async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Rental>, AppError>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, AppError>;
    async fn list(&self) -> Result<Vec<Payment>, AppError>;
}
