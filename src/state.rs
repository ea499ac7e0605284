use std::sync::Arc;
use crate::domain::ports::{
    ChainRepository, HotelRepository, RoomRepository, ClientRepository,
    EmployeeRepository, ReservationRepository, RentalRepository, PaymentRepository,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub chain_repo: Arc<dyn ChainRepository>,
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub employee_repo: Arc<dyn EmployeeRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub rental_repo: Arc<dyn RentalRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
}
