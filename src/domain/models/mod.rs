pub mod chain;
pub mod hotel;
pub mod room;
pub mod client;
pub mod employee;
pub mod reservation;
pub mod rental;
pub mod payment;
