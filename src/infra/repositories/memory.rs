use crate::domain::models::{
    chain::Chain, hotel::Hotel, room::{Room, RoomListing, RoomSearchFilters},
    client::Client, employee::Employee, reservation::Reservation,
    rental::Rental, payment::Payment,
};
use crate::domain::ports::{
    ChainRepository, HotelRepository, RoomRepository, ClientRepository,
    EmployeeRepository, ReservationRepository, RentalRepository, PaymentRepository,
};
use crate::domain::services::availability::overlaps;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::{Mutex, MutexGuard};

// Single-process fallback store. One mutex covers every table, so the
// check-then-insert paths are atomic by construction.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    chains: Vec<Chain>,
    hotels: Vec<Hotel>,
    rooms: Vec<Room>,
    clients: Vec<Client>,
    employees: Vec<Employee>,
    reservations: Vec<Reservation>,
    archived_reservations: Vec<Reservation>,
    rentals: Vec<Rental>,
    payments: Vec<Payment>,
    next_chain_id: i64,
    next_hotel_id: i64,
    next_reservation_id: i64,
    next_rental_id: i64,
    next_payment_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                next_chain_id: 1,
                next_hotel_id: 1,
                next_reservation_id: 1,
                next_rental_id: 1,
                next_payment_id: 1,
                ..MemoryInner::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryInner>, AppError> {
        self.inner.lock().map_err(|_| AppError::Unavailable("memory store poisoned".into()))
    }

    // Demo dataset for running without a database.
    pub fn seed_demo(&self) {
        let chains = [
            ("Hilton", "3 Park Ave, New York"),
            ("Hyatt", "150 N Riverside Plaza, Chicago"),
            ("Wyndham", "22 Sylvan Way, Parsippany"),
        ];
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(_) => return,
        };

        let mut room_number = 100;
        for (i, (chain_name, office)) in chains.iter().enumerate() {
            let chain_id = inner.next_chain_id;
            inner.next_chain_id += 1;
            inner.chains.push(Chain {
                id: chain_id,
                name: chain_name.to_string(),
                head_office_address: office.to_string(),
                contact_emails: sqlx::types::Json(vec![format!("contact@{}.example.com", chain_name.to_lowercase())]),
                contact_phones: sqlx::types::Json(vec!["+1-555-0100".to_string()]),
                hotel_count: 2,
                created_at: Utc::now(),
            });

            for (j, city) in ["Montreal", "Toronto"].iter().enumerate() {
                let hotel_id = inner.next_hotel_id;
                inner.next_hotel_id += 1;
                inner.hotels.push(Hotel {
                    id: hotel_id,
                    chain_id,
                    name: format!("{} {}", chain_name, city),
                    address: format!("{} Main Street, {}", 10 + i * 2 + j, city),
                    star_category: 3 + (j as i32),
                    room_count: 3,
                    created_at: Utc::now(),
                });

                for k in 0..3 {
                    room_number += 1;
                    inner.rooms.push(Room {
                        number: room_number,
                        hotel_id,
                        price: 120.0 + (k as f64) * 45.0 + (i as f64) * 10.0,
                        capacity: 2 + k,
                        area: 22.0 + (k as f64) * 8.0,
                        view_type: if k == 2 { "sea".to_string() } else { "city".to_string() },
                        amenities: "wifi, tv, air conditioning".to_string(),
                        extensions_possible: k > 0,
                        damages: None,
                    });
                }
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn room_conflicts(inner: &MemoryInner, room_number: i64, start: NaiveDate, end: NaiveDate) -> bool {
    inner.reservations.iter().any(|r| {
        r.room_number == room_number && r.blocks_room() && overlaps(r.start_date, r.end_date, start, end)
    }) || inner.rentals.iter().any(|l| {
        l.room_number == room_number && overlaps(l.start_date, l.end_date, start, end)
    })
}

#[async_trait]
impl ChainRepository for MemoryStore {
    async fn create(&self, chain: &Chain) -> Result<Chain, AppError> {
        let mut inner = self.lock()?;
        if inner.chains.iter().any(|c| c.name == chain.name) {
            return Err(AppError::Conflict("Chain already exists".into()));
        }
        let mut created = chain.clone();
        created.id = inner.next_chain_id;
        inner.next_chain_id += 1;
        inner.chains.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Chain>, AppError> {
        let inner = self.lock()?;
        Ok(inner.chains.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Chain>, AppError> {
        let inner = self.lock()?;
        let mut chains = inner.chains.clone();
        chains.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(chains)
    }

    async fn update(&self, chain: &Chain) -> Result<Chain, AppError> {
        let mut inner = self.lock()?;
        let existing = inner.chains.iter_mut().find(|c| c.id == chain.id)
            .ok_or_else(|| AppError::NotFound("Chain not found".into()))?;
        existing.name = chain.name.clone();
        existing.head_office_address = chain.head_office_address.clone();
        existing.contact_emails = chain.contact_emails.clone();
        existing.contact_phones = chain.contact_phones.clone();
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        if inner.hotels.iter().any(|h| h.chain_id == id) {
            return Err(AppError::Conflict("Chain still owns hotels".into()));
        }
        let before = inner.chains.len();
        inner.chains.retain(|c| c.id != id);
        if inner.chains.len() == before {
            return Err(AppError::NotFound("Chain not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl HotelRepository for MemoryStore {
    async fn create(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        let mut inner = self.lock()?;
        let chain = inner.chains.iter_mut().find(|c| c.id == hotel.chain_id)
            .ok_or_else(|| AppError::NotFound("Chain not found".into()))?;
        chain.hotel_count += 1;

        let mut created = hotel.clone();
        created.id = inner.next_hotel_id;
        inner.next_hotel_id += 1;
        inner.hotels.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Hotel>, AppError> {
        let inner = self.lock()?;
        Ok(inner.hotels.iter().find(|h| h.id == id).cloned())
    }

    async fn list(&self, chain_id: Option<i64>) -> Result<Vec<Hotel>, AppError> {
        let inner = self.lock()?;
        let mut hotels: Vec<Hotel> = inner.hotels.iter()
            .filter(|h| chain_id.is_none_or(|id| h.chain_id == id))
            .cloned()
            .collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hotels)
    }

    async fn update(&self, hotel: &Hotel) -> Result<Hotel, AppError> {
        let mut inner = self.lock()?;
        let existing = inner.hotels.iter_mut().find(|h| h.id == hotel.id)
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;
        existing.name = hotel.name.clone();
        existing.address = hotel.address.clone();
        existing.star_category = hotel.star_category;
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        let chain_id = inner.hotels.iter().find(|h| h.id == id)
            .map(|h| h.chain_id)
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;
        if inner.rooms.iter().any(|r| r.hotel_id == id) {
            return Err(AppError::Conflict("Hotel still has rooms".into()));
        }
        inner.hotels.retain(|h| h.id != id);
        if let Some(chain) = inner.chains.iter_mut().find(|c| c.id == chain_id) {
            chain.hotel_count -= 1;
        }
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for MemoryStore {
    async fn create(&self, room: &Room) -> Result<Room, AppError> {
        let mut inner = self.lock()?;
        if inner.rooms.iter().any(|r| r.number == room.number) {
            return Err(AppError::Conflict("Room number already exists".into()));
        }
        let hotel = inner.hotels.iter_mut().find(|h| h.id == room.hotel_id)
            .ok_or_else(|| AppError::NotFound("Hotel not found".into()))?;
        hotel.room_count += 1;
        inner.rooms.push(room.clone());
        Ok(room.clone())
    }

    async fn find_by_number(&self, number: i64) -> Result<Option<Room>, AppError> {
        let inner = self.lock()?;
        Ok(inner.rooms.iter().find(|r| r.number == number).cloned())
    }

    async fn list(&self, hotel_id: Option<i64>) -> Result<Vec<Room>, AppError> {
        let inner = self.lock()?;
        let mut rooms: Vec<Room> = inner.rooms.iter()
            .filter(|r| hotel_id.is_none_or(|id| r.hotel_id == id))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.number.cmp(&b.number)));
        Ok(rooms)
    }

    async fn search(&self, filters: &RoomSearchFilters) -> Result<Vec<RoomListing>, AppError> {
        let inner = self.lock()?;
        let mut listings = Vec::new();

        for room in &inner.rooms {
            let Some(hotel) = inner.hotels.iter().find(|h| h.id == room.hotel_id) else { continue };
            let Some(chain) = inner.chains.iter().find(|c| c.id == hotel.chain_id) else { continue };

            if let Some(ref location) = filters.location
                && !hotel.address.to_lowercase().contains(&location.to_lowercase()) {
                continue;
            }
            if let Some(ref chain_name) = filters.chain
                && chain.name != *chain_name {
                continue;
            }
            if let Some(stars) = filters.star_category
                && hotel.star_category != stars {
                continue;
            }
            if let Some(capacity) = filters.min_capacity
                && room.capacity < capacity {
                continue;
            }
            if let Some(ref view) = filters.view_type
                && room.view_type != *view {
                continue;
            }
            if let Some(min) = filters.min_price
                && room.price < min {
                continue;
            }
            if let Some(max) = filters.max_price
                && room.price > max {
                continue;
            }
            if let Some(min) = filters.min_area
                && room.area < min {
                continue;
            }
            if let Some(max) = filters.max_area
                && room.area > max {
                continue;
            }

            listings.push(RoomListing {
                number: room.number,
                hotel_id: room.hotel_id,
                price: room.price,
                capacity: room.capacity,
                area: room.area,
                view_type: room.view_type.clone(),
                amenities: room.amenities.clone(),
                extensions_possible: room.extensions_possible,
                hotel_name: hotel.name.clone(),
                hotel_address: hotel.address.clone(),
                star_category: hotel.star_category,
                chain_id: chain.id,
                chain_name: chain.name.clone(),
            });
        }

        listings.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.number.cmp(&b.number)));
        Ok(listings)
    }

    async fn update(&self, room: &Room) -> Result<Room, AppError> {
        let mut inner = self.lock()?;
        let existing = inner.rooms.iter_mut().find(|r| r.number == room.number)
            .ok_or_else(|| AppError::NotFound("Room not found".into()))?;
        existing.price = room.price;
        existing.capacity = room.capacity;
        existing.area = room.area;
        existing.view_type = room.view_type.clone();
        existing.amenities = room.amenities.clone();
        existing.extensions_possible = room.extensions_possible;
        existing.damages = room.damages.clone();
        Ok(existing.clone())
    }

    async fn delete(&self, number: i64) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        let hotel_id = inner.rooms.iter().find(|r| r.number == number)
            .map(|r| r.hotel_id)
            .ok_or_else(|| AppError::NotFound("Room not found".into()))?;
        if inner.reservations.iter().any(|r| r.room_number == number && r.blocks_room())
            || inner.rentals.iter().any(|l| l.room_number == number) {
            return Err(AppError::Conflict("Room still has bookings".into()));
        }
        inner.rooms.retain(|r| r.number != number);
        if let Some(hotel) = inner.hotels.iter_mut().find(|h| h.id == hotel_id) {
            hotel.room_count -= 1;
        }
        Ok(())
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create(&self, client: &Client) -> Result<Client, AppError> {
        let mut inner = self.lock()?;
        if inner.clients.iter().any(|c| c.nas == client.nas) {
            return Err(AppError::Conflict("Client already exists".into()));
        }
        inner.clients.push(client.clone());
        Ok(client.clone())
    }

    async fn find_by_nas(&self, nas: &str) -> Result<Option<Client>, AppError> {
        let inner = self.lock()?;
        Ok(inner.clients.iter().find(|c| c.nas == nas).cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, AppError> {
        let inner = self.lock()?;
        let mut clients = inner.clients.clone();
        clients.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(clients)
    }

    async fn update(&self, client: &Client) -> Result<Client, AppError> {
        let mut inner = self.lock()?;
        let existing = inner.clients.iter_mut().find(|c| c.nas == client.nas)
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;
        existing.full_name = client.full_name.clone();
        existing.address = client.address.clone();
        Ok(existing.clone())
    }

    async fn delete(&self, nas: &str) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        if inner.reservations.iter().any(|r| r.client_nas == nas)
            || inner.rentals.iter().any(|l| l.client_nas == nas) {
            return Err(AppError::Conflict("Client still has bookings".into()));
        }
        let before = inner.clients.len();
        inner.clients.retain(|c| c.nas != nas);
        if inner.clients.len() == before {
            return Err(AppError::NotFound("Client not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn create(&self, employee: &Employee) -> Result<Employee, AppError> {
        let mut inner = self.lock()?;
        if inner.employees.iter().any(|e| e.nas == employee.nas) {
            return Err(AppError::Conflict("Employee already exists".into()));
        }
        if !inner.hotels.iter().any(|h| h.id == employee.hotel_id) {
            return Err(AppError::NotFound("Hotel not found".into()));
        }
        inner.employees.push(employee.clone());
        Ok(employee.clone())
    }

    async fn find_by_nas(&self, nas: &str) -> Result<Option<Employee>, AppError> {
        let inner = self.lock()?;
        Ok(inner.employees.iter().find(|e| e.nas == nas).cloned())
    }

    async fn list(&self, hotel_id: Option<i64>) -> Result<Vec<Employee>, AppError> {
        let inner = self.lock()?;
        let mut employees: Vec<Employee> = inner.employees.iter()
            .filter(|e| hotel_id.is_none_or(|id| e.hotel_id == id))
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(employees)
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, AppError> {
        let mut inner = self.lock()?;
        if !inner.hotels.iter().any(|h| h.id == employee.hotel_id) {
            return Err(AppError::NotFound("Hotel not found".into()));
        }
        let existing = inner.employees.iter_mut().find(|e| e.nas == employee.nas)
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))?;
        existing.full_name = employee.full_name.clone();
        existing.address = employee.address.clone();
        existing.hotel_id = employee.hotel_id;
        existing.roles = employee.roles.clone();
        Ok(existing.clone())
    }

    async fn delete(&self, nas: &str) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        if inner.rentals.iter().any(|l| l.employee_nas == nas) {
            return Err(AppError::Conflict("Employee still referenced by rentals".into()));
        }
        let before = inner.employees.len();
        inner.employees.retain(|e| e.nas != nas);
        if inner.employees.len() == before {
            return Err(AppError::NotFound("Employee not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn create_if_available(&self, reservation: &Reservation) -> Result<Reservation, AppError> {
        let mut inner = self.lock()?;
        if !inner.rooms.iter().any(|r| r.number == reservation.room_number) {
            return Err(AppError::NotFound("Room not found".into()));
        }
        if room_conflicts(&inner, reservation.room_number, reservation.start_date, reservation.end_date) {
            return Err(AppError::Conflict("Room is already booked for this period".into()));
        }

        let mut created = reservation.clone();
        created.id = inner.next_reservation_id;
        inner.next_reservation_id += 1;
        inner.reservations.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let inner = self.lock()?;
        Ok(inner.reservations.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        let inner = self.lock()?;
        let mut reservations = inner.reservations.clone();
        reservations.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(reservations)
    }

    async fn list_blocking_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        let inner = self.lock()?;
        Ok(inner.reservations.iter()
            .filter(|r| r.blocks_room() && overlaps(r.start_date, r.end_date, start, end))
            .cloned()
            .collect())
    }

    async fn confirm(&self, id: i64) -> Result<Reservation, AppError> {
        let mut inner = self.lock()?;
        let reservation = inner.reservations.iter_mut().find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.status != "PENDING" {
            return Err(AppError::InvalidState("Only pending reservations can be confirmed".into()));
        }
        reservation.status = "CONFIRMED".to_string();
        Ok(reservation.clone())
    }

    async fn cancel(&self, id: i64) -> Result<Reservation, AppError> {
        let mut inner = self.lock()?;
        let reservation = inner.reservations.iter_mut().find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.is_terminal() {
            return Err(AppError::InvalidState("Reservation is already cancelled or converted".into()));
        }
        reservation.status = "CANCELLED".to_string();
        Ok(reservation.clone())
    }

    async fn convert(&self, id: i64, employee_nas: &str, payment_id: i64) -> Result<Rental, AppError> {
        let mut inner = self.lock()?;
        let reservation = inner.reservations.iter().find(|r| r.id == id).cloned()
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        if reservation.status != "CONFIRMED" {
            return Err(AppError::InvalidState("Only confirmed reservations can be converted".into()));
        }

        let rental = Rental {
            id: inner.next_rental_id,
            room_number: reservation.room_number,
            client_nas: reservation.client_nas.clone(),
            employee_nas: employee_nas.to_string(),
            payment_id,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            created_at: Utc::now(),
        };
        inner.next_rental_id += 1;
        inner.rentals.push(rental.clone());

        if let Some(r) = inner.reservations.iter_mut().find(|r| r.id == id) {
            r.status = "CONVERTED".to_string();
        }
        Ok(rental)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        let position = inner.reservations.iter().position(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Reservation not found".into()))?;
        // Mirror of the SQL archival trigger.
        let archived = inner.reservations.remove(position);
        inner.archived_reservations.push(archived);
        Ok(())
    }
}

#[async_trait]
impl RentalRepository for MemoryStore {
    async fn create_walk_in(
        &self,
        rental: &Rental,
        payment: &Payment,
        new_client: &Client,
    ) -> Result<Rental, AppError> {
        let mut inner = self.lock()?;
        if !inner.rooms.iter().any(|r| r.number == rental.room_number) {
            return Err(AppError::NotFound("Room not found".into()));
        }
        if room_conflicts(&inner, rental.room_number, rental.start_date, rental.end_date) {
            return Err(AppError::Conflict("Room is already booked for this period".into()));
        }

        if !inner.clients.iter().any(|c| c.nas == new_client.nas) {
            inner.clients.push(new_client.clone());
        }

        let mut paid = payment.clone();
        paid.id = inner.next_payment_id;
        inner.next_payment_id += 1;
        inner.payments.push(paid.clone());

        let mut created = rental.clone();
        created.id = inner.next_rental_id;
        created.payment_id = paid.id;
        inner.next_rental_id += 1;
        inner.rentals.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Rental>, AppError> {
        let inner = self.lock()?;
        Ok(inner.rentals.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Rental>, AppError> {
        let inner = self.lock()?;
        let mut rentals = inner.rentals.clone();
        rentals.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rentals)
    }

    async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Rental>, AppError> {
        let inner = self.lock()?;
        Ok(inner.rentals.iter()
            .filter(|l| overlaps(l.start_date, l.end_date, start, end))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError> {
        let mut inner = self.lock()?;
        let mut created = payment.clone();
        created.id = inner.next_payment_id;
        inner.next_payment_id += 1;
        inner.payments.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, AppError> {
        let inner = self.lock()?;
        Ok(inner.payments.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Payment>, AppError> {
        let inner = self.lock()?;
        let mut payments = inner.payments.clone();
        payments.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(payments)
    }
}
