use chrono::NaiveDate;
use std::collections::HashSet;

use crate::domain::models::rental::Rental;
use crate::domain::models::reservation::Reservation;
use crate::domain::models::room::RoomListing;
use crate::error::AppError;

pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if start >= end {
        return Err(AppError::Validation("Start date must be before end date".into()));
    }
    Ok(())
}

// Inclusive-inclusive intersection: bookings that merely touch the
// boundary dates still conflict.
pub fn overlaps(existing_start: NaiveDate, existing_end: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    existing_start <= end && existing_end >= start
}

pub fn filter_available(
    rooms: Vec<RoomListing>,
    reservations: &[Reservation],
    rentals: &[Rental],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<RoomListing> {
    let mut busy: HashSet<i64> = HashSet::new();

    for r in reservations {
        if r.blocks_room() && overlaps(r.start_date, r.end_date, start, end) {
            busy.insert(r.room_number);
        }
    }
    for l in rentals {
        if overlaps(l.start_date, l.end_date, start, end) {
            busy.insert(l.room_number);
        }
    }

    rooms.into_iter().filter(|r| !busy.contains(&r.number)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::reservation::{NewReservationParams, Reservation};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn listing(number: i64) -> RoomListing {
        RoomListing {
            number,
            hotel_id: 1,
            price: 100.0,
            capacity: 2,
            area: 25.0,
            view_type: "city".into(),
            amenities: "wifi".into(),
            extensions_possible: false,
            hotel_name: "Test Hotel".into(),
            hotel_address: "1 Test St".into(),
            star_category: 3,
            chain_id: 1,
            chain_name: "Test Chain".into(),
        }
    }

    fn reservation(room: i64, start: &str, end: &str, status: &str) -> Reservation {
        let mut r = Reservation::new(NewReservationParams {
            room_number: room,
            client_nas: "123456789".into(),
            start_date: d(start),
            end_date: d(end),
            guest_note: None,
        });
        r.status = status.to_string();
        r
    }

    #[test]
    fn overlap_is_inclusive_on_both_ends() {
        assert!(overlaps(d("2025-07-01"), d("2025-07-05"), d("2025-07-05"), d("2025-07-10")));
        assert!(overlaps(d("2025-07-10"), d("2025-07-12"), d("2025-07-05"), d("2025-07-10")));
        assert!(!overlaps(d("2025-07-01"), d("2025-07-04"), d("2025-07-05"), d("2025-07-10")));
        assert!(!overlaps(d("2025-07-11"), d("2025-07-14"), d("2025-07-05"), d("2025-07-10")));
    }

    #[test]
    fn pending_and_confirmed_block_cancelled_does_not() {
        let rooms = vec![listing(101), listing(102), listing(103)];
        let reservations = vec![
            reservation(101, "2025-07-06", "2025-07-08", "PENDING"),
            reservation(102, "2025-07-06", "2025-07-08", "CONFIRMED"),
            reservation(103, "2025-07-06", "2025-07-08", "CANCELLED"),
        ];

        let free = filter_available(rooms, &reservations, &[], d("2025-07-05"), d("2025-07-10"));
        let numbers: Vec<i64> = free.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![103]);
    }

    #[test]
    fn converted_reservation_does_not_block_but_its_rental_does() {
        let rooms = vec![listing(201)];
        let reservations = vec![reservation(201, "2025-07-06", "2025-07-08", "CONVERTED")];

        let free = filter_available(rooms.clone(), &reservations, &[], d("2025-07-05"), d("2025-07-10"));
        assert_eq!(free.len(), 1);

        let rental = Rental {
            id: 1,
            room_number: 201,
            client_nas: "123456789".into(),
            employee_nas: "987654321".into(),
            payment_id: 1,
            start_date: d("2025-07-06"),
            end_date: d("2025-07-08"),
            created_at: chrono::Utc::now(),
        };
        let free = filter_available(rooms, &reservations, &[rental], d("2025-07-05"), d("2025-07-10"));
        assert!(free.is_empty());
    }

    #[test]
    fn zero_night_stay_is_rejected() {
        assert!(validate_range(d("2025-07-05"), d("2025-07-05")).is_err());
        assert!(validate_range(d("2025-07-06"), d("2025-07-05")).is_err());
        assert!(validate_range(d("2025-07-05"), d("2025-07-06")).is_ok());
    }
}
