mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

// Two simultaneous bookings for the same room and overlapping dates: the
// store's check-then-insert is atomic, so exactly one wins.
#[tokio::test]
async fn test_concurrent_overlapping_reservations_one_winner() {
    let app = TestApp::new();
    let chain = app.create_chain("Hilton").await;
    let hotel = app.create_hotel(chain, "Hilton Ottawa", "30 Queen Street, Ottawa", 4).await;
    let room = app.create_room(101, hotel, 200.0, 2).await;
    app.create_client("100200300", "Ada Guest").await;
    app.create_client("400500600", "Bea Guest").await;

    let first = app.post("/api/reservations", json!({
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-06-01",
        "end": "2030-06-05"
    }));
    let second = app.post("/api/reservations", json!({
        "client_id": "400500600",
        "room_number": room,
        "start": "2030-06-03",
        "end": "2030-06-07"
    }));

    let (first, second) = tokio::join!(first, second);
    let statuses = [first.status(), second.status()];

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(), 1);
}

#[tokio::test]
async fn test_concurrent_walk_in_and_reservation_one_winner() {
    let app = TestApp::new();
    let chain = app.create_chain("Hilton").await;
    let hotel = app.create_hotel(chain, "Hilton Ottawa", "30 Queen Street, Ottawa", 4).await;
    let room = app.create_room(101, hotel, 200.0, 2).await;
    app.create_client("100200300", "Ada Guest").await;
    let employee = app.create_employee("700800900", hotel).await;

    let booking = app.post("/api/reservations", json!({
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-06-01",
        "end": "2030-06-05"
    }));
    let walk_in = app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-06-04",
        "end": "2030-06-08"
    }));

    let (booking, walk_in) = tokio::join!(booking, walk_in);
    let statuses = [booking.status(), walk_in.status()];

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(), 1);
}
