mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};

async fn setup_two_rooms(app: &TestApp) -> (i64, i64) {
    let chain = app.create_chain("Hyatt").await;
    let hotel = app.create_hotel(chain, "Hyatt Montreal", "10 Main Street, Montreal", 4).await;
    let cheap = app.create_room(101, hotel, 120.0, 2).await;
    let pricey = app.create_room(102, hotel, 180.0, 4).await;
    (cheap, pricey)
}

#[tokio::test]
async fn test_zero_night_search_is_rejected() {
    let app = TestApp::new();

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-10").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-05").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/api/rooms/available?start=not-a-date&end=2030-07-10").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_overlapping_reservation_excludes_room() {
    let app = TestApp::new();
    let (cheap, pricey) = setup_two_rooms(&app).await;
    app.create_client("100200300", "Ada Guest").await;
    app.create_reservation("100200300", cheap, "2030-07-06", "2030-07-08").await;

    // Disjoint range: both rooms free.
    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-15").await;
    assert_eq!(res.status(), StatusCode::OK);
    let rooms = parse_body(res).await;
    assert_eq!(rooms.as_array().unwrap().len(), 2);

    // Overlapping range: the reserved room disappears.
    let res = app.get("/api/rooms/available?start=2030-07-05&end=2030-07-10").await;
    let rooms = parse_body(res).await;
    let numbers: Vec<i64> = rooms.as_array().unwrap().iter().map(|r| r["number"].as_i64().unwrap()).collect();
    assert_eq!(numbers, vec![pricey]);
}

#[tokio::test]
async fn test_overlap_boundaries_are_inclusive() {
    let app = TestApp::new();
    let (cheap, _) = setup_two_rooms(&app).await;
    app.create_client("100200300", "Ada Guest").await;
    app.create_reservation("100200300", cheap, "2030-07-06", "2030-07-08").await;

    // Search starting exactly on the reservation's end date still conflicts.
    let res = app.get("/api/rooms/available?start=2030-07-08&end=2030-07-12").await;
    let numbers: Vec<i64> = parse_body(res).await.as_array().unwrap().iter()
        .map(|r| r["number"].as_i64().unwrap()).collect();
    assert!(!numbers.contains(&cheap));

    // Search ending exactly on the reservation's start date still conflicts.
    let res = app.get("/api/rooms/available?start=2030-07-03&end=2030-07-06").await;
    let numbers: Vec<i64> = parse_body(res).await.as_array().unwrap().iter()
        .map(|r| r["number"].as_i64().unwrap()).collect();
    assert!(!numbers.contains(&cheap));

    // One day past the end date is free again.
    let res = app.get("/api/rooms/available?start=2030-07-09&end=2030-07-12").await;
    let numbers: Vec<i64> = parse_body(res).await.as_array().unwrap().iter()
        .map(|r| r["number"].as_i64().unwrap()).collect();
    assert!(numbers.contains(&cheap));
}

#[tokio::test]
async fn test_cancelled_reservation_does_not_block() {
    let app = TestApp::new();
    let (cheap, _) = setup_two_rooms(&app).await;
    app.create_client("100200300", "Ada Guest").await;
    let created = app.create_reservation("100200300", cheap, "2030-07-06", "2030-07-08").await;
    let id = created["reservation"]["id"].as_i64().unwrap();

    let res = app.post(&format!("/api/reservations/{}/cancel", id), serde_json::json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/api/rooms/available?start=2030-07-05&end=2030-07-10").await;
    let numbers: Vec<i64> = parse_body(res).await.as_array().unwrap().iter()
        .map(|r| r["number"].as_i64().unwrap()).collect();
    assert!(numbers.contains(&cheap));
}

#[tokio::test]
async fn test_pending_reservation_blocks() {
    use hotel_backend::domain::models::reservation::{NewReservationParams, Reservation};

    let app = TestApp::new();
    let (cheap, _) = setup_two_rooms(&app).await;
    app.create_client("100200300", "Ada Guest").await;

    let mut pending = Reservation::new(NewReservationParams {
        room_number: cheap,
        client_nas: "100200300".into(),
        start_date: "2030-07-06".parse().unwrap(),
        end_date: "2030-07-08".parse().unwrap(),
        guest_note: None,
    });
    pending.status = "PENDING".to_string();
    app.state.reservation_repo.create_if_available(&pending).await.unwrap();

    let res = app.get("/api/rooms/available?start=2030-07-05&end=2030-07-10").await;
    let numbers: Vec<i64> = parse_body(res).await.as_array().unwrap().iter()
        .map(|r| r["number"].as_i64().unwrap()).collect();
    assert!(!numbers.contains(&cheap));
}

#[tokio::test]
async fn test_chain_filter_excludes_other_chains() {
    let app = TestApp::new();

    let hyatt = app.create_chain("Hyatt").await;
    let hilton = app.create_chain("Hilton").await;
    let hyatt_hotel = app.create_hotel(hyatt, "Hyatt Montreal", "10 Main Street, Montreal", 4).await;
    let hilton_hotel = app.create_hotel(hilton, "Hilton Toronto", "20 King Street, Toronto", 5).await;
    app.create_room(201, hyatt_hotel, 150.0, 2).await;
    app.create_room(202, hilton_hotel, 90.0, 2).await;

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-15&chain=Hyatt").await;
    let rooms = parse_body(res).await;
    let rooms = rooms.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["chain_name"], "Hyatt");
    assert_eq!(rooms[0]["number"], 201);
}

#[tokio::test]
async fn test_results_ordered_by_price_then_number() {
    let app = TestApp::new();
    let chain = app.create_chain("Wyndham").await;
    let hotel = app.create_hotel(chain, "Wyndham Quebec", "5 Rue Principale, Quebec", 3).await;
    app.create_room(303, hotel, 150.0, 2).await;
    app.create_room(301, hotel, 95.0, 2).await;
    app.create_room(302, hotel, 95.0, 2).await;

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-15").await;
    let numbers: Vec<i64> = parse_body(res).await.as_array().unwrap().iter()
        .map(|r| r["number"].as_i64().unwrap()).collect();
    assert_eq!(numbers, vec![301, 302, 303]);
}

#[tokio::test]
async fn test_filters_are_conjunctive_and_any_is_ignored() {
    let app = TestApp::new();
    let chain = app.create_chain("Hyatt").await;
    let hotel = app.create_hotel(chain, "Hyatt Montreal", "10 Main Street, Montreal", 4).await;
    app.create_room(401, hotel, 100.0, 2).await;
    app.create_room(402, hotel, 140.0, 4).await;

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-15&capacity=3&chain=any&stars=any").await;
    let rooms = parse_body(res).await;
    let rooms = rooms.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["number"], 402);

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-15&capacity=3&max_price=120").await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_chain_yields_empty_list_not_error() {
    let app = TestApp::new();
    setup_two_rooms(&app).await;

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-15&chain=Nonexistent").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_location_substring_filter() {
    let app = TestApp::new();
    let chain = app.create_chain("Hyatt").await;
    let montreal = app.create_hotel(chain, "Hyatt Montreal", "10 Main Street, Montreal", 4).await;
    let toronto = app.create_hotel(chain, "Hyatt Toronto", "20 King Street, Toronto", 4).await;
    app.create_room(501, montreal, 100.0, 2).await;
    app.create_room(502, toronto, 100.0, 2).await;

    let res = app.get("/api/rooms/available?start=2030-07-10&end=2030-07-15&location=montreal").await;
    let rooms = parse_body(res).await;
    let rooms = rooms.as_array().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["number"], 501);
}
