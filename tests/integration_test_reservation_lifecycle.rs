mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

async fn setup_bookable_room(app: &TestApp) -> i64 {
    let chain = app.create_chain("Hilton").await;
    let hotel = app.create_hotel(chain, "Hilton Ottawa", "30 Queen Street, Ottawa", 4).await;
    let room = app.create_room(101, hotel, 200.0, 2).await;
    app.create_client("100200300", "Ada Guest").await;
    room
}

#[tokio::test]
async fn test_create_reservation_derives_total_price() {
    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;

    let body = app.create_reservation("100200300", room, "2030-06-01", "2030-06-05").await;
    assert_eq!(body["nights"], 4);
    assert_eq!(body["total_price"], 800.0);
    assert_eq!(body["reservation"]["status"], "CONFIRMED");
    assert_eq!(body["reservation"]["room_number"], room);
    assert!(body["reservation"]["id"].as_i64().unwrap() >= 1);
}

#[tokio::test]
async fn test_create_reservation_rejects_zero_night_stay() {
    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;

    let res = app.post("/api/reservations", json!({
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-06-01",
        "end": "2030-06-01"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_reservation_unknown_client_or_room() {
    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;

    let res = app.post("/api/reservations", json!({
        "client_id": "999999999",
        "room_number": room,
        "start": "2030-06-01",
        "end": "2030-06-05"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.post("/api/reservations", json!({
        "client_id": "100200300",
        "room_number": 9999,
        "start": "2030-06-01",
        "end": "2030-06-05"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_overlapping_reservation_is_rejected() {
    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;
    app.create_client("400500600", "Bea Guest").await;

    app.create_reservation("100200300", room, "2030-06-01", "2030-06-05").await;

    let res = app.post("/api/reservations", json!({
        "client_id": "400500600",
        "room_number": room,
        "start": "2030-06-04",
        "end": "2030-06-08"
    })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // A disjoint stay on the same room still books fine.
    let res = app.post("/api/reservations", json!({
        "client_id": "400500600",
        "room_number": room,
        "start": "2030-06-10",
        "end": "2030-06-12"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cancel_is_not_repeatable() {
    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;
    let created = app.create_reservation("100200300", room, "2030-06-01", "2030-06-05").await;
    let id = created["reservation"]["id"].as_i64().unwrap();

    let res = app.post(&format!("/api/reservations/{}/cancel", id), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "CANCELLED");

    // Second cancel is an invalid transition, not a silent no-op.
    let res = app.post(&format!("/api/reservations/{}/cancel", id), json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app.post("/api/reservations/424242/cancel", json!({})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_confirm_moves_pending_to_confirmed() {
    use hotel_backend::domain::models::reservation::{NewReservationParams, Reservation};

    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;

    let mut pending = Reservation::new(NewReservationParams {
        room_number: room,
        client_nas: "100200300".into(),
        start_date: "2030-06-01".parse().unwrap(),
        end_date: "2030-06-05".parse().unwrap(),
        guest_note: None,
    });
    pending.status = "PENDING".to_string();
    let pending = app.state.reservation_repo.create_if_available(&pending).await.unwrap();

    let res = app.post(&format!("/api/reservations/{}/confirm", pending.id), json!({})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "CONFIRMED");

    // Confirming twice is an invalid transition.
    let res = app.post(&format!("/api/reservations/{}/confirm", pending.id), json!({})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_convert_round_trip() {
    let app = TestApp::new();
    let chain = app.create_chain("Hilton").await;
    let hotel = app.create_hotel(chain, "Hilton Ottawa", "30 Queen Street, Ottawa", 4).await;
    let room = app.create_room(101, hotel, 200.0, 2).await;
    app.create_client("100200300", "Ada Guest").await;
    let employee = app.create_employee("700800900", hotel).await;

    let payment = app.post("/api/payments", json!({ "amount": 800.0, "method": "CARD" })).await;
    let payment_id = parse_body(payment).await["id"].as_i64().unwrap();

    let created = app.create_reservation("100200300", room, "2030-06-01", "2030-06-05").await;
    let id = created["reservation"]["id"].as_i64().unwrap();

    let res = app.post(&format!("/api/reservations/{}/convert", id), json!({
        "employee_id": employee,
        "payment_id": payment_id
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let rental = parse_body(res).await;
    assert_eq!(rental["room_number"], room);
    assert_eq!(rental["client_nas"], "100200300");
    assert_eq!(rental["employee_nas"], employee);
    assert_eq!(rental["payment_id"], payment_id);
    assert_eq!(rental["start_date"], "2030-06-01");
    assert_eq!(rental["end_date"], "2030-06-05");

    // The reservation now reads CONVERTED.
    let res = app.get(&format!("/api/reservations/{}", id)).await;
    assert_eq!(parse_body(res).await["status"], "CONVERTED");

    // And the rental is readable on its own.
    let res = app.get(&format!("/api/rentals/{}", rental["id"].as_i64().unwrap())).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Converting again is an invalid transition.
    let res = app.post(&format!("/api/reservations/{}/convert", id), json!({
        "employee_id": employee,
        "payment_id": payment_id
    })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_convert_rejects_missing_parties_and_states() {
    let app = TestApp::new();
    let chain = app.create_chain("Hilton").await;
    let hotel = app.create_hotel(chain, "Hilton Ottawa", "30 Queen Street, Ottawa", 4).await;
    let room = app.create_room(101, hotel, 200.0, 2).await;
    app.create_client("100200300", "Ada Guest").await;
    let employee = app.create_employee("700800900", hotel).await;

    let res = app.post("/api/reservations/424242/convert", json!({
        "employee_id": employee,
        "payment_id": 1
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let created = app.create_reservation("100200300", room, "2030-06-01", "2030-06-05").await;
    let id = created["reservation"]["id"].as_i64().unwrap();

    let res = app.post(&format!("/api/reservations/{}/convert", id), json!({
        "employee_id": "000000000",
        "payment_id": 1
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.post(&format!("/api/reservations/{}/convert", id), json!({
        "employee_id": employee,
        "payment_id": 424242
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Cancelled reservations cannot be converted.
    app.post(&format!("/api/reservations/{}/cancel", id), json!({})).await;
    let payment = app.post("/api/payments", json!({ "amount": 800.0, "method": "CARD" })).await;
    let payment_id = parse_body(payment).await["id"].as_i64().unwrap();
    let res = app.post(&format!("/api/reservations/{}/convert", id), json!({
        "employee_id": employee,
        "payment_id": payment_id
    })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_convert_rejects_stays_that_already_ended() {
    let app = TestApp::new();
    let chain = app.create_chain("Hilton").await;
    let hotel = app.create_hotel(chain, "Hilton Ottawa", "30 Queen Street, Ottawa", 4).await;
    let room = app.create_room(101, hotel, 200.0, 2).await;
    app.create_client("100200300", "Ada Guest").await;
    let employee = app.create_employee("700800900", hotel).await;

    let payment = app.post("/api/payments", json!({ "amount": 400.0, "method": "CARD" })).await;
    let payment_id = parse_body(payment).await["id"].as_i64().unwrap();

    // Booking past dates is allowed (back-office data entry), converting is not.
    let created = app.create_reservation("100200300", room, "2020-01-01", "2020-01-03").await;
    let id = created["reservation"]["id"].as_i64().unwrap();

    let res = app.post(&format!("/api/reservations/{}/convert", id), json!({
        "employee_id": employee,
        "payment_id": payment_id
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_reservation_archives_it() {
    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;
    let created = app.create_reservation("100200300", room, "2030-06-01", "2030-06-05").await;
    let id = created["reservation"]["id"].as_i64().unwrap();

    let res = app.delete(&format!("/api/reservations/{}", id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!("/api/reservations/{}", id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.delete(&format!("/api/reservations/{}", id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reservations_listed_newest_first() {
    let app = TestApp::new();
    let room = setup_bookable_room(&app).await;
    app.create_reservation("100200300", room, "2030-06-01", "2030-06-05").await;
    app.create_reservation("100200300", room, "2030-06-10", "2030-06-12").await;

    let res = app.get("/api/reservations").await;
    let list = parse_body(res).await;
    let ids: Vec<i64> = list.as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids[0] > ids[1]);
}
