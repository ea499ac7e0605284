mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{parse_body, TestApp};
use serde_json::json;

async fn setup_front_desk(app: &TestApp) -> (i64, String) {
    let chain = app.create_chain("Wyndham").await;
    let hotel = app.create_hotel(chain, "Wyndham Halifax", "8 Harbour Road, Halifax", 3).await;
    let room = app.create_room(101, hotel, 150.0, 2).await;
    let employee = app.create_employee("700800900", hotel).await;
    (room, employee)
}

#[tokio::test]
async fn test_walk_in_rental_creates_payment_and_rental() {
    let app = TestApp::new();
    let (room, employee) = setup_front_desk(&app).await;
    app.create_client("100200300", "Ada Guest").await;

    let res = app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-08-01",
        "end": "2030-08-04",
        "payment_method": "CARD"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["nights"], 3);
    assert_eq!(body["total_price"], 450.0);
    assert_eq!(body["rental"]["employee_nas"], employee);

    let payment_id = body["rental"]["payment_id"].as_i64().unwrap();
    let res = app.get(&format!("/api/payments/{}", payment_id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let payment = parse_body(res).await;
    assert_eq!(payment["amount"], 450.0);
    assert_eq!(payment["method"], "CARD");
}

#[tokio::test]
async fn test_walk_in_auto_registers_unknown_client() {
    let app = TestApp::new();
    let (room, employee) = setup_front_desk(&app).await;

    let res = app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "555666777",
        "room_number": room,
        "start": "2030-08-01",
        "end": "2030-08-03",
        "payment_method": "CASH",
        "client_name": "Walk In",
        "client_address": "44 Somewhere Blvd"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/api/clients/555666777").await;
    assert_eq!(res.status(), StatusCode::OK);
    let client = parse_body(res).await;
    assert_eq!(client["full_name"], "Walk In");
    assert_eq!(client["registered_on"], Utc::now().date_naive().to_string());
}

#[tokio::test]
async fn test_walk_in_does_not_overwrite_existing_client() {
    let app = TestApp::new();
    let (room, employee) = setup_front_desk(&app).await;
    app.create_client("100200300", "Ada Guest").await;

    let res = app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-08-01",
        "end": "2030-08-03",
        "client_name": "Impostor"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get("/api/clients/100200300").await;
    assert_eq!(parse_body(res).await["full_name"], "Ada Guest");
}

#[tokio::test]
async fn test_walk_in_conflicts_with_existing_reservation() {
    let app = TestApp::new();
    let (room, employee) = setup_front_desk(&app).await;
    app.create_client("100200300", "Ada Guest").await;
    app.create_reservation("100200300", room, "2030-08-02", "2030-08-05").await;

    let res = app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-08-04",
        "end": "2030-08-08"
    })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_walk_in_rejects_mismatched_payment_amount() {
    let app = TestApp::new();
    let (room, employee) = setup_front_desk(&app).await;
    app.create_client("100200300", "Ada Guest").await;

    let res = app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-08-01",
        "end": "2030-08-04",
        "payment_amount": 999.0
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // The matching amount is accepted.
    let res = app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-08-01",
        "end": "2030-08-04",
        "payment_amount": 450.0
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_walk_in_unknown_employee_or_room() {
    let app = TestApp::new();
    let (room, _) = setup_front_desk(&app).await;
    app.create_client("100200300", "Ada Guest").await;

    let res = app.post("/api/rentals", json!({
        "employee_id": "000000000",
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-08-01",
        "end": "2030-08-04"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.post("/api/rentals", json!({
        "employee_id": "700800900",
        "client_id": "100200300",
        "room_number": 9999,
        "start": "2030-08-01",
        "end": "2030-08-04"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rented_room_disappears_from_availability() {
    let app = TestApp::new();
    let (room, employee) = setup_front_desk(&app).await;
    app.create_client("100200300", "Ada Guest").await;

    app.post("/api/rentals", json!({
        "employee_id": employee,
        "client_id": "100200300",
        "room_number": room,
        "start": "2030-08-01",
        "end": "2030-08-04"
    })).await;

    let res = app.get("/api/rooms/available?start=2030-08-03&end=2030-08-06").await;
    let numbers: Vec<i64> = parse_body(res).await.as_array().unwrap().iter()
        .map(|r| r["number"].as_i64().unwrap()).collect();
    assert!(!numbers.contains(&room));
}
