#![allow(dead_code)]

use hotel_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::memory::MemoryStore,
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

impl TestApp {
    // Backend-agnostic by the port contract; the tests run against the
    // in-memory store so nothing touches disk.
    pub fn new() -> Self {
        let config = Config {
            database_url: None,
            port: 0,
            seed_demo_data: false,
        };

        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState {
            config,
            chain_repo: store.clone(),
            hotel_repo: store.clone(),
            room_repo: store.clone(),
            client_repo: store.clone(),
            employee_repo: store.clone(),
            reservation_repo: store.clone(),
            rental_repo: store.clone(),
            payment_repo: store,
        });

        let router = create_router(state.clone());

        Self { router, state }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                builder.body(Body::from(json.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response<Body> {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Response<Body> {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.request("DELETE", uri, None).await
    }

    pub async fn create_chain(&self, name: &str) -> i64 {
        let res = self.post("/api/chains", serde_json::json!({
            "name": name,
            "head_office_address": format!("{} head office", name),
            "contact_emails": [format!("info@{}.example.com", name.to_lowercase())]
        })).await;
        assert!(res.status().is_success(), "create_chain failed: {}", res.status());
        parse_body(res).await["id"].as_i64().unwrap()
    }

    pub async fn create_hotel(&self, chain_id: i64, name: &str, address: &str, stars: i32) -> i64 {
        let res = self.post("/api/hotels", serde_json::json!({
            "chain_id": chain_id,
            "name": name,
            "address": address,
            "star_category": stars
        })).await;
        assert!(res.status().is_success(), "create_hotel failed: {}", res.status());
        parse_body(res).await["id"].as_i64().unwrap()
    }

    pub async fn create_room(&self, number: i64, hotel_id: i64, price: f64, capacity: i32) -> i64 {
        let res = self.post("/api/rooms", serde_json::json!({
            "number": number,
            "hotel_id": hotel_id,
            "price": price,
            "capacity": capacity,
            "area": 28.0,
            "view_type": "city",
            "amenities": "wifi, tv"
        })).await;
        assert!(res.status().is_success(), "create_room failed: {}", res.status());
        parse_body(res).await["number"].as_i64().unwrap()
    }

    pub async fn create_client(&self, nas: &str, full_name: &str) -> String {
        let res = self.post("/api/clients", serde_json::json!({
            "nas": nas,
            "full_name": full_name,
            "address": "12 Guest Street"
        })).await;
        assert!(res.status().is_success(), "create_client failed: {}", res.status());
        parse_body(res).await["nas"].as_str().unwrap().to_string()
    }

    pub async fn create_employee(&self, nas: &str, hotel_id: i64) -> String {
        let res = self.post("/api/employees", serde_json::json!({
            "nas": nas,
            "full_name": "Front Desk",
            "address": "1 Staff Lane",
            "hotel_id": hotel_id,
            "roles": ["Receptionist"]
        })).await;
        assert!(res.status().is_success(), "create_employee failed: {}", res.status());
        parse_body(res).await["nas"].as_str().unwrap().to_string()
    }

    pub async fn create_reservation(&self, client: &str, room: i64, start: &str, end: &str) -> Value {
        let res = self.post("/api/reservations", serde_json::json!({
            "client_id": client,
            "room_number": room,
            "start": start,
            "end": end
        })).await;
        assert!(res.status().is_success(), "create_reservation failed: {}", res.status());
        parse_body(res).await
    }
}

pub async fn parse_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
