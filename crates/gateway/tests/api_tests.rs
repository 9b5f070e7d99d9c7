use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use hotel_config::{AppConfig, DatabaseConfig};
use hotel_gateway::{create_router, GatewayState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _db_dir: TempDir,
}

struct TestResponse {
    status: StatusCode,
    body: Value,
}

impl TestApp {
    async fn new() -> Self {
        let db_dir = TempDir::new().expect("create temp dir");
        let config = AppConfig {
            database: DatabaseConfig {
                url: format!("sqlite://{}", db_dir.path().join("gateway.db").display()),
                max_connections: 4,
            },
            ..AppConfig::default()
        };

        let state = GatewayState::from_config(&config)
            .await
            .expect("initialise gateway state");

        Self {
            router: create_router(state),
            _db_dir: db_dir,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json_body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json_body).expect("serialize request body"))
        } else {
            Body::empty()
        };

        self.send(builder.body(body).expect("build request")).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("dispatch request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    async fn create_hotel(&self) -> i64 {
        let response = self
            .post(
                "/api/hotels",
                json!({
                    "name": "Harbour View",
                    "address": "1 Rua Augusta",
                    "city": "Lisbon",
                    "phone": "+351 210 000 000",
                    "email": "front@harbour.example",
                    "star_rating": 4
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_i64().expect("hotel id")
    }

    async fn create_room(&self, hotel_id: i64, number: &str) -> i64 {
        let response = self
            .post(
                "/api/rooms",
                json!({
                    "hotel_id": hotel_id,
                    "room_number": number,
                    "room_type": "double",
                    "rate_cents": 12_000,
                    "capacity": 2
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_i64().expect("room id")
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app.get("/api-docs/openapi.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["paths"]["/api/bookings/{id}/check-out"].is_object());
}

#[tokio::test]
async fn test_hotel_crud_and_validation() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel().await;

    let fetched = app.get(&format!("/api/hotels/{hotel_id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["city"], "Lisbon");

    let updated = app
        .request(
            Method::PUT,
            &format!("/api/hotels/{hotel_id}"),
            Some(json!({ "star_rating": 5 })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["star_rating"], 5);

    let invalid = app
        .post(
            "/api/hotels",
            json!({
                "name": "Nowhere",
                "address": "Somewhere",
                "city": "Porto",
                "phone": "+351 220 000 000",
                "email": "desk@nowhere.example",
                "star_rating": 6
            }),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["error"], "400");
    assert!(invalid.body["message"].as_str().unwrap().contains("star_rating"));

    let listed = app.get("/api/hotels?city=Lisbon").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let missing = app.get("/api/hotels/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hotel_with_rooms_cannot_be_deleted() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel().await;
    app.create_room(hotel_id, "101").await;

    let response = app
        .request(Method::DELETE, &format!("/api/hotels/{hotel_id}"), None)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_requests() {
    let app = TestApp::new().await;

    let broken_json = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/hotels")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await;
    assert_eq!(broken_json.status, StatusCode::BAD_REQUEST);
    assert_eq!(broken_json.body["error"], "400");

    let bad_id = app.get("/api/rooms/not-a-number").await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let bad_date = app
        .get("/api/hotels/1/available-rooms?check_in=2031-13-01&check_out=2031-01-03")
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    let unknown_route = app.get("/api/nothing-here").await;
    assert_eq!(unknown_route.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_route.body["error"], "404");
}

#[tokio::test]
async fn test_room_rules() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel().await;
    app.create_room(hotel_id, "101").await;

    let duplicate = app
        .post(
            "/api/rooms",
            json!({
                "hotel_id": hotel_id,
                "room_number": "101",
                "room_type": "suite",
                "rate_cents": 30_000,
                "capacity": 3
            }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let unknown_type = app
        .post(
            "/api/rooms",
            json!({
                "hotel_id": hotel_id,
                "room_number": "102",
                "room_type": "penthouse",
                "rate_cents": 30_000,
                "capacity": 3
            }),
        )
        .await;
    assert_eq!(unknown_type.status, StatusCode::BAD_REQUEST);

    let missing_hotel = app
        .post(
            "/api/rooms",
            json!({
                "hotel_id": 4242,
                "room_number": "1",
                "room_type": "single",
                "rate_cents": 5_000,
                "capacity": 1
            }),
        )
        .await;
    assert_eq!(missing_hotel.status, StatusCode::NOT_FOUND);

    let filtered = app.get("/api/rooms?status=available&room_type=double").await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(filtered.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_booking_lifecycle_over_http() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel().await;
    let room_id = app.create_room(hotel_id, "201").await;

    let booking = app
        .post(
            "/api/bookings",
            json!({
                "room_id": room_id,
                "guest_name": "Ana Sousa",
                "guest_email": "ana@example.com",
                "check_in": "2031-05-01",
                "check_out": "2031-05-04",
                "guests": 2
            }),
        )
        .await;
    assert_eq!(booking.status, StatusCode::CREATED, "{}", booking.body);
    assert_eq!(booking.body["total_cents"], 36_000);
    assert_eq!(booking.body["nights"], 3);
    assert_eq!(booking.body["status"], "booked");
    let booking_id = booking.body["id"].as_i64().unwrap();
    let reference = booking.body["reference"].as_str().unwrap().to_string();

    let overlapping = app
        .post(
            "/api/bookings",
            json!({
                "room_id": room_id,
                "guest_name": "Rui Costa",
                "guest_email": "rui@example.com",
                "check_in": "2031-05-03",
                "check_out": "2031-05-06",
                "guests": 1
            }),
        )
        .await;
    assert_eq!(overlapping.status, StatusCode::CONFLICT);

    let available = app
        .get(&format!(
            "/api/hotels/{hotel_id}/available-rooms?check_in=2031-05-04&check_out=2031-05-05"
        ))
        .await;
    assert_eq!(available.status, StatusCode::OK);
    assert_eq!(available.body.as_array().unwrap().len(), 1);

    let by_reference = app
        .get(&format!("/api/bookings/by-reference/{reference}"))
        .await;
    assert_eq!(by_reference.status, StatusCode::OK);
    assert_eq!(by_reference.body["id"], booking_id);

    let deposit = app
        .post(
            &format!("/api/bookings/{booking_id}/payments"),
            json!({ "amount_cents": 10_000, "method": "card" }),
        )
        .await;
    assert_eq!(deposit.status, StatusCode::CREATED);

    let overpay = app
        .post(
            &format!("/api/bookings/{booking_id}/payments"),
            json!({ "amount_cents": 50_000, "method": "card" }),
        )
        .await;
    assert_eq!(overpay.status, StatusCode::CONFLICT);

    let early_checkout = app
        .post(
            &format!("/api/bookings/{booking_id}/check-out"),
            json!({ "payment_method": "cash" }),
        )
        .await;
    assert_eq!(early_checkout.status, StatusCode::CONFLICT);

    let checked_in = app
        .post(&format!("/api/bookings/{booking_id}/check-in"), json!({}))
        .await;
    assert_eq!(checked_in.status, StatusCode::OK);
    assert_eq!(checked_in.body["status"], "checked_in");

    let room = app.get(&format!("/api/rooms/{room_id}")).await;
    assert_eq!(room.body["status"], "occupied");

    let bad_method = app
        .post(
            &format!("/api/bookings/{booking_id}/check-out"),
            json!({ "payment_method": "cheque" }),
        )
        .await;
    assert_eq!(bad_method.status, StatusCode::BAD_REQUEST);

    let checkout = app
        .post(
            &format!("/api/bookings/{booking_id}/check-out"),
            json!({ "payment_method": "cash" }),
        )
        .await;
    assert_eq!(checkout.status, StatusCode::OK, "{}", checkout.body);
    assert_eq!(checkout.body["previously_paid_cents"], 10_000);
    assert_eq!(checkout.body["amount_charged_cents"], 26_000);
    assert_eq!(checkout.body["payment"]["method"], "cash");
    assert_eq!(checkout.body["booking"]["status"], "checked_out");

    let cancel_after_stay = app
        .post(&format!("/api/bookings/{booking_id}/cancel"), json!({}))
        .await;
    assert_eq!(cancel_after_stay.status, StatusCode::CONFLICT);

    let payments = app
        .get(&format!("/api/transactions?booking_id={booking_id}&kind=payment"))
        .await;
    assert_eq!(payments.body.as_array().unwrap().len(), 2);

    let summary = app
        .get(&format!(
            "/api/reports/financial-summary?hotel_id={hotel_id}&from=2000-01-01&to=2100-01-01"
        ))
        .await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(summary.body["revenue_cents"], 36_000);
    assert_eq!(summary.body["profit_cents"], 36_000);
}

#[tokio::test]
async fn test_cancelled_booking_is_refunded() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel().await;
    let room_id = app.create_room(hotel_id, "301").await;

    let booking = app
        .post(
            "/api/bookings",
            json!({
                "room_id": room_id,
                "guest_name": "Marta Lima",
                "guest_email": "marta@example.com",
                "check_in": "2031-07-10",
                "check_out": "2031-07-12",
                "guests": 1
            }),
        )
        .await;
    let booking_id = booking.body["id"].as_i64().unwrap();

    app.post(
        &format!("/api/bookings/{booking_id}/payments"),
        json!({ "amount_cents": 5_000, "method": "online" }),
    )
    .await;

    let cancelled = app
        .post(&format!("/api/bookings/{booking_id}/cancel"), json!({}))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["booking"]["status"], "cancelled");
    assert_eq!(cancelled.body["refund"]["kind"], "refund");
    assert_eq!(cancelled.body["refund"]["amount_cents"], 5_000);
    assert_eq!(cancelled.body["refund"]["method"], "online");
}

#[tokio::test]
async fn test_inventory_order_flow() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel().await;

    let item = app
        .post(
            "/api/inventory",
            json!({
                "hotel_id": hotel_id,
                "name": "Bath towels",
                "category": "linen",
                "unit": "piece",
                "quantity": 4,
                "reorder_level": 10,
                "unit_cost_cents": 800
            }),
        )
        .await;
    assert_eq!(item.status, StatusCode::CREATED, "{}", item.body);
    let item_id = item.body["id"].as_i64().unwrap();

    let low_stock = app
        .get(&format!("/api/inventory?hotel_id={hotel_id}&low_stock_only=true"))
        .await;
    assert_eq!(low_stock.body.as_array().unwrap().len(), 1);

    let order = app
        .post(
            &format!("/api/inventory/{item_id}/orders"),
            json!({ "quantity": 20, "unit_cost_cents": 750, "supplier": "Linen Co" }),
        )
        .await;
    assert_eq!(order.status, StatusCode::CREATED);
    assert_eq!(order.body["status"], "pending");
    assert_eq!(order.body["total_cents"], 15_000);
    let order_id = order.body["id"].as_i64().unwrap();

    let received = app
        .post(&format!("/api/inventory-transactions/{order_id}/receive"), json!({}))
        .await;
    assert_eq!(received.status, StatusCode::OK, "{}", received.body);
    assert_eq!(received.body["item"]["quantity"], 24);
    assert_eq!(received.body["item"]["unit_cost_cents"], 750);
    assert_eq!(received.body["ledger_entry"]["category"], "inventory");
    assert_eq!(received.body["ledger_entry"]["amount_cents"], 15_000);

    let received_again = app
        .post(&format!("/api/inventory-transactions/{order_id}/receive"), json!({}))
        .await;
    assert_eq!(received_again.status, StatusCode::CONFLICT);

    let too_much = app
        .post(
            &format!("/api/inventory/{item_id}/adjustments"),
            json!({ "delta": -100, "note": "audit" }),
        )
        .await;
    assert_eq!(too_much.status, StatusCode::CONFLICT);

    let adjusted = app
        .post(
            &format!("/api/inventory/{item_id}/adjustments"),
            json!({ "delta": -3, "note": "damaged" }),
        )
        .await;
    assert_eq!(adjusted.status, StatusCode::CREATED);
    assert_eq!(adjusted.body["kind"], "adjustment");

    let entries = app
        .get(&format!("/api/ledger?hotel_id={hotel_id}&category=inventory"))
        .await;
    assert_eq!(entries.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_staff_and_dashboards() {
    let app = TestApp::new().await;
    let hotel_id = app.create_hotel().await;

    let department = app
        .post(
            "/api/departments",
            json!({ "hotel_id": hotel_id, "name": "Front Desk" }),
        )
        .await;
    assert_eq!(department.status, StatusCode::CREATED);

    let employee = app
        .post(
            "/api/employees",
            json!({
                "hotel_id": hotel_id,
                "department_name": "front desk",
                "first_name": "Joana",
                "last_name": "Reis",
                "email": "joana@harbour.example",
                "role": "receptionist",
                "salary_cents": 180_000,
                "hired_on": "2024-03-01"
            }),
        )
        .await;
    assert_eq!(employee.status, StatusCode::CREATED, "{}", employee.body);
    assert_eq!(employee.body["department_name"], "Front Desk");
    let employee_id = employee.body["id"].as_i64().unwrap();

    let unknown_department = app
        .request(
            Method::PUT,
            &format!("/api/employees/{employee_id}"),
            Some(json!({ "department_name": "Kitchen", "salary_cents": 1 })),
        )
        .await;
    assert_eq!(unknown_department.status, StatusCode::NOT_FOUND);

    let unchanged = app.get(&format!("/api/employees/{employee_id}")).await;
    assert_eq!(unchanged.body["salary_cents"], 180_000);

    let found = app
        .get(&format!("/api/hotels/{hotel_id}/departments/FRONT%20DESK"))
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["employee_count"], 1);

    let manager = app
        .get(&format!("/api/dashboards/manager?hotel_id={hotel_id}"))
        .await;
    assert_eq!(manager.status, StatusCode::OK);
    assert_eq!(manager.body["headcount"][0]["employees"], 1);

    let deactivated = app
        .post(&format!("/api/employees/{employee_id}/deactivate"), json!({}))
        .await;
    assert_eq!(deactivated.status, StatusCode::OK);
    assert_eq!(deactivated.body["active"], false);

    let admin = app.get("/api/dashboards/admin").await;
    assert_eq!(admin.status, StatusCode::OK);
    assert_eq!(admin.body["hotels"], 1);
    assert_eq!(admin.body["active_employees"], 0);

    let occupancy = app
        .get(&format!("/api/reports/occupancy?hotel_id={hotel_id}&date=2031-01-01"))
        .await;
    assert_eq!(occupancy.status, StatusCode::OK);
    assert_eq!(occupancy.body["total_rooms"], 0);
    assert_eq!(occupancy.body["occupancy_rate"], 0.0);
}
