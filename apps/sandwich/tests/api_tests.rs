//! End-to-end tests for the HTTP API.
//!
//! Each test builds the full router over a fresh redb file and drives it
//! with axum-test.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use sandwich::api::{AppState, router};
use sandwich_core::Store;
use serde_json::{Value, json};
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Start a server over an empty store. Keep the `TempDir` alive.
fn empty_server() -> (TempDir, TestServer) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("api.redb")).unwrap();
    let server = TestServer::new(router(AppState::new(store))).unwrap();
    (dir, server)
}

/// Start a server over the sample shop.
fn seeded_server() -> (TempDir, TestServer) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("api.redb")).unwrap();
    store.seed().unwrap();
    let server = TestServer::new(router(AppState::new(store))).unwrap();
    (dir, server)
}

/// Id of a seeded sandwich by name.
async fn sandwich_id(server: &TestServer, name: &str) -> u64 {
    let menu: Vec<Value> = server.get("/sandwiches").await.json();
    menu.iter()
        .find(|s| s["sandwich_name"] == name)
        .and_then(|s| s["id"].as_u64())
        .unwrap()
}

/// Current stock of a seeded resource by item name.
async fn stock_of(server: &TestServer, item: &str) -> u64 {
    let resources: Vec<Value> = server.get("/resources").await.json();
    resources
        .iter()
        .find(|r| r["item"] == item)
        .and_then(|r| r["amount"].as_u64())
        .unwrap()
}

// =============================================================================
// SERVICE
// =============================================================================

#[tokio::test]
async fn test_health_reports_service() {
    let (_dir, server) = empty_server();
    for path in ["/", "/health"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert!(body["version"].is_string());
    }
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_resource_crud() {
    let (_dir, server) = empty_server();

    let created = server
        .post("/resources")
        .json(&json!({"item": "Bread", "amount": 100}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_u64().unwrap();

    let duplicate = server
        .post("/resources")
        .json(&json!({"item": "Bread", "amount": 1}))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let updated = server
        .put(&format!("/resources/{id}"))
        .json(&json!({"amount": 80}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let body: Value = updated.json();
    assert_eq!(body["amount"], 80);
    assert_eq!(body["item"], "Bread");

    let deleted = server.delete(&format!("/resources/{id}")).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = server.get(&format!("/resources/{id}")).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["detail"], "Id not found!");
}

#[tokio::test]
async fn test_sandwich_money_and_filters() {
    let (_dir, server) = empty_server();

    let created = server
        .post("/sandwiches")
        .json(&json!({"sandwich_name": "Classic Cheese", "price": 5.99, "category": "vegetarian"}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["price"], "5.99");
    assert_eq!(body["is_available"], true);

    server
        .post("/sandwiches")
        .json(&json!({"sandwich_name": "Chicken Club", "price": "8.99", "category": "meat"}))
        .await;

    let veg: Vec<Value> = server
        .get("/sandwiches")
        .add_query_param("category", "vegetarian")
        .await
        .json();
    assert_eq!(veg.len(), 1);
    assert_eq!(veg[0]["sandwich_name"], "Classic Cheese");

    let bad_price = server
        .post("/sandwiches")
        .json(&json!({"sandwich_name": "Cheap", "price": 1.999}))
        .await;
    assert_eq!(bad_price.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = bad_price.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("at most two fractional digits"));
}

#[tokio::test]
async fn test_malformed_input_gets_json_detail() {
    let (_dir, server) = empty_server();

    let negative = server
        .post("/sandwiches")
        .json(&json!({"sandwich_name": "Refund", "price": -1}))
        .await;
    assert_eq!(negative.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = negative.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("amount must not be negative"));

    let bad_enum = server
        .post("/orders")
        .json(&json!({"customer_name": "Ada", "order_type": "drone", "order_details": []}))
        .await;
    assert_eq!(bad_enum.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(bad_enum.json::<Value>()["detail"].is_string());

    let bad_date = server
        .get("/orders")
        .add_query_param("start_date", "soon")
        .await;
    assert_eq!(bad_date.status_code(), StatusCode::BAD_REQUEST);
    assert!(bad_date.json::<Value>()["detail"].is_string());

    let bad_id = server.get("/orders/abc").await;
    assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);
    assert!(bad_id.json::<Value>()["detail"].is_string());
}

#[tokio::test]
async fn test_trailing_slash_paths_are_served() {
    let (_dir, server) = empty_server();

    let created = server
        .post("/resources/")
        .json(&json!({"item": "Bread", "amount": 10}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let orders = server.get("/orders/").await;
    assert_eq!(orders.status_code(), StatusCode::OK);
    assert!(orders.json::<Vec<Value>>().is_empty());

    let resources: Vec<Value> = server.get("/resources/").await.json();
    assert_eq!(resources.len(), 1);
}

#[tokio::test]
async fn test_recipe_requires_existing_parents() {
    let (_dir, server) = seeded_server();
    let response = server
        .post("/recipes")
        .json(&json!({"sandwich_id": 999, "resource_id": 1, "amount": 1}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["detail"], "Sandwich ID 999 not found");
}

// =============================================================================
// ORDERS
// =============================================================================

#[tokio::test]
async fn test_place_order_with_promo() {
    let (_dir, server) = seeded_server();
    let cheese = sandwich_id(&server, "Classic Cheese").await;
    let bread_before = stock_of(&server, "Bread").await;

    let response = server
        .post("/orders")
        .json(&json!({
            "customer_name": "Ada",
            "order_type": "delivery",
            "promo_code": "SAVE10",
            "order_details": [{"sandwich_id": cheese, "amount": 2}]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let order: Value = response.json();
    assert_eq!(order["total_price"], "10.78");
    assert_eq!(order["order_status"], "pending");
    assert_eq!(order["order_type"], "delivery");
    assert_eq!(order["order_details"].as_array().unwrap().len(), 1);
    assert_eq!(stock_of(&server, "Bread").await, bread_before - 4);

    let tracking = order["tracking_number"].as_str().unwrap();
    let tracked = server.get(&format!("/orders/tracking/{tracking}")).await;
    assert_eq!(tracked.status_code(), StatusCode::OK);
    assert_eq!(tracked.json::<Value>()["id"], order["id"]);
}

#[tokio::test]
async fn test_insufficient_stock_is_rejected_without_changes() {
    let (_dir, server) = seeded_server();
    let club = sandwich_id(&server, "Chicken Club").await;

    // 25 chicken in stock, one per sandwich.
    let response = server
        .post("/orders")
        .json(&json!({
            "customer_name": "Ada",
            "order_details": [{"sandwich_id": club, "amount": 30}]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let detail = response.json::<Value>()["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Insufficient ingredients: "));
    assert!(detail.contains("Insufficient Chicken: need 30, have 25"));

    assert_eq!(stock_of(&server, "Chicken").await, 25);
    let orders: Vec<Value> = server.get("/orders").await.json();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_invalid_promo_code() {
    let (_dir, server) = seeded_server();
    let cheese = sandwich_id(&server, "Classic Cheese").await;
    let response = server
        .post("/orders")
        .json(&json!({
            "customer_name": "Ada",
            "promo_code": "BOGUS",
            "order_details": [{"sandwich_id": cheese, "amount": 1}]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["detail"], "Invalid promotional code");

    let lookup = server.get("/promotional-codes/code/BOGUS").await;
    assert_eq!(lookup.status_code(), StatusCode::NOT_FOUND);
    let found = server.get("/promotional-codes/code/WELCOME20").await;
    assert_eq!(found.json::<Value>()["discount_percent"], "20.00");
}

#[tokio::test]
async fn test_payment_blocks_order_delete() {
    let (_dir, server) = seeded_server();
    let blt = sandwich_id(&server, "BLT").await;
    let order: Value = server
        .post("/orders")
        .json(&json!({"customer_name": "Ada", "order_details": [{"sandwich_id": blt, "amount": 1}]}))
        .await
        .json();
    let order_id = order["id"].as_u64().unwrap();

    let payment = server
        .post("/payments")
        .json(&json!({"order_id": order_id, "amount": "7.99", "payment_method": "credit_card"}))
        .await;
    assert_eq!(payment.status_code(), StatusCode::CREATED);
    assert_eq!(payment.json::<Value>()["payment_status"], "pending");

    let again = server
        .post("/payments")
        .json(&json!({"order_id": order_id, "amount": "7.99", "payment_method": "cash"}))
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);

    let by_order = server.get(&format!("/payments/order/{order_id}")).await;
    assert_eq!(by_order.json::<Value>()["amount"], "7.99");

    let delete = server.delete(&format!("/orders/{order_id}")).await;
    assert_eq!(delete.status_code(), StatusCode::CONFLICT);
}

// =============================================================================
// REVIEWS AND ANALYTICS
// =============================================================================

#[tokio::test]
async fn test_reviews_and_analytics() {
    let (_dir, server) = seeded_server();
    let veggie = sandwich_id(&server, "Veggie Delight").await;
    let order: Value = server
        .post("/orders")
        .json(&json!({"customer_name": "Ada", "order_details": [{"sandwich_id": veggie, "amount": 3}]}))
        .await
        .json();
    let order_id = order["id"].as_u64().unwrap();

    let bad = server
        .post("/reviews")
        .json(&json!({"order_id": order_id, "sandwich_id": veggie, "rating": 6}))
        .await;
    assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);

    for rating in [1, 2] {
        let review = server
            .post("/reviews")
            .json(&json!({"order_id": order_id, "sandwich_id": veggie, "rating": rating}))
            .await;
        assert_eq!(review.status_code(), StatusCode::CREATED);
        assert_eq!(review.json::<Value>()["sandwich"]["id"], veggie);
    }

    let complaints: Vec<Value> = server.get("/analytics/complaints").await.json();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0]["average_rating"], 1.5);

    let ratings: Value = server
        .get(&format!("/analytics/dish-ratings/{veggie}"))
        .await
        .json();
    assert_eq!(ratings["review_count"], 2);
    assert_eq!(ratings["min_rating"], 1);
    assert_eq!(ratings["max_rating"], 2);

    let popular: Vec<Value> = server
        .get("/analytics/popular-dishes")
        .add_query_param("limit", 5)
        .await
        .json();
    assert_eq!(popular[0]["sandwich_id"], veggie);
    assert_eq!(popular[0]["total_quantity"], 3);

    let revenue: Value = server.get("/analytics/revenue").await.json();
    assert_eq!(revenue["order_count"], 1);
    assert_eq!(revenue["total_revenue"], "20.97");

    let missing = server.get("/analytics/dish-ratings/999").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["detail"], "Sandwich not found");
}

#[tokio::test]
async fn test_revenue_for_a_day_without_orders() {
    let (_dir, server) = seeded_server();
    let revenue: Value = server
        .get("/analytics/revenue")
        .add_query_param("date", "2000-01-01")
        .await
        .json();
    assert_eq!(revenue["order_count"], 0);
    assert_eq!(revenue["total_revenue"], "0.00");
    assert_eq!(revenue["date"], "2000-01-01");
}
