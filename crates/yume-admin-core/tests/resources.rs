mod common;

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yume_admin_core::api::ApiError;
use yume_admin_core::auth::{signup, Destination, NewAccount};
use yume_admin_core::dashboard::{OrderFilter, OrderSort};
use yume_admin_core::models::{DishForm, ImageUpload, OrderStatus};

use common::{harness, mount_refresh, requests_to};

fn dish_form(image: bool) -> DishForm {
    DishForm {
        name: "Gyoza".to_string(),
        price: 6.0,
        ingredients: "Pork dumplings".to_string(),
        image: image.then(|| ImageUpload {
            file_name: "gyoza.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: b"fake-jpeg".to_vec(),
        }),
    }
}

#[tokio::test]
async fn test_fetch_orders_busts_cache_and_accepts_single_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "OrderID": 7,
            "Status": "Delivering",
            "Paid": 1,
            "Items": [{"Name": "Shoyu Ramen", "Price": "12.50", "Quantity": 2}]
        })))
        .mount(&server)
        .await;

    let h = harness(&server, Some("access-1"), Some("refresh-1"));
    let orders = h.client.fetch_orders().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Delivering);
    assert_eq!(orders[0].total(), 25.0);

    let requests = server.received_requests().await.unwrap();
    let has_buster = requests[0].url.query_pairs().any(|(k, v)| k == "t" && !v.is_empty());
    assert!(has_buster, "missing cache-buster in {}", requests[0].url);
}

#[tokio::test]
async fn test_fetch_order_takes_first_element_of_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"OrderID": 2, "Status": "processing"},
            {"OrderID": 99, "Status": "completed"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let h = harness(&server, Some("access-1"), None);
    let order = h.client.fetch_order(2).await.unwrap();
    assert_eq!(order.id, 2);

    let err = h.client.fetch_order(3).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_update_order_status_keeps_paid_and_stamps_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "OrderID": 2, "Status": "delivering", "Paid": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/orders/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("access-1"), None);
    let order = h.client.fetch_order(2).await.unwrap();
    h.client
        .update_order_status(&order, OrderStatus::Completed)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body["Status"], "completed");
    assert_eq!(body["Paid"], true);
    assert!(body["Completed_at"].is_string());
    assert!(body.get("Delivering_at").is_none());
}

#[tokio::test]
async fn test_create_dish_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/dishes"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("access-1"), None);
    h.client.create_dish(&dish_form(true)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "{}", content_type);

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"Name\""));
    assert!(body.contains("Gyoza"));
    assert!(body.contains("filename=\"gyoza.jpg\""));
}

#[tokio::test]
async fn test_create_dish_without_image_is_rejected_locally() {
    let server = MockServer::start().await;
    let h = harness(&server, Some("access-1"), None);

    let err = h.client.create_dish(&dish_form(false)).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.user_message(), "An image is required for a new dish");
    assert_eq!(requests_to(&server, "POST", "/api/v1/dishes").await, 0);
}

#[tokio::test]
async fn test_multipart_upload_is_rebuilt_for_retry() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/dishes/4"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/dishes/4"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "refresh-1", "fresh", 1).await;

    let h = harness(&server, Some("stale"), Some("refresh-1"));
    h.client.update_dish(4, &dish_form(true)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let retry = requests
        .iter()
        .filter(|r| r.method.as_str() == "PUT")
        .last()
        .unwrap();
    assert!(String::from_utf8_lossy(&retry.body).contains("filename=\"gyoza.jpg\""));
}

#[tokio::test]
async fn test_delete_dish_accepts_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/dishes/4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("access-1"), None);
    h.client.delete_dish(4).await.unwrap();
}

#[tokio::test]
async fn test_fetch_board_survives_user_lookup_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"OrderID": 1, "UserID": 123, "Status": "ordered", "Paid": true, "TotalAmount": 14.5},
            {"OrderID": 99, "UserID": 789, "Status": "completed", "Paid": true, "TotalAmount": 18.75}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = harness(&server, Some("access-1"), None);
    let board = h.client.fetch_board().await.unwrap();

    assert!(board.users.is_empty());
    assert_eq!(board.customer_name(&board.orders[0]), "User #123");
    let active = board.active(&OrderFilter::default(), OrderSort::default());
    assert_eq!(active.len(), 1);
    let stats = board.stats();
    assert_eq!((stats.active, stats.completed), (1, 1));
    assert_eq!(stats.total_profit, 33.25);
}

#[tokio::test]
async fn test_fetch_board_ends_session_once_when_refresh_fails() {
    let server = MockServer::start().await;
    for resource in ["/api/v1/orders", "/api/v1/users"] {
        Mock::given(method("GET"))
            .and(path(resource))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("stale"), Some("refresh-1"));
    let err = h.client.fetch_board().await.unwrap_err();

    assert!(err.is_auth_expired());
    assert_eq!(requests_to(&server, "POST", "/api/v1/auth/refresh").await, 1);
    assert_eq!(h.navigator.visits(), vec![Destination::Login]);
}

#[tokio::test]
async fn test_fetch_board_labels_customers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"OrderID": 1, "UserID": 123}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"userID": 123, "username": "Aiko", "last_name": "Tanaka"}
        ])))
        .mount(&server)
        .await;

    let h = harness(&server, Some("access-1"), None);
    let board = h.client.fetch_board().await.unwrap();
    assert_eq!(board.customer_name(&board.orders[0]), "Aiko Tanaka");
}

#[tokio::test]
async fn test_signup_posts_customer_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users"))
        .and(body_json(json!({
            "username": "Aiko",
            "last_name": "Tanaka",
            "email": "aiko@example.test",
            "password": "secret1",
            "phone_number": "0612345678",
            "address": "Ramenstraat 1",
            "role": "user"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"userID": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None, None);
    let account = NewAccount {
        first_name: "Aiko".to_string(),
        last_name: "Tanaka".to_string(),
        email: "aiko@example.test".to_string(),
        phone: "0612345678".to_string(),
        address: "Ramenstraat 1".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
    };
    signup(&h.client, &account).await.unwrap();

    assert_eq!(h.navigator.visits(), vec![Destination::Login]);
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}
