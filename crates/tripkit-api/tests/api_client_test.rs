#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tripkit_api::models::{
    Booking, BookingStatus, Destination, Payment, PaymentStatus, Service, Tour,
};
use tripkit_api::{ApiClient, EntityId, Error, SearchRequest, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn booking_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "reference": format!("BK-{id}"),
        "customer": { "name": "Ana Silva", "email": "ana@example.com" },
        "status": status,
        "startDate": "2024-07-01",
        "totalAmount": 900.0
    })
}

// ── Envelope and paging ─────────────────────────────────────────────

#[tokio::test]
async fn test_list_unwraps_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(json!({
            "items": [booking_json("b1", "pending"), booking_json("b2", "confirmed")],
            "total": 2,
            "page": 1,
            "limit": 20,
            "pages": 1
        })))
        .mount(&server)
        .await;

    let page = client.list::<Booking>().await.unwrap();
    assert_eq!(page.total, 2);
    assert!(!page.has_more());
    assert_eq!(page.items[1].status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn test_get_by_id_joins_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/destinations/d1"))
        .respond_with(ok(json!({
            "id": "d1",
            "name": "Lisbon",
            "country": "Portugal",
            "activeTours": 3
        })))
        .mount(&server)
        .await;

    let destination: Destination = client.get_by_id(&EntityId::from("d1")).await.unwrap();
    assert_eq!(destination.name, "Lisbon");
    assert!(destination.has_active_tours());
}

#[tokio::test]
async fn test_success_false_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Service name already exists"
        })))
        .mount(&server)
        .await;

    let draft = tripkit_api::models::ServiceDraft {
        name: "Airport pickup".into(),
        category: tripkit_api::models::ServiceCategory::Transport,
        description: String::new(),
        price: 40.0,
        pricing_unit: tripkit_api::models::PricingUnit::PerGroup,
        provider: None,
    };
    let result = client.create::<Service>(&draft).await;

    match result {
        Err(Error::Rejected { message }) => assert_eq!(message, "Service name already exists"),
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_returns_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/tours/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Tour deleted"
        })))
        .mount(&server)
        .await;

    let message = client.delete_by_id::<Tour>(&EntityId::from("t1")).await.unwrap();
    assert_eq!(message, "Tour deleted");
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/payments/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Payment not found" })),
        )
        .mount(&server)
        .await;

    let err = client
        .get_by_id::<Payment>(&EntityId::from("missing"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Payment not found"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings/stats"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let result = client.booking_stats().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/tours"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.list::<Tour>().await.unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list::<Booking>().await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Filters, search and sub-resources ───────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Range {
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingQuery {
    status: Option<Vec<BookingStatus>>,
    total_amount: Option<Range>,
    tour_id: Option<EntityId>,
}

#[tokio::test]
async fn test_list_filtered_flattens_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(query_param("status", "pending,confirmed"))
        .and(query_param("totalAmountMin", "100.0"))
        .respond_with(ok(json!({ "items": [], "total": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = BookingQuery {
        status: Some(vec![BookingStatus::Pending, BookingStatus::Confirmed]),
        total_amount: Some(Range {
            min: Some(100.0),
            max: None,
        }),
        tour_id: None,
    };
    let page = client.list_filtered::<Booking, _>(&filters).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn test_search_posts_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/tours/search"))
        .and(body_json(json!({ "query": "douro", "page": 2, "limit": 10 })))
        .respond_with(ok(json!({ "items": [], "total": 0, "page": 2, "pages": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest::<()>::new("douro").paged(2, 10);
    let page = client.search::<Tour, ()>(&request).await.unwrap();
    assert_eq!(page.page, 2);
}

#[tokio::test]
async fn test_refund_posts_reason() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/payments/p1/refund"))
        .and(body_json(json!({ "reason": "duplicate charge" })))
        .respond_with(ok(json!({
            "id": "p1",
            "bookingId": "b1",
            "transactionRef": "TX-1",
            "customerName": "Ana Silva",
            "customerEmail": "ana@example.com",
            "amount": 200.0,
            "method": "card",
            "status": "refunded"
        })))
        .mount(&server)
        .await;

    let payment = client
        .refund_payment(&EntityId::from("p1"), Some("duplicate charge"))
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Refunded);
}

#[tokio::test]
async fn test_update_booking_status_patches() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/bookings/b1/status"))
        .and(body_json(json!({ "status": "confirmed" })))
        .respond_with(ok(booking_json("b1", "confirmed")))
        .mount(&server)
        .await;

    let booking = client
        .update_booking_status(&EntityId::from("b1"), BookingStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
}

// ── Auth header ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    let token: SecretString = "s3cret".to_string().into();
    let client = ApiClient::new(&server.uri(), Some(&token), &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/blogs/slug/hello-world"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ok(json!({
            "id": "p1",
            "slug": "hello-world",
            "title": "Hello world"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let post = client.blog_post_by_slug("hello-world").await.unwrap();
    assert_eq!(post.title, "Hello world");
}
