#![allow(clippy::unwrap_used)]
// Repository behaviour against a mocked backend.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tripkit_api::ApiClient;
use tripkit_core::{
    BookingDraft, BookingFilter, BookingStatus, ClientConfig, Controller, CoreError, Customer,
    EntityId, MemoryStorage, NotificationLevel, SessionStorage,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with(storage: Arc<MemoryStorage>) -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let api = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let config =
        ClientConfig::new(Url::parse(&server.uri()).unwrap()).with_storage(storage);
    (server, Controller::with_client(config, api))
}

async fn setup() -> (MockServer, Controller) {
    setup_with(Arc::new(MemoryStorage::new())).await
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

fn page(items: Vec<serde_json::Value>) -> serde_json::Value {
    let total = items.len();
    json!({ "items": items, "total": total, "page": 1, "limit": 20, "pages": 1 })
}

fn draft() -> BookingDraft {
    BookingDraft {
        customer: Customer {
            name: "Ana Silva".into(),
            email: "ana@example.com".into(),
            phone: None,
        },
        tour_id: EntityId::from("t1"),
        start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        end_date: None,
        participants: Vec::new(),
        notes: None,
    }
}

// ── Read caching ────────────────────────────────────────────────────

#[tokio::test]
async fn test_second_list_is_served_from_cache() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![booking_json("b1", "pending")])))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    let first = bookings.get_all(None, false).await.unwrap();
    let second = bookings.get_all(None, false).await.unwrap();

    assert_eq!(first.len(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(bookings.cache().is_cache_valid("list"));
}

#[tokio::test]
async fn test_force_refresh_bypasses_cache() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![booking_json("b1", "pending")])))
        .expect(2)
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    bookings.get_all(None, false).await.unwrap();
    bookings.get_all(None, true).await.unwrap();
}

#[tokio::test]
async fn test_filtered_list_bypasses_cache_and_is_not_stamped() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(query_param("status", "confirmed"))
        .respond_with(ok(page(vec![booking_json("b2", "confirmed")])))
        .expect(2)
        .mount(&server)
        .await;

    let filter = BookingFilter {
        status: Some(vec![BookingStatus::Confirmed]),
        ..BookingFilter::default()
    };
    let bookings = controller.bookings();
    bookings.get_all(Some(&filter), false).await.unwrap();
    let items = bookings.get_all(Some(&filter), false).await.unwrap();

    assert_eq!(items.len(), 1);
    assert!(!bookings.cache().is_cache_valid("list"));
}

#[tokio::test]
async fn test_read_failure_sets_error_without_notifying() {
    let (server, controller) = setup().await;
    let mut rx = controller.subscribe_notifications();

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "success": false, "message": "Database unavailable" })),
        )
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    let err = bookings.get_all(None, false).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: 500, .. }));
    assert_eq!(
        bookings.cache().error("list").as_deref(),
        Some("Database unavailable")
    );
    assert!(!bookings.cache().is_loading("list"));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_missing_record_maps_to_not_found() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings/nope"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "success": false, "message": "Booking not found" })),
        )
        .mount(&server)
        .await;

    let err = controller
        .bookings()
        .get_by_id(&EntityId::from("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_adds_record_and_notifies() {
    let (server, controller) = setup().await;
    let mut rx = controller.subscribe_notifications();

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ok(booking_json("b9", "pending")))
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    let created = bookings.create(&draft()).await.unwrap();

    assert_eq!(created.id.as_str(), "b9");
    assert_eq!(bookings.cache().len(), 1);
    assert_eq!(bookings.cache().filtered().len(), 1);

    let toast = rx.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Success);
    assert_eq!(toast.message, "Booking created successfully");
}

#[tokio::test]
async fn test_failed_create_leaves_list_untouched() {
    let (server, controller) = setup().await;
    let mut rx = controller.subscribe_notifications();

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![booking_json("b1", "pending")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "success": false, "message": "Tour is fully booked" })),
        )
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    bookings.get_all(None, false).await.unwrap();
    let err = bookings.create(&draft()).await.unwrap_err();

    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    assert_eq!(bookings.cache().len(), 1);
    assert!(!bookings.cache().is_loading("mutation"));
    assert_eq!(
        bookings.cache().error("mutation").as_deref(),
        Some("Tour is fully booked")
    );

    let toast = rx.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(toast.message, "Tour is fully booked");
}

#[tokio::test]
async fn test_create_network_error_sets_mutation_error() {
    // Reserve a port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base = format!("http://127.0.0.1:{port}");
    let api = ApiClient::from_reqwest(&base, reqwest::Client::new()).unwrap();
    let config = ClientConfig::new(Url::parse(&base).unwrap())
        .with_storage(Arc::new(MemoryStorage::new()));
    let controller = Controller::with_client(config, api);
    let mut rx = controller.subscribe_notifications();

    let bookings = controller.bookings();
    let err = bookings.create(&draft()).await.unwrap_err();

    assert!(matches!(err, CoreError::ConnectionFailed { .. }), "{err:?}");
    assert!(bookings.cache().is_empty());
    assert!(!bookings.cache().is_loading("mutation"));
    assert_eq!(bookings.cache().error("mutation"), Some(err.user_message()));

    let toast = rx.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Error);
}

#[tokio::test]
async fn test_delete_uses_backend_message() {
    let (server, controller) = setup().await;
    let mut rx = controller.subscribe_notifications();

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![
            booking_json("b1", "pending"),
            booking_json("b2", "pending"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/bookings/b1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Booking BK-b1 removed" })),
        )
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    bookings.get_all(None, false).await.unwrap();
    bookings.delete(&EntityId::from("b1")).await.unwrap();

    assert_eq!(bookings.cache().len(), 1);
    assert!(bookings.cache().get(&EntityId::from("b1")).is_none());
    assert_eq!(rx.try_recv().unwrap().message, "Booking BK-b1 removed");
}

#[tokio::test]
async fn test_delete_clears_selection_of_unlisted_record() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings/x9"))
        .respond_with(ok(booking_json("x9", "pending")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/bookings/x9"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Booking BK-x9 removed" })),
        )
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    let id = EntityId::from("x9");
    bookings.get_by_id(&id).await.unwrap();
    assert!(bookings.cache().is_empty());
    assert!(bookings.cache().selected().is_some());

    bookings.delete(&id).await.unwrap();
    assert!(bookings.cache().selected().is_none());
}

#[tokio::test]
async fn test_status_change_replaces_cached_record() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![booking_json("b1", "pending")])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/bookings/b1/status"))
        .respond_with(ok(booking_json("b1", "confirmed")))
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    bookings.get_all(None, false).await.unwrap();
    bookings
        .update_status(&EntityId::from("b1"), BookingStatus::Confirmed)
        .await
        .unwrap();

    let cached = bookings.cache().get(&EntityId::from("b1")).unwrap();
    assert_eq!(cached.status, BookingStatus::Confirmed);
}

// ── Views and stats ─────────────────────────────────────────────────

#[tokio::test]
async fn test_overlapping_payment_reads_for_two_bookings_both_land() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![
            booking_json("a", "confirmed"),
            booking_json("b", "confirmed"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookings/a/payments"))
        .respond_with(
            ok(json!([{ "amount": 300.0, "method": "card" }]))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bookings/b/payments"))
        .respond_with(ok(json!([{ "amount": 150.0, "method": "cash" }])))
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    bookings.get_all(None, false).await.unwrap();

    let (a, b) = (EntityId::from("a"), EntityId::from("b"));
    let (first, second) = tokio::join!(bookings.payments(&a), async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        bookings.payments(&b).await
    });
    first.unwrap();
    second.unwrap();

    let cache = bookings.cache();
    assert_eq!(cache.get(&a).unwrap().payments.len(), 1);
    assert_eq!(cache.get(&b).unwrap().payments.len(), 1);
}

#[tokio::test]
async fn test_popular_destinations_cached_as_view() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/destinations/popular"))
        .respond_with(ok(json!([
            { "_id": "d1", "name": "Lisbon", "slug": "lisbon", "country": "Portugal" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let destinations = controller.destinations();
    let first = destinations.popular(false).await.unwrap();
    let second = destinations.popular(false).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(second[0].name, "Lisbon");
    // Views never touch the main list.
    assert!(destinations.cache().is_empty());
}

#[tokio::test]
async fn test_stats_cached() {
    let (server, controller) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bookings/stats"))
        .respond_with(ok(json!({ "total": 4, "pending": 1, "totalRevenue": 3600.0 })))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = controller.bookings();
    let stats = bookings.stats(false).await.unwrap();
    let again = bookings.stats(false).await.unwrap();

    assert_eq!(stats.total, 4);
    assert_eq!(stats, again);
}

// ── Session persistence ─────────────────────────────────────────────

#[tokio::test]
async fn test_session_survives_controller_restart() {
    let storage = Arc::new(MemoryStorage::new());
    let (server, controller) = setup_with(Arc::clone(&storage)).await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![booking_json("b1", "pending")])))
        .expect(1)
        .mount(&server)
        .await;

    controller.bookings().get_all(None, false).await.unwrap();
    assert!(storage.load("booking-storage").unwrap().is_some());

    // Same storage, fresh controller: the list window is still open.
    let api = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap()).with_storage(storage);
    let restarted = Controller::with_client(config, api);

    let items = restarted.bookings().get_all(None, false).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].reference, "BK-b1");
}

#[tokio::test]
async fn test_stale_session_refetches_but_keeps_items() {
    let storage = Arc::new(MemoryStorage::new());
    let stale = (Utc::now() - chrono::Duration::minutes(10)).timestamp_millis();
    storage
        .store(
            "booking-storage",
            &json!({
                "items": [booking_json("old", "pending")],
                "timestamps": { "list": stale }
            })
            .to_string(),
        )
        .unwrap();

    let (server, controller) = setup_with(storage).await;
    let bookings = controller.bookings();
    assert_eq!(bookings.cache().len(), 1);
    assert!(!bookings.cache().is_cache_valid("list"));

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ok(page(vec![booking_json("new", "confirmed")])))
        .expect(1)
        .mount(&server)
        .await;

    let items = bookings.get_all(None, false).await.unwrap();
    assert_eq!(items[0].id.as_str(), "new");
}

#[tokio::test]
async fn test_clear_session_removes_snapshots() {
    let storage = Arc::new(MemoryStorage::new());
    storage.store("tour-storage", "{}").unwrap();
    let (_server, controller) = setup_with(Arc::clone(&storage)).await;

    controller.clear_session().unwrap();
    assert_eq!(storage.load("tour-storage").unwrap(), None);
}
