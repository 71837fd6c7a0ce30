use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use flodesk::FlodeskClient;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use waitlist::domain::Lead;
use waitlist::segments::{SegmentLookup, SegmentResolver};
use waitlist::submission::LeadSubmissionService;

// Basic auth header for the key "test-key" with an empty password
const EXPECTED_AUTH: &str = "Basic dGVzdC1rZXk6";

#[derive(Clone, Default)]
struct MockFlodesk {
    listing_calls: Arc<AtomicUsize>,
    subscribers: Arc<Mutex<Vec<Value>>>,
}

#[derive(Deserialize)]
struct ListingQuery {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    per_page: u32,
}

async fn list_segments(
    State(mock): State<MockFlodesk>,
    headers: HeaderMap,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Value>, StatusCode> {
    if !is_authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    assert_eq!(query.per_page, 50);

    mock.listing_calls.fetch_add(1, Ordering::SeqCst);

    // Page 1 is full of decoys; the waitlist segments only appear on page 2
    let body = match query.page {
        1 => {
            let decoys: Vec<Value> = (0..50)
                .map(|i| {
                    json!({"id": format!("seg_decoy_{i}"), "name": format!("Newsletter {i}")})
                })
                .collect();
            json!({"data": decoys, "meta": {"total_pages": 2}})
        }
        _ => json!({
            "data": [
                {"id": "seg_123", "name": "Whagons5-waitlist-ENGLISH"},
                {"id": "seg_456", "name": "Whagons5-waitlist-ESPANOL"},
            ],
            "meta": {"total_pages": 2},
        }),
    };
    Ok(Json(body))
}

async fn create_subscriber(
    State(mock): State<MockFlodesk>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    if !is_authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    mock.subscribers.lock().unwrap().push(body);
    StatusCode::CREATED
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == EXPECTED_AUTH)
        .unwrap_or(false)
}

async fn spawn_mock() -> (MockFlodesk, SocketAddr) {
    let mock = MockFlodesk::default();
    let router = Router::new()
        .route("/segments", get(list_segments))
        .route("/subscribers", post(create_subscriber))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (mock, addr)
}

fn client_for(addr: SocketAddr) -> FlodeskClient {
    FlodeskClient::with_base_url("test-key", format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn test_resolves_segment_across_pages() {
    let (mock, addr) = spawn_mock().await;
    let resolver = SegmentResolver::new(Arc::new(client_for(addr)));

    let lookup = resolver.resolve("Whagons5-waitlist-ENGLISH").await;
    assert_eq!(lookup, SegmentLookup::Found("seg_123".to_string()));
    assert_eq!(mock.listing_calls.load(Ordering::SeqCst), 2);

    // Second resolution within the TTL is served from the cache
    let lookup = resolver.resolve("Whagons5-waitlist-ENGLISH").await;
    assert_eq!(lookup, SegmentLookup::Found("seg_123".to_string()));
    assert_eq!(mock.listing_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rejects_blank_credential() {
    assert!(FlodeskClient::new("").is_err());
    assert!(FlodeskClient::new("   ").is_err());
}

#[tokio::test]
async fn test_submits_subscriber_with_resolved_segment() {
    let (mock, addr) = spawn_mock().await;
    let client = Arc::new(client_for(addr));
    let service = LeadSubmissionService::new(SegmentResolver::new(client.clone()), client);

    let lead = Lead {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        company: "Acme".to_string(),
        industry: "technology".to_string(),
        country: Some("United Kingdom".to_string()),
        language: Some("en".to_string()),
    };
    service.submit(&lead).await.unwrap();

    let subscribers = mock.subscribers.lock().unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(
        subscribers[0],
        json!({
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "segment_ids": ["seg_123"],
            "custom_fields": {
                "company": "Acme",
                "industry": "technology",
                "country": "United Kingdom",
                "language": "en",
                "source": "whagons-website",
            },
        })
    );
}

#[tokio::test]
async fn test_unreachable_provider_fails_lookup_without_caching() {
    // Bind a listener and drop it so the port refuses connections
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let resolver = SegmentResolver::new(Arc::new(client_for(addr)));
    assert_eq!(
        resolver.resolve("Whagons5-waitlist-ENGLISH").await,
        SegmentLookup::LookupFailed
    );
}
