use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jiff::{SignedDuration, Timestamp};
use pinhole_core::{Clock, ManualClock};
use pinhole_gateway::{App, AppState};
use pinhole_generator::SeqGenerator;
use pinhole_registry::RegistryService;
use pinhole_storage::{InMemoryClickLedger, InMemoryLinkRepository};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

struct Harness {
    app: Router,
    clock: ManualClock,
}

fn start() -> Timestamp {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

fn harness(base_url: Option<&str>) -> Harness {
    let clock = ManualClock::new(start());
    let shared: Arc<dyn Clock> = Arc::new(clock.clone());

    let repository = Arc::new(InMemoryLinkRepository::new());
    let analytics = Arc::new(InMemoryClickLedger::new());
    let registry = RegistryService::new(
        repository,
        analytics.clone(),
        SeqGenerator::with_prefix("pin").unwrap(),
    )
    .with_clock(shared.clone());

    let state = AppState::new(Arc::new(registry), analytics, shared)
        .with_base_url(base_url.map(str::to_string));

    Harness {
        app: App::router(state),
        clock,
    }
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

impl Harness {
    async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        Reply {
            status,
            location,
            body,
        }
    }

    async fn create(&self, body: Value) -> Reply {
        let request = Request::post("/shorturls")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::HOST, "short.test")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn request(&self, method: Method, uri: &str) -> Reply {
        self.send(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn get(&self, uri: &str) -> Reply {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn visit(&self, code: &str, referer: &str, peer: &str) -> Reply {
        let mut request = Request::get(format!("/{code}"))
            .header(header::REFERER, referer)
            .body(Body::empty())
            .unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        self.send(request).await
    }
}

#[tokio::test]
async fn root_reports_liveness() {
    let h = harness(None);
    let reply = h.get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"message": "URL Shortener Backend Running"}));
}

#[tokio::test]
async fn create_with_defaults() {
    let h = harness(None);
    let reply = h.create(json!({"url": "https://example.com/a"})).await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["shortLink"], "http://short.test/pin000000");
    assert_eq!(reply.body["expiry"], "2026-01-01T00:30:00Z");
}

#[tokio::test]
async fn create_with_custom_code_and_validity() {
    let h = harness(Some("https://pin.hole/"));
    let reply = h
        .create(json!({"url": "https://example.com", "validity": 5, "shortcode": "docs42"}))
        .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["shortLink"], "https://pin.hole/docs42");
    assert_eq!(reply.body["expiry"], "2026-01-01T00:05:00Z");
}

#[tokio::test]
async fn create_rejects_bad_input() {
    let h = harness(None);

    let reply = h.create(json!({"url": "not a url"})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Invalid or missing URL.");

    let reply = h.create(json!({})).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let reply = h
        .create(json!({"url": "https://example.com", "shortcode": "ab"}))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["error"],
        "Shortcode must be alphanumeric and 3-16 chars."
    );
}

#[tokio::test]
async fn create_rejects_non_json_body() {
    let h = harness(None);
    let request = Request::post("/shorturls")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("url=https://example.com"))
        .unwrap();

    let reply = h.send(request).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["error"], "Request body must be a JSON object.");
}

#[tokio::test]
async fn duplicate_shortcode_conflicts() {
    let h = harness(None);
    let body = json!({"url": "https://example.com", "shortcode": "taken1"});

    assert_eq!(h.create(body.clone()).await.status, StatusCode::CREATED);
    let reply = h.create(body).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["error"], "Shortcode already in use.");
}

#[tokio::test]
async fn fresh_link_has_empty_stats() {
    let h = harness(None);
    h.create(json!({"url": "https://example.com", "shortcode": "fresh1"}))
        .await;

    let reply = h.get("/shorturls/fresh1").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body,
        json!({
            "originalUrl": "https://example.com",
            "createdAt": "2026-01-01T00:00:00Z",
            "expiry": "2026-01-01T00:30:00Z",
            "totalClicks": 0,
            "clicks": []
        })
    );
}

#[tokio::test]
async fn redirect_records_clicks_in_order() {
    let h = harness(None);
    h.create(json!({"url": "https://example.com/target", "shortcode": "hop123"}))
        .await;

    for (i, referer) in ["https://a.test", "https://b.test", "https://c.test"]
        .into_iter()
        .enumerate()
    {
        h.clock.advance(SignedDuration::from_secs(60));
        let reply = h.visit("hop123", referer, &format!("10.0.0.{i}:4000")).await;
        assert_eq!(reply.status, StatusCode::FOUND);
        assert_eq!(reply.location.as_deref(), Some("https://example.com/target"));
    }

    let reply = h.get("/shorturls/hop123").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["totalClicks"], 3);
    assert_eq!(
        reply.body["clicks"],
        json!([
            {"timestamp": "2026-01-01T00:01:00Z", "referrer": "https://a.test", "location": "10.0.0.0"},
            {"timestamp": "2026-01-01T00:02:00Z", "referrer": "https://b.test", "location": "10.0.0.1"},
            {"timestamp": "2026-01-01T00:03:00Z", "referrer": "https://c.test", "location": "10.0.0.2"},
        ])
    );
}

#[tokio::test]
async fn redirect_without_peer_or_referer() {
    let h = harness(None);
    h.create(json!({"url": "https://example.com", "shortcode": "anon12"}))
        .await;

    let reply = h.get("/anon12").await;
    assert_eq!(reply.status, StatusCode::FOUND);

    let stats = h.get("/shorturls/anon12").await;
    assert_eq!(stats.body["clicks"][0]["referrer"], "");
    assert_eq!(stats.body["clicks"][0]["location"], "unknown");
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let h = harness(None);

    let reply = h.get("/nosuch").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Shortcode not found.");

    let reply = h.get("/shorturls/nosuch").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expired_link_is_gone() {
    let h = harness(None);
    h.create(json!({"url": "https://example.com", "validity": 1, "shortcode": "brief1"}))
        .await;

    h.clock.advance(SignedDuration::from_secs(60));
    assert_eq!(h.get("/brief1").await.status, StatusCode::FOUND);

    h.clock.advance(SignedDuration::from_secs(1));
    let reply = h.get("/brief1").await;
    assert_eq!(reply.status, StatusCode::GONE);
    assert_eq!(reply.body["error"], "Short link has expired.");
    assert_eq!(h.get("/shorturls/brief1").await.status, StatusCode::GONE);

    let reply = h
        .create(json!({"url": "https://example.com", "shortcode": "brief1"}))
        .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unmatched_route_is_not_found() {
    let h = harness(None);
    let reply = h.get("/shorturls/a/b").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Not found.");
}

#[tokio::test]
async fn numeric_shortcode_is_accepted() {
    let h = harness(None);
    let reply = h
        .create(json!({"url": "https://example.com", "shortcode": 12345}))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["shortLink"], "http://short.test/12345");

    let reply = h
        .create(json!({"url": "https://example.com", "shortcode": 12}))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["error"],
        "Shortcode must be alphanumeric and 3-16 chars."
    );

    let reply = h
        .create(json!({"url": "https://example.com", "shortcode": ["abc"]}))
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["error"],
        "Shortcode must be alphanumeric and 3-16 chars."
    );
}

#[tokio::test]
async fn shorturls_is_a_usable_code() {
    let h = harness(None);
    let reply = h
        .create(json!({"url": "https://example.com/listing", "shortcode": "shorturls"}))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let reply = h.visit("shorturls", "https://a.test", "10.0.0.9:4000").await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("https://example.com/listing"));

    let stats = h.get("/shorturls/shorturls").await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["totalClicks"], 1);
    assert_eq!(stats.body["clicks"][0]["location"], "10.0.0.9");
}

#[tokio::test]
async fn shorturls_unregistered_is_not_found() {
    let h = harness(None);
    let reply = h.get("/shorturls").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Shortcode not found.");
}

#[tokio::test]
async fn wrong_method_has_error_body() {
    let h = harness(None);

    let reply = h.request(Method::DELETE, "/abc123").await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.body, json!({"error": "Method not allowed."}));

    let reply = h.request(Method::PUT, "/shorturls").await;
    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(reply.body["error"], "Method not allowed.");
}
