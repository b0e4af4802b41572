//! Integration tests for the Bridemark HTTP API.
//!
//! These drive the full router in-process with `tower::ServiceExt::oneshot`.
//! Mail goes to a `MemoryTransport`, so no relay is needed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use bridemark_core::compose::MailSettings;
use bridemark_core::contact::ContactService;
use bridemark_core::ratelimit::{RateLimitConfig, RateLimiter};
use bridemark_mail::MemoryTransport;
use bridemark_server::routes::build_router;
use bridemark_server::state::AppState;

const PEER: ([u8; 4], u16) = ([192, 0, 2, 10], 50000);

struct Harness {
    app: Router,
    outbox: MemoryTransport,
}

fn harness(max_requests: u32, trust_proxy: bool) -> Harness {
    let outbox = MemoryTransport::new();
    let contact = ContactService::new(
        Arc::new(outbox.clone()),
        MailSettings {
            sender: "studio@example.com".to_owned(),
            recipient: "regina@example.com".to_owned(),
            send_confirmation: true,
        },
    );
    let state = Arc::new(AppState {
        contact,
        limiter: Arc::new(RateLimiter::new(RateLimitConfig {
            window: Duration::from_secs(900),
            max_requests,
        })),
        environment: "test".to_owned(),
        trust_proxy,
    });

    let app = build_router(state).layer(MockConnectInfo(SocketAddr::from(PEER)));
    Harness { app, outbox }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_form() -> Value {
    json!({
        "name": "Anna Berg",
        "email": "anna@example.com",
        "phone": "+1 555 0100",
        "service": "Bridal makeup",
        "weddingDate": "2027-06-12",
        "message": "We are getting married in June\nand would love a trial."
    })
}

// ── Informational routes ─────────────────────────────────────────────

#[tokio::test]
async fn root_describes_service() {
    let h = harness(100, false);
    let (status, _, body) = send(&h.app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], "test");
    assert!(body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "POST /api/contact"));
}

#[tokio::test]
async fn health_reports_ok() {
    let h = harness(100, false);
    let (status, headers, body) = send(&h.app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Contact form API is running");
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
}

#[tokio::test]
async fn test_endpoint_echoes() {
    let h = harness(100, false);
    let (status, _, body) = send(&h.app, get("/api/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn unknown_route_is_404_with_endpoints() {
    let h = harness(100, false);
    let (status, _, body) = send(&h.app, get("/wp-admin")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
    assert_eq!(body["availableEndpoints"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn wrong_method_on_known_path_is_404_with_endpoints() {
    let h = harness(100, false);

    let (status, _, body) = send(&h.app, get("/api/contact")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
    assert_eq!(body["availableEndpoints"].as_array().unwrap().len(), 4);

    let req = Request::builder()
        .method("POST")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
    assert!(h.outbox.sent().await.is_empty());
}

// ── Contact submission ───────────────────────────────────────────────

#[tokio::test]
async fn valid_submission_is_delivered() {
    let h = harness(100, false);
    let (status, _, body) = send(&h.app, post_json(&valid_form())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Email sent successfully!" }));

    let sent = h.outbox.sent().await;
    assert_eq!(sent.len(), 2);

    let inquiry = &sent[0];
    assert_eq!(inquiry.to, "regina@example.com");
    assert_eq!(inquiry.reply_to.as_deref(), Some("anna@example.com"));
    assert_eq!(inquiry.subject, "New Contact Form Submission from Anna Berg");
    assert!(inquiry.html.contains("<strong>Wedding Date:</strong> 2027-06-12"));
    assert!(inquiry.html.contains("June<br>and would love a trial."));

    assert_eq!(sent[1].to, "anna@example.com");
}

#[tokio::test]
async fn urlencoded_submission_is_accepted() {
    let h = harness(100, false);
    let req = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "name=Anna&email=anna%40example.com&message=Please+call+me+back+soon",
        ))
        .unwrap();

    let (status, _, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(h.outbox.sent().await.len(), 2);
}

#[tokio::test]
async fn name_and_phone_only_is_rejected_with_errors() {
    let h = harness(100, false);
    let (status, _, body) = send(&h.app, post_json(&json!({ "name": "Jo", "phone": "5551234" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "errors": [
                "Valid email is required",
                "Message must be at least 10 characters long"
            ]
        })
    );
    assert!(h.outbox.sent().await.is_empty());
}

#[tokio::test]
async fn short_name_is_rejected() {
    let h = harness(100, false);
    let mut form = valid_form();
    form["name"] = json!("A");
    let (status, _, body) = send(&h.app, post_json(&form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Name must be at least 2 characters long"]));
}

#[tokio::test]
async fn header_punctuation_in_email_is_rejected_before_delivery() {
    let h = harness(100, false);
    for email in ["anna,smith@example.com", "anna<x>@example.com", "ann(a)@example.com"] {
        let mut form = valid_form();
        form["email"] = json!(email);
        let (status, _, body) = send(&h.app, post_json(&form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
        assert_eq!(body["errors"], json!(["Valid email is required"]));
    }
    assert!(h.outbox.sent().await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let h = harness(100, false);
    let req = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"], json!(["Request body must be valid JSON"]));
}

#[tokio::test]
async fn unsupported_content_type_names_accepted_encodings() {
    let h = harness(100, false);
    for content_type in ["text/plain", "multipart/form-data; boundary=x"] {
        let req = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from("name=Anna"))
            .unwrap();
        let (status, _, body) = send(&h.app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{content_type}");
        let message = body["errors"][0].as_str().unwrap();
        assert!(message.starts_with("Unsupported content type"), "{message}");
    }

    let req = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"][0].as_str().unwrap().starts_with("Unsupported content type"));
}

#[tokio::test]
async fn delivery_failure_is_generic_500() {
    let h = harness(100, false);
    h.outbox.set_failing(true);

    let (status, _, body) = send(&h.app, post_json(&valid_form())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to send email. Please try again later.");
    assert!(!body.to_string().contains("failing mode"));
}

#[tokio::test]
async fn html_in_fields_is_escaped_in_email() {
    let h = harness(100, false);
    let mut form = valid_form();
    form["name"] = json!("<img src=x onerror=alert(1)>");
    let (status, _, _) = send(&h.app, post_json(&form)).await;
    assert_eq!(status, StatusCode::OK);

    let inquiry = &h.outbox.sent().await[0];
    assert!(!inquiry.html.contains("<img"));
    assert!(inquiry.html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

// ── Rate limiting ────────────────────────────────────────────────────

#[tokio::test]
async fn request_over_limit_is_throttled_before_validation() {
    let h = harness(2, false);

    for _ in 0..2 {
        let (status, _, _) = send(&h.app, post_json(&json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, headers, body) = send(&h.app, post_json(&valid_form())).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "Too many requests from this IP, please try again later."
    );
    let retry_after: u64 = headers[header::RETRY_AFTER].to_str().unwrap().parse().unwrap();
    assert!(retry_after > 0 && retry_after <= 900);
    assert!(h.outbox.sent().await.is_empty());
}

#[tokio::test]
async fn throttle_applies_only_to_contact_route() {
    let h = harness(1, false);
    send(&h.app, post_json(&valid_form())).await;
    let (status, _, _) = send(&h.app, post_json(&valid_form())).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _, _) = send(&h.app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn forwarded_addresses_are_counted_separately_when_trusted() {
    let h = harness(1, true);

    let from = |ip: &str| {
        let mut req = post_json(&valid_form());
        req.headers_mut()
            .insert("x-forwarded-for", ip.parse().unwrap());
        req
    };

    assert_eq!(send(&h.app, from("203.0.113.1")).await.0, StatusCode::OK);
    assert_eq!(send(&h.app, from("203.0.113.2")).await.0, StatusCode::OK);
    assert_eq!(
        send(&h.app, from("203.0.113.1")).await.0,
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let h = harness(100, false);
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/contact")
        .header(header::ORIGIN, "https://studio.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(req).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
