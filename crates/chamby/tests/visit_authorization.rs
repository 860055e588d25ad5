use std::sync::{Arc, Mutex};

use axum::extract::Json as ExtractJson;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use chamby::payments::{FunctionsClient, PaymentsError};

/// Stand-in for the remote payment functions: serves a canned status/body on
/// the authorization route and records the request payload it saw.
async fn spawn_functions_stub(
    status: StatusCode,
    body: Value,
) -> (String, Arc<Mutex<Option<Value>>>) {
    let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let seen_handler = seen.clone();

    let app = Router::new().route(
        "/functions/v1/create-visit-authorization",
        post(move |ExtractJson(payload): ExtractJson<Value>| {
            let body = body.clone();
            let seen = seen_handler.clone();
            async move {
                *seen.lock().unwrap() = Some(payload);
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

#[tokio::test]
async fn returns_authorization_handle_on_success() {
    let (base_url, seen) = spawn_functions_stub(
        StatusCode::OK,
        json!({
            "client_secret": "pi_123_secret_456",
            "payment_intent_id": "pi_123",
            "amount": 40600,
            "currency": "mxn",
            "already_exists": false
        }),
    )
    .await;

    let client = FunctionsClient::new(&base_url, "test-key");
    let job_id = Uuid::new_v4();

    let auth = client.create_visit_authorization(job_id).await.unwrap();
    assert_eq!(auth.client_secret, "pi_123_secret_456");
    assert_eq!(auth.payment_intent_id, "pi_123");
    assert_eq!(auth.amount, Some(40600));
    assert_eq!(auth.already_exists, Some(false));

    // The remote function keys idempotency on jobId; make sure we sent it.
    let payload = seen.lock().unwrap().clone().unwrap();
    assert_eq!(payload["jobId"], json!(job_id.to_string()));
}

#[tokio::test]
async fn missing_client_secret_is_an_error_not_a_partial_result() {
    let (base_url, _) = spawn_functions_stub(
        StatusCode::OK,
        json!({ "payment_intent_id": "pi_123" }),
    )
    .await;

    let client = FunctionsClient::new(&base_url, "test-key");
    let err = client
        .create_visit_authorization(Uuid::new_v4())
        .await
        .unwrap_err();

    match err {
        PaymentsError::Incomplete(field) => assert_eq!(field, "client_secret"),
        other => panic!("expected Incomplete, got {other:?}"),
    }
}

#[tokio::test]
async fn remote_error_field_surfaces_its_message() {
    let (base_url, _) = spawn_functions_stub(
        StatusCode::OK,
        json!({ "error": "job already captured" }),
    )
    .await;

    let client = FunctionsClient::new(&base_url, "test-key");
    let err = client
        .create_visit_authorization(Uuid::new_v4())
        .await
        .unwrap_err();

    match err {
        PaymentsError::Remote(msg) => assert_eq!(msg, "job already captured"),
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_a_remote_error() {
    let (base_url, _) = spawn_functions_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "stripe unavailable" }),
    )
    .await;

    let client = FunctionsClient::new(&base_url, "test-key");
    let err = client
        .create_visit_authorization(Uuid::new_v4())
        .await
        .unwrap_err();

    match err {
        PaymentsError::Remote(msg) => assert_eq!(msg, "stripe unavailable"),
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_reads_as_remote_fault_not_transport() {
    let app = Router::new().route(
        "/functions/v1/create-visit-authorization",
        post(|| async { (StatusCode::OK, "upstream proxy error page") }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = FunctionsClient::new(&format!("http://{addr}"), "test-key");
    let err = client
        .create_visit_authorization(Uuid::new_v4())
        .await
        .unwrap_err();

    match err {
        PaymentsError::Remote(msg) => assert!(msg.contains("malformed response"), "{msg}"),
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_payout_aggregates_are_consumed_as_is() {
    let app = Router::new().route(
        "/functions/v1/list-provider-payouts",
        post(|| async {
            Json(json!({
                "pending_cents": 25000,
                "paid_cents": 125000,
                "visits": 6
            }))
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = FunctionsClient::new(&format!("http://{addr}"), "test-key");
    let summary = client
        .list_provider_payouts(Uuid::new_v4())
        .await
        .unwrap();

    assert_eq!(summary.pending_cents, 25_000);
    assert_eq!(summary.paid_cents, 125_000);
    assert_eq!(summary.visits, 6);
}
