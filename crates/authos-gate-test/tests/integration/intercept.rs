#![allow(clippy::expect_used)]
//! Request interception against a mock Authos.

use std::time::Duration;

use salvo::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use authos_gate_test::core::constants::CHECK_ACCESS_PATH;

use super::helpers::{TestGate, TestRequest, unreachable_gate};

#[test_log::test(tokio::test)]
async fn health_is_served_without_token() {
    let gate = TestGate::start().await;

    let response = TestRequest::get("/health")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(response.text(), "OK");
    assert_eq!(gate.authos_calls(CHECK_ACCESS_PATH).await, 0);
}

#[test_log::test(tokio::test)]
async fn protected_path_without_header_is_401() {
    let gate = TestGate::start().await;

    let response = TestRequest::get("/api/orders")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(
        response.json(),
        json!({"message": "Missing or invalid Authorization header"})
    );
    assert_eq!(gate.authos_calls(CHECK_ACCESS_PATH).await, 0);
}

#[test_log::test(tokio::test)]
async fn granted_request_reaches_the_handler() {
    let gate = TestGate::start().await;

    Mock::given(method("POST"))
        .and(path(CHECK_ACCESS_PATH))
        .and(body_json(json!({
            "appCode": "example_app",
            "appSecret": "example_secret",
            "token": "good-token",
            "obj": "/api/app/whoami",
            "act": "GET"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"allowed": true, "userId": 42})),
        )
        .expect(1)
        .mount(&gate.authos)
        .await;

    let response = TestRequest::get("/api/app/whoami")
        .bearer("good-token")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(response.json(), json!({"userId": "42"}));
}

#[test_log::test(tokio::test)]
async fn denied_request_is_403_with_service_message() {
    let gate = TestGate::start().await;
    gate.check_access_responds(
        ResponseTemplate::new(200)
            .set_body_json(json!({"allowed": false, "message": "no permission"})),
    )
    .await;

    let response = TestRequest::get("/api/orders")
        .bearer("weak-token")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(
        response.json(),
        json!({"message": "Forbidden", "details": "no permission"})
    );
}

#[test_log::test(tokio::test)]
async fn non_200_check_is_denied_even_if_body_allows() {
    let gate = TestGate::start().await;
    gate.check_access_responds(
        ResponseTemplate::new(401)
            .set_body_json(json!({"allowed": true, "message": "Invalid token"})),
    )
    .await;

    let response = TestRequest::get("/api/app/whoami")
        .bearer("expired-token")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(response.json()["details"], "Invalid token");
}

#[test_log::test(tokio::test)]
async fn unreachable_authos_fails_closed() {
    let service = unreachable_gate();

    let response = TestRequest::get("/api/app/whoami")
        .bearer("any-token")
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(
        response.json(),
        json!({"message": "Forbidden", "details": "Authos service unavailable"})
    );
}

#[test_log::test(tokio::test)]
async fn slow_authos_fails_closed() {
    let gate = TestGate::start().await;
    gate.check_access_responds(
        ResponseTemplate::new(200)
            .set_body_json(json!({"allowed": true, "userId": "u1"}))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let response = TestRequest::get("/api/app/whoami")
        .bearer("slow-token")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(response.json()["details"], "Authos service unavailable");
}

#[test_log::test(tokio::test)]
async fn method_and_path_are_sent_as_act_and_obj() {
    let gate = TestGate::start().await;

    Mock::given(method("POST"))
        .and(path(CHECK_ACCESS_PATH))
        .and(body_json(json!({
            "appCode": "example_app",
            "appSecret": "example_secret",
            "token": "t",
            "obj": "/api/orders/17",
            "act": "DELETE"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"allowed": true})))
        .expect(1)
        .mount(&gate.authos)
        .await;

    TestRequest::new(salvo::http::Method::DELETE, "/api/orders/17?force=true")
        .bearer("t")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn encoded_path_is_checked_as_routed() {
    let gate = TestGate::start().await;

    Mock::given(method("POST"))
        .and(path(CHECK_ACCESS_PATH))
        .and(body_json(json!({
            "appCode": "example_app",
            "appSecret": "example_secret",
            "token": "t",
            "obj": "/api/app/whoami",
            "act": "GET"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"allowed": true, "userId": "u1"})),
        )
        .expect(1)
        .mount(&gate.authos)
        .await;

    let response = TestRequest::get("/api/app/%77hoami")
        .bearer("t")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(response.json(), json!({"userId": "u1"}));
}
