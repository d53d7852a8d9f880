//! Decision cache behaviour seen through the HTTP surface.

use salvo::http::StatusCode;
use serde_json::json;
use wiremock::ResponseTemplate;

use authos_gate_test::core::constants::CHECK_ACCESS_PATH;

use super::helpers::{TestGate, TestRequest};

const CACHED: &str = "[intercept]\ncache_ttl_secs = 60\n";

#[test_log::test(tokio::test)]
async fn repeated_request_is_answered_from_cache() {
    let gate = TestGate::start_with(CACHED).await;
    gate.check_access_responds(
        ResponseTemplate::new(200).set_body_json(json!({"allowed": true, "userId": "u1"})),
    )
    .await;

    for _ in 0..3 {
        let response = TestRequest::get("/api/app/whoami")
            .bearer("cached-token")
            .send(&gate.service)
            .await
            .assert_status(StatusCode::OK);
        assert_eq!(response.json(), json!({"userId": "u1"}));
    }

    assert_eq!(gate.authos_calls(CHECK_ACCESS_PATH).await, 1);
}

#[test_log::test(tokio::test)]
async fn cached_denial_stays_denied() {
    let gate = TestGate::start_with(CACHED).await;
    gate.check_access_responds(
        ResponseTemplate::new(200).set_body_json(json!({"allowed": false, "message": "nope"})),
    )
    .await;

    for _ in 0..2 {
        TestRequest::get("/api/app/whoami")
            .bearer("denied-token")
            .send(&gate.service)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    assert_eq!(gate.authos_calls(CHECK_ACCESS_PATH).await, 1);
}

#[test_log::test(tokio::test)]
async fn different_method_is_checked_separately() {
    let gate = TestGate::start_with(CACHED).await;
    gate.check_access_responds(
        ResponseTemplate::new(200).set_body_json(json!({"allowed": true})),
    )
    .await;

    TestRequest::get("/api/orders")
        .bearer("t")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    TestRequest::post("/api/orders")
        .bearer("t")
        .send(&gate.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    assert_eq!(gate.authos_calls(CHECK_ACCESS_PATH).await, 2);
}

#[test_log::test(tokio::test)]
async fn rejected_check_is_retried() {
    let gate = TestGate::start_with(CACHED).await;
    gate.check_access_responds(
        ResponseTemplate::new(503).set_body_json(json!({"message": "maintenance"})),
    )
    .await;

    for _ in 0..2 {
        TestRequest::get("/api/app/whoami")
            .bearer("t")
            .send(&gate.service)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    assert_eq!(gate.authos_calls(CHECK_ACCESS_PATH).await, 2);
}

#[test_log::test(tokio::test)]
async fn cache_is_off_by_default() {
    let gate = TestGate::start().await;
    gate.check_access_responds(
        ResponseTemplate::new(200).set_body_json(json!({"allowed": true})),
    )
    .await;

    for _ in 0..2 {
        TestRequest::get("/api/app/whoami")
            .bearer("t")
            .send(&gate.service)
            .await
            .assert_status(StatusCode::OK);
    }

    assert_eq!(gate.authos_calls(CHECK_ACCESS_PATH).await, 2);
}
