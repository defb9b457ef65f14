//! End-to-end tests for the odds route against mock upstreams.

use std::time::Duration;

use race_gateway::config::ExhaustedPolicy;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;
use common::{MockReply, APP_TOKEN};

async fn post_prices(
    gateway: std::net::SocketAddr,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    let mut request = common::client()
        .post(format!("http://{}/odds/prices", gateway))
        .json(&body);
    if let Some(token) = token {
        request = request.header("x-app-token", token);
    }
    let res = request.send().await.expect("Gateway unreachable");
    let status = res.status();
    let body = res.json().await.unwrap_or(Value::Null);
    (status, body)
}

fn odds_config(upstream: std::net::SocketAddr, policy: ExhaustedPolicy) -> race_gateway::GatewayConfig {
    let mut config = common::test_config();
    config.odds.base_url = Some(format!("http://{}/v1/prices", upstream));
    config.odds.api_key = Some("odds-key".into());
    config.odds.exhausted_policy = policy;
    config
}

#[tokio::test]
async fn test_lowercase_variant_success() {
    let (upstream, recorded) = common::start_programmable_backend(|req| async move {
        if req.query_param("meetingDate").as_deref() == Some("05-dec-2025") {
            MockReply::new(
                200,
                r#"[{"raceNo":2,"tabNo":4,"venue":"Cranbourne","aiPrice":3.5,"tabPrice":4.0}]"#,
            )
        } else {
            MockReply::new(404, "no meeting")
        }
    })
    .await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::Degrade)).await;

    let (status, body) = post_prices(gateway, Some(APP_TOKEN), json!({"date": "2025-12-05"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "track": "Cranbourne",
            "raceNumber": 2,
            "tabNumber": 4,
            "horseName": null,
            "aiPrice": 3.5,
            "tabPrice": 4.0,
            "rank": null
        }])
    );

    let calls = recorded.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[0].path(), "/v1/prices");
    assert_eq!(calls[0].query_param("apikey").as_deref(), Some("odds-key"));
    assert!(calls[0].header("x-app-token").is_none(), "client secret must not leak upstream");

    shutdown.trigger();
}

#[tokio::test]
async fn test_http_error_falls_back_to_title_case() {
    let (upstream, recorded) = common::start_programmable_backend(|req| async move {
        match req.query_param("meetingDate").as_deref() {
            Some("05-Dec-2025") => MockReply::new(200, r#"{"prices":[{"raceNumber":1,"tabNumber":7,"price":2.2}]}"#),
            _ => MockReply::new(400, r#"{"error":"bad date"}"#),
        }
    })
    .await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::FailClosed)).await;

    let (status, body) = post_prices(gateway, Some(APP_TOKEN), json!({"date": "2025-12-05"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["tabNumber"], 7);
    assert_eq!(body[0]["aiPrice"], 2.2);

    let variants: Vec<_> = recorded
        .lock()
        .unwrap()
        .iter()
        .filter_map(|r| r.query_param("meetingDate"))
        .collect();
    assert_eq!(variants, ["05-dec-2025", "05-Dec-2025"]);

    shutdown.trigger();
}

#[tokio::test]
async fn test_timeout_then_success() {
    let (upstream, recorded) = common::start_programmable_backend(|req| async move {
        let reply = MockReply::new(200, r#"[{"raceNo":5,"tabNo":1,"venue":"Sale"}]"#);
        if req.query_param("meetingDate").as_deref() == Some("05-dec-2025") {
            reply.delayed(Duration::from_secs(3))
        } else {
            reply
        }
    })
    .await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::FailClosed)).await;

    let (status, body) = post_prices(gateway, Some(APP_TOKEN), json!({"date": "2025-12-05"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["raceNumber"], 5);
    assert_eq!(recorded.lock().unwrap().len(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_json_then_json() {
    let (upstream, recorded) = common::start_programmable_backend(|req| async move {
        match req.query_param("meetingDate").as_deref() {
            Some("05-dec-2025") => MockReply::new(200, "<html>maintenance</html>"),
            _ => MockReply::new(200, r#"{"rows":[]}"#),
        }
    })
    .await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::FailClosed)).await;

    let (status, body) = post_prices(gateway, Some(APP_TOKEN), json!({"date": "2025-12-05"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(recorded.lock().unwrap().len(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_both_variants_fail_degrades_to_empty() {
    let (upstream, recorded) =
        common::start_programmable_backend(|_| async { MockReply::new(503, "busy") }).await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::Degrade)).await;

    let (status, body) = post_prices(gateway, Some(APP_TOKEN), json!({"date": "2025-12-05"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(recorded.lock().unwrap().len(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_both_variants_fail_closed_is_502() {
    let (upstream, recorded) =
        common::start_programmable_backend(|_| async { MockReply::new(500, "boom") }).await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::FailClosed)).await;

    let (status, body) = post_prices(gateway, Some(APP_TOKEN), json!({"date": "2025-12-05"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["detail"],
        "Odds upstream unavailable after 2 attempts: upstream returned HTTP 500"
    );
    assert_eq!(recorded.lock().unwrap().len(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_degrades() {
    let dead = common::closed_port().await;
    let (gateway, shutdown) = common::start_gateway(odds_config(dead, ExhaustedPolicy::Degrade)).await;

    let (status, body) = post_prices(gateway, Some(APP_TOKEN), json!({"date": "2025-12-05"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_date_makes_no_upstream_call() {
    let (upstream, recorded) =
        common::start_programmable_backend(|_| async { MockReply::new(200, "[]") }).await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::Degrade)).await;

    for body in [json!({"date": "2025-02-30"}), json!({"date": "05/12/2025"}), json!({"day": "2025-12-05"})] {
        let (status, reply) = post_prices(gateway, Some(APP_TOKEN), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(reply["detail"].is_string());
    }
    assert!(recorded.lock().unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_token_makes_no_upstream_call() {
    let (upstream, recorded) =
        common::start_programmable_backend(|_| async { MockReply::new(200, "[]") }).await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::Degrade)).await;

    let (status, body) = post_prices(gateway, None, json!({"date": "2025-12-05"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid app token");

    let (status, _) = post_prices(gateway, Some("wrong"), json!({"date": "2025-12-05"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(recorded.lock().unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_row_filters() {
    let (upstream, _) = common::start_programmable_backend(|_| async {
        MockReply::new(
            200,
            r#"{"rows":[
                {"raceNo":1,"tabNo":1,"venue":"Sale"},
                {"raceNo":2,"tabNo":3,"venue":"Sale"},
                {"raceNo":2,"tabNo":4,"venue":"Bendigo"}
            ]}"#,
        )
    })
    .await;
    let (gateway, shutdown) = common::start_gateway(odds_config(upstream, ExhaustedPolicy::Degrade)).await;

    let (status, body) = post_prices(
        gateway,
        Some(APP_TOKEN),
        json!({"date": "2025-12-05", "track": "sale", "raceNumber": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["tabNumber"], 3);

    shutdown.trigger();
}
