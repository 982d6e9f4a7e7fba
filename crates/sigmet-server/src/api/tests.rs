use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::api::request_id::REQUEST_ID_HEADER;
use crate::test_support::{collection, feature, test_clock, MockUpstream};
use crate::{api, config::Config, state::AppState};

fn setup_app(upstream: &MockUpstream) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        upstream_url: upstream.base_url.clone(),
        ..Config::default()
    };
    let state = Arc::new(AppState::with_clock(config, test_clock()));
    (api::app(state.clone()), state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn isigmet_returns_identified_collection() {
    let upstream = MockUpstream::serving(collection(vec![feature("SIGMET-1")])).await;
    let (app, _state) = setup_app(&upstream);

    let res = app.oneshot(get("/api/isigmet")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = read_json(res).await;
    let data = &body["data"];
    assert_eq!(data["type"], "FeatureCollection");
    assert_eq!(data["features"].as_array().unwrap().len(), 1);

    let feature = &data["features"][0];
    assert_eq!(feature["type"], "Feature");
    assert_eq!(feature["properties"]["rawSigmet"], "SIGMET-1");
    // sha1("KKCI" + "" + "2026-10-18T12:00:00Z" + "TS" + "SIGMET-1")
    let expected_id = sigmet_core::IdentityFields {
        icao_id: Some("KKCI"),
        series_id: None,
        valid_time_from: Some("2026-10-18T12:00:00Z"),
        hazard: Some("TS"),
        raw_sigmet: Some("SIGMET-1"),
    }
    .feature_id();
    assert_eq!(feature["id"], expected_id.as_str());

    assert_eq!(upstream.calls(), 1);
    assert_eq!(upstream.requests()[0].0, "isigmet");
}

#[tokio::test]
async fn airsigmet_uses_its_own_endpoint() {
    let upstream = MockUpstream::serving(json!({
        "features": [{
            "type": "Feature",
            "properties": {"rawSigmet": "AIRSIGMET-1", "altitudeLo1": 0, "altitudeHi1": 12000},
            "geometry": {"type": "Point", "coordinates": [-97.0, 35.0]}
        }]
    }))
    .await;
    let (app, _state) = setup_app(&upstream);

    let res = app.oneshot(get("/api/airsigmet")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = read_json(res).await;
    assert_eq!(body["data"]["features"][0]["properties"]["altitudeHi1"], 12000);
    assert_eq!(upstream.requests()[0].0, "airsigmet");
}

#[tokio::test]
async fn upstream_failure_is_500_with_message() {
    let upstream = MockUpstream::start(|_| (StatusCode::INTERNAL_SERVER_ERROR, json!({}))).await;
    let (app, _state) = setup_app(&upstream);

    let res = app.oneshot(get("/api/isigmet")).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(res).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("isigmet"), "{}", message);
}

#[tokio::test]
async fn level_range_fans_out_and_is_cached() {
    let upstream = MockUpstream::serving(collection(vec![
        feature("SIGMET-1"),
        feature("SIGMET-2"),
    ]))
    .await;
    let (app, state) = setup_app(&upstream);

    let uri = "/api/isigmet?levelFrom=12000&levelTo=24000";
    let res = app.clone().oneshot(get(uri)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["data"]["features"].as_array().unwrap().len(), 2);
    assert_eq!(upstream.calls(), 2);
    assert_eq!(state.cache().len(), 2);

    let res = app.oneshot(get(uri)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn invalid_level_range_is_500() {
    let upstream = MockUpstream::serving(collection(vec![])).await;
    let (app, _state) = setup_app(&upstream);

    let res = app
        .oneshot(get("/api/airsigmet?levelFrom=24000&levelTo=12000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(res).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid level range"));
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn oversized_level_range_is_500_without_upstream_calls() {
    let upstream = MockUpstream::serving(collection(vec![])).await;
    let (app, _state) = setup_app(&upstream);

    for uri in [
        "/api/isigmet?levelFrom=0&levelTo=1e300",
        "/api/isigmet?levelFrom=0&levelTo=600000000",
    ] {
        let res = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        let body = read_json(res).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid level range"));
    }
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn undecodable_query_string_is_500_with_message() {
    let upstream = MockUpstream::serving(collection(vec![])).await;
    let (app, _state) = setup_app(&upstream);

    let res = app
        .oneshot(get("/api/isigmet?levelFrom=1&levelFrom=2&levelTo=9000"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(res).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid query parameter"));
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn schema_violation_is_500() {
    let upstream = MockUpstream::serving(json!({"features": "none"})).await;
    let (app, _state) = setup_app(&upstream);

    let res = app.oneshot(get("/api/isigmet")).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(res).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid isigmet data"));
}

#[tokio::test]
async fn health_check_and_request_id() {
    let upstream = MockUpstream::serving(collection(vec![])).await;
    let (app, _state) = setup_app(&upstream);

    let res = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let generated = res
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .expect("generated request id");
    assert_eq!(generated.len(), 36);

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "poll-42")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers().get(&REQUEST_ID_HEADER).unwrap(), "poll-42");

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "  poll-43\t")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.headers().get(&REQUEST_ID_HEADER).unwrap(), "poll-43");
}
