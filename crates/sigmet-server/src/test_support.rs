//! Local stand-in for the advisory provider.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::clock::ManualClock;

type Params = HashMap<String, String>;
type Responder = Box<dyn Fn(&Params) -> (StatusCode, Value) + Send + Sync>;

struct MockState {
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, Params)>>,
    responder: Responder,
}

pub(crate) struct MockUpstream {
    pub base_url: String,
    state: Arc<MockState>,
}

async fn serve_data(
    State(state): State<Arc<MockState>>,
    Path(kind): Path<String>,
    Query(params): Query<Params>,
) -> (StatusCode, Json<Value>) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let (status, body) = (state.responder)(&params);
    state.requests.lock().unwrap().push((kind, params));
    (status, Json(body))
}

impl MockUpstream {
    pub async fn start(
        responder: impl Fn(&Params) -> (StatusCode, Value) + Send + Sync + 'static,
    ) -> Self {
        let state = Arc::new(MockState {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        });
        let app = Router::new()
            .route("/api/data/:kind", get(serve_data))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Answer every request with `200` and the same body.
    pub async fn serving(body: Value) -> Self {
        Self::start(move |_| (StatusCode::OK, body.clone())).await
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Path tag and query parameters of every request, in arrival order.
    pub fn requests(&self) -> Vec<(String, Params)> {
        self.state.requests.lock().unwrap().clone()
    }
}

pub(crate) fn feature(raw_sigmet: &str) -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "icaoId": "KKCI",
            "hazard": "TS",
            "validTimeFrom": "2026-10-18T12:00:00Z",
            "rawSigmet": raw_sigmet
        },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[-95.0, 29.0], [-94.0, 30.0], [-93.0, 29.0], [-95.0, 29.0]]]
        }
    })
}

pub(crate) fn collection(features: Vec<Value>) -> Value {
    json!({"type": "FeatureCollection", "features": features})
}

/// Clock frozen at 2026-10-18T12:00:00Z.
pub(crate) fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
    ))
}
