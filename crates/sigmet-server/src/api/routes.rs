//! Advisory REST routes.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use sigmet_core::{AdvisoryError, AdvisoryQuery, AdvisoryType, FeatureCollection};
use std::sync::Arc;

use crate::state::AppState;

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/isigmet", get(get_isigmet))
        .route("/api/airsigmet", get(get_airsigmet))
}

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub data: FeatureCollection,
}

type ApiResult = Result<Json<AdvisoryResponse>, (StatusCode, Json<Value>)>;
type QueryResult = Result<Query<AdvisoryQuery>, QueryRejection>;

async fn get_isigmet(State(state): State<Arc<AppState>>, query: QueryResult) -> ApiResult {
    advisories(&state, AdvisoryType::EnRoute, query).await
}

async fn get_airsigmet(State(state): State<Arc<AppState>>, query: QueryResult) -> ApiResult {
    advisories(&state, AdvisoryType::Airmen, query).await
}

async fn advisories(state: &AppState, advisory: AdvisoryType, query: QueryResult) -> ApiResult {
    // A query string axum cannot decode gets the same error envelope as any other failure.
    let result = match query {
        Ok(Query(query)) => state.aggregator().aggregate(advisory, &query).await,
        Err(rejection) => Err(AdvisoryError::InvalidQuery(rejection.body_text())),
    };

    match result {
        Ok(data) => {
            tracing::debug!(%advisory, features = data.len(), "Serving advisories");
            Ok(Json(AdvisoryResponse { data }))
        }
        Err(err) => {
            // Every failure kind maps to the same status; the kind only goes to logs.
            tracing::warn!(%advisory, kind = err.kind(), "Advisory request failed: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ))
        }
    }
}
