use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use medgraph_graphql::EventKind;
use medgraph_graphql::handler::{GRAPHQL_PATH, GRAPHQL_WS_PATH};
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    status: &'a str,
}

/// Service info, including the number of open subscriptions per field.
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let subscribers: serde_json::Map<String, serde_json::Value> = EventKind::ALL
        .into_iter()
        .map(|kind| {
            (
                kind.field_name().to_string(),
                json!(state.notifier.subscriber_count(kind)),
            )
        })
        .collect();

    let body = json!({
        "service": "medgraph",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "graphql": GRAPHQL_PATH,
        "subscriptions": GRAPHQL_WS_PATH,
        "subscribers": subscribers,
    });
    (StatusCode::OK, Json(body))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// Ready once the store answers a read.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_categories().await {
        Ok(_) => (StatusCode::OK, Json(HealthResponse { status: "ready" })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                }),
            )
        }
    }
}
