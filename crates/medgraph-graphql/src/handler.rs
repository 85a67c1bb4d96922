//! Axum HTTP handlers for GraphQL endpoints.
//!
//! This module provides the HTTP handlers for GraphQL requests:
//! - `POST /graphql` - GraphQL endpoint
//! - `GET /graphql` - GraphQL (query via URL param), or a WebSocket upgrade
//!   for subscriptions
//! - `GET /graphql/ws` - Subscriptions over WebSocket
//! - `GET /graphiql` - GraphiQL IDE

use async_graphql::dynamic::Schema;
use async_graphql::http::{ALL_WEBSOCKET_PROTOCOLS, GraphiQLSource};
use async_graphql::{Request, Response, Variables};
use async_graphql_axum::{GraphQLProtocol, GraphQLSubscription, GraphQLWebSocket};
use axum::Json;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::RequestMeta;
use crate::error::GraphQLError;

/// Path of the query/mutation endpoint.
pub const GRAPHQL_PATH: &str = "/graphql";
/// Path of the WebSocket subscription endpoint.
pub const GRAPHQL_WS_PATH: &str = "/graphql/ws";

/// State shared across GraphQL handlers.
#[derive(Clone)]
pub struct GraphQLState {
    pub schema: Schema,
}

/// GraphQL request body.
#[derive(Debug, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL query string.
    pub query: String,

    /// Optional operation name for multi-operation documents.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,

    /// Optional variables for the query.
    pub variables: Option<serde_json::Value>,
}

/// Query parameters for GET requests.
#[derive(Debug, Deserialize)]
pub struct GraphQLQueryParams {
    /// The GraphQL query string.
    pub query: Option<String>,

    /// Optional operation name.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,

    /// Optional variables (JSON string).
    pub variables: Option<String>,
}

/// GraphQL response body.
#[derive(Debug, Serialize)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl From<Response> for GraphQLResponse {
    fn from(resp: Response) -> Self {
        let data_json = serde_json::to_value(&resp.data).unwrap_or(serde_json::Value::Null);
        let data = if data_json.is_null() {
            None
        } else {
            Some(data_json)
        };

        // message, locations, path and extensions (with `code`) as produced
        // by the resolvers
        let errors = resp
            .errors
            .iter()
            .map(|e| serde_json::to_value(e).unwrap_or(serde_json::Value::Null))
            .collect();

        Self {
            data,
            errors,
            extensions: if resp.extensions.is_empty() {
                None
            } else {
                Some(serde_json::to_value(&resp.extensions).unwrap_or(serde_json::Value::Null))
            },
        }
    }
}

/// Handles POST requests to /graphql.
pub async fn graphql_handler(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    Json(request): Json<GraphQLRequest>,
) -> impl IntoResponse {
    debug!("Processing GraphQL request");
    execute_graphql(state, headers, request).await
}

/// Handles GET requests to /graphql.
///
/// A WebSocket upgrade on this path is served as a subscription
/// connection, so clients may use one URL for every operation.
pub async fn graphql_handler_get(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    protocol: Result<GraphQLProtocol, StatusCode>,
    Query(params): Query<GraphQLQueryParams>,
) -> axum::response::Response {
    if let Ok(upgrade) = upgrade {
        let Ok(protocol) = protocol else {
            return error_response(GraphQLError::InvalidQuery(
                "unsupported WebSocket subprotocol".into(),
            ))
            .into_response();
        };
        debug!("Upgrading GraphQL GET request to WebSocket");
        let schema = state.schema;
        return upgrade
            .protocols(ALL_WEBSOCKET_PROTOCOLS)
            .on_upgrade(move |socket| GraphQLWebSocket::new(socket, schema, protocol).serve());
    }

    let request = match params_to_request(params) {
        Ok(req) => req,
        Err(e) => {
            return error_response(GraphQLError::InvalidQuery(e.to_string())).into_response();
        }
    };

    debug!("Processing GraphQL GET request");
    execute_graphql(state, headers, request).await.into_response()
}

/// Serves the GraphiQL IDE wired to the HTTP and WebSocket endpoints.
pub async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .subscription_endpoint(GRAPHQL_WS_PATH)
            .finish(),
    )
}

/// WebSocket service for subscriptions (`graphql-transport-ws` and the
/// legacy `graphql-ws` protocol).
///
/// Closing the socket drops every stream it carried, which unregisters the
/// corresponding notifier queues.
pub fn subscription_service(schema: Schema) -> GraphQLSubscription<Schema> {
    GraphQLSubscription::new(schema)
}

/// Executes a GraphQL request.
async fn execute_graphql(
    state: GraphQLState,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> axum::response::Response {
    // Extract request ID from headers (set by middleware)
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let mut gql_request = Request::new(&request.query);

    if let Some(op_name) = request.operation_name {
        gql_request = gql_request.operation_name(op_name);
    }

    if let Some(vars) = request.variables {
        gql_request = gql_request.variables(Variables::from_json(vars));
    }

    gql_request = gql_request.data(RequestMeta::new(request_id.clone()));

    debug!(request_id = %request_id, query = %request.query, "Executing GraphQL query");
    let response = state.schema.execute(gql_request).await;

    // GraphQL errors still answer 200 OK
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(GraphQLResponse::from(response)),
    )
        .into_response()
}

/// Converts GET query params to a GraphQL request.
fn params_to_request(params: GraphQLQueryParams) -> Result<GraphQLRequest, GraphQLError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| GraphQLError::InvalidQuery("missing 'query' parameter".into()))?;

    let variables = match params.variables {
        Some(vars) => Some(
            serde_json::from_str(&vars)
                .map_err(|e| GraphQLError::InvalidQuery(format!("variables: {e}")))?,
        ),
        None => None,
    };

    Ok(GraphQLRequest {
        query,
        operation_name: params.operation_name,
        variables,
    })
}

/// Returns an error response for failures outside query execution.
fn error_response(error: GraphQLError) -> impl IntoResponse {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = serde_json::json!({
        "errors": [{
            "message": error.to_string(),
            "extensions": {
                "code": error.error_code()
            }
        }]
    });

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
}
