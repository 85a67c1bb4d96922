use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql::dynamic::Schema;
use axum::{Router, extract::FromRef, middleware, routing::get};
use medgraph_db_memory::InMemoryStore;
use medgraph_graphql::handler::{
    GRAPHQL_PATH, GRAPHQL_WS_PATH, GraphQLState, graphiql, graphql_handler, graphql_handler_get,
    subscription_service,
};
use medgraph_graphql::{ChangeNotifier, MedicalSchemaBuilder};
use medgraph_storage::{DynStore, EventedStore};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{bootstrap, config::AppConfig, handlers, middleware as app_middleware};

/// Shared state behind every route.
#[derive(Clone)]
pub struct AppState {
    /// Evented store; every successful mutation reaches the notifier.
    pub store: DynStore,
    pub notifier: Arc<ChangeNotifier>,
    pub schema: Schema,
}

impl AppState {
    /// Wires store, notifier and schema together and seeds bootstrap data.
    pub async fn new(cfg: &AppConfig) -> anyhow::Result<Self> {
        let notifier = ChangeNotifier::new_shared();
        let store: DynStore =
            Arc::new(EventedStore::new(InMemoryStore::new()).with_hook(notifier.clone()));

        let seeded = bootstrap::seed_categories(store.as_ref(), &cfg.bootstrap).await?;
        tracing::debug!(seeded, "Store initialized");

        let schema = MedicalSchemaBuilder::new(
            store.clone(),
            notifier.clone(),
            cfg.graphql.to_schema_builder_config(),
        )
        .build()?;

        Ok(Self {
            store,
            notifier,
            schema,
        })
    }
}

impl FromRef<AppState> for GraphQLState {
    fn from_ref(state: &AppState) -> Self {
        GraphQLState {
            schema: state.schema.clone(),
        }
    }
}

pub struct MedgraphServer {
    addr: SocketAddr,
    app: Router,
}

/// Builds the router over an already initialized state.
pub fn build_router(cfg: &AppConfig, state: AppState) -> Router {
    let body_limit = cfg.server.body_limit_bytes;

    let mut router = Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        // GraphQL over HTTP and WebSocket
        .route(GRAPHQL_PATH, get(graphql_handler_get).post(graphql_handler))
        .route_service(GRAPHQL_WS_PATH, subscription_service(state.schema.clone()));

    if cfg.graphql.playground {
        router = router.route("/graphiql", get(graphiql));
    }

    router
        .with_state(state)
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let req_id = req
                        .headers()
                        .get(app_middleware::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        // Outermost so the trace span already sees the request id
        .layer(middleware::from_fn(app_middleware::request_id))
}

pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = AppState::new(cfg).await?;
    Ok(build_router(cfg, state))
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub async fn build(self) -> anyhow::Result<MedgraphServer> {
        let app = build_app(&self.config).await?;

        Ok(MedgraphServer {
            addr: self.addr,
            app,
        })
    }
}

impl MedgraphServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
