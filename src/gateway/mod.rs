//! HTTP gateway: routes, shared state, CORS and API docs

pub mod cors;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the application router.
pub fn build_router(state: Arc<AppState>, config: &GatewayConfig) -> Router {
    // Uploads get their own body limit; everything else keeps axum's default.
    let uploads = Router::new()
        .route("/upload_document", post(handlers::upload_document))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Leads. The static `followup` segment wins over `{id}` and only
        // answers GET; ULID ids can never collide with it.
        .route(
            "/leads",
            post(handlers::create_lead).get(handlers::list_leads),
        )
        .route("/leads/followup", get(handlers::list_followup_leads))
        .route(
            "/leads/{id}",
            get(handlers::get_lead).delete(handlers::delete_lead),
        )
        .route("/leads/{id}/stage", put(handlers::update_lead_stage))
        // Orders
        .route(
            "/orders",
            post(handlers::create_order).get(handlers::list_orders),
        )
        .route(
            "/orders/{id}",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/orders/{id}/status", put(handlers::update_order_status))
        // Metrics
        .route("/metrics/leads", get(handlers::lead_metrics))
        .route("/metrics/orders", get(handlers::order_metrics))
        // Documents
        .merge(uploads)
        .route("/delete_document", delete(handlers::delete_document))
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(&config.cors_origins))
}

/// Start HTTP Gateway server; returns when a shutdown signal arrives.
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state, config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!(
            "Failed to bind to {}: {} (port {} may already be in use)",
            addr,
            e,
            config.port
        );
        e
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
