//! HTTP surface: `/lookup` plus a health probe, with permissive CORS.

pub mod api;

use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::{engine::Engine, error::LookupError};

pub fn router(engine: Arc<Engine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/lookup", get(api::lookup))
        .route("/health", get(api::health))
        .with_state(engine)
        .layer(CatchPanicLayer::custom(api::handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(engine: Arc<Engine>, bind: &str) -> Result<(), LookupError> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!("falcon-lookup listening on {}", listener.local_addr()?);

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested, draining in-flight lookups");
}
