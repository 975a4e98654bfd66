//! Serve command implementation.
//!
//! Serves forecasts out of the published artifact over HTTP. Requests read
//! the persisted bundle; nothing is recomputed at request time, so a
//! republished artifact is picked up without a restart.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path as UrlPath, State},
    http::StatusCode,
    routing::get,
};
use outbraik_lib::prelude::*;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

#[derive(Clone)]
struct AppState {
    store: Arc<ArtifactStore>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Start the forecast HTTP server.
pub(crate) async fn serve(artifact: Option<&Path>, port: u16) -> Result<()> {
    let config = artifact.map_or_else(StoreConfig::default, StoreConfig::new);
    let store = ArtifactStore::new(config);

    // Fail fast on a missing or malformed artifact instead of 404ing forever.
    let bundle = store
        .load()
        .with_context(|| format!("Cannot load artifact from {}", store.path().display()))?;
    info!(
        groups = bundle.len(),
        path = %store.path().display(),
        "serving published artifact"
    );

    let state = AppState {
        store: Arc::new(store),
    };
    let app = Router::new()
        .route("/", get(health))
        .route("/forecast/:region/:metric", get(forecast))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn forecast(
    UrlPath((region, metric)): UrlPath<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<ForecastResult>, (StatusCode, Json<ErrorBody>)> {
    let bundle = state.store.load().map_err(|e| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody {
                error: format!("artifact unreadable: {e}"),
            }),
        )
    })?;

    match bundle.get(&region, &metric) {
        Some(GroupArtifact::Forecast(result)) => Ok(Json(result.clone())),
        Some(GroupArtifact::Unavailable { error }) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("forecast unavailable for {region}/{metric}: {error}"),
            }),
        )),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("forecast unavailable: no group {region}/{metric}"),
            }),
        )),
    }
}
