use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
};
use metrics::counter;
use serde_json::Value;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::error::{ProxyError, StorageError};
use crate::normalize::normalize;
use crate::storage::{ImageStore, PUBLIC_PREFIX};
use crate::types::{ProxyResponse, StoredUpload};
use crate::upstream::Upstream;
use crate::validation::validate_request;

#[derive(Clone)]
pub struct AppState {
    upstream: Arc<dyn Upstream>,
    store: Arc<ImageStore>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>, store: ImageStore) -> Self {
        Self {
            upstream,
            store: Arc::new(store),
        }
    }
}

/// Routes served by the proxy. Metrics and tracing layers are added by the
/// binary.
pub fn create_app(state: AppState) -> Router {
    let files = ServeDir::new(state.store.upload_dir());

    Router::new()
        .route("/api/upload", post(tryon_handler))
        .route("/api/uploads", post(store_handler))
        .nest_service(PUBLIC_PREFIX, files)
        .with_state(state)
}

#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
async fn tryon_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ProxyResponse>), ProxyError> {
    counter!("tryon_requests_total").increment(1);

    let (status, envelope) = proxy_tryon(&state, &body).await.inspect_err(|e| match e {
        ProxyError::Validation(reason) => {
            counter!("tryon_rejected_total").increment(1);
            tracing::warn!(%reason, "Rejected try-on request");
        }
        ProxyError::MalformedBody(reason) => {
            counter!("tryon_rejected_total").increment(1);
            tracing::warn!(%reason, "Try-on request body is not JSON");
        }
        other => {
            counter!("tryon_upstream_failures_total").increment(1);
            tracing::error!(error = %other, "Try-on proxy failed");
        }
    })?;

    if status.is_success() && !envelope.images.is_empty() {
        tracing::info!(image_count = envelope.images.len(), "Try-on completed");
    } else {
        counter!("tryon_upstream_failures_total").increment(1);
        tracing::warn!(status = status.as_u16(), message = %envelope.message, "Upstream reported failure");
    }

    Ok((status, Json(envelope)))
}

async fn proxy_tryon(
    state: &AppState,
    body: &[u8],
) -> Result<(StatusCode, ProxyResponse), ProxyError> {
    let value: Value = serde_json::from_slice(body)?;
    let request = validate_request(&value)?;

    tracing::debug!(
        gender = ?request.subject_gender,
        height = %request.subject_height_bucket,
        weight = %request.subject_weight_bucket,
        n_images = %request.image_count,
        "Forwarding try-on request"
    );

    let reply = state.upstream.forward(&request).await?;
    Ok(normalize(reply.status, reply.body.as_ref()))
}

#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
async fn store_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StoredUpload>, StorageError> {
    let value: Value = serde_json::from_slice(&body)?;
    let stored = state
        .store
        .store(&value)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Local upload failed"))?;

    counter!("stored_uploads_total").increment(1);
    Ok(Json(stored))
}
