//! HTTP request handlers.

use agrichain_types::CONTRACT_NOT_INITIALIZED;
use crate::error::Error;
use crate::lookup::{LookupPhase, LookupSession, Rejection};
use crate::metrics::METRICS;
use crate::provider::Provider;
use crate::response::{HealthResponse, ProductResponse};
use crate::state::AppState;
use crate::view;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Deserialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub product_id: Option<String>,
    /// Set by the sample-id links; takes precedence over `product_id`.
    pub sample: Option<String>,
}

/// Landing page.
pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(view::render_home(state.theme))
}

/// Tracking page. With `product_id` or `sample`, runs one lookup before
/// rendering.
pub async fn track(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrackQuery>,
) -> Html<String> {
    let mut session = LookupSession::mount(&state.binding);

    if let Some(sample_id) = query.sample {
        state.request_count.fetch_add(1, Ordering::Relaxed);
        info!(sample_id = %sample_id, "Sample track request");
        session
            .submit_sample(&state.binding, &sample_id)
            .instrument(info_span!("lookup", product_id = %sample_id))
            .await;
    } else if let Some(product_id) = query.product_id {
        state.request_count.fetch_add(1, Ordering::Relaxed);
        info!(product_id = %product_id, "Track request");
        let span = info_span!("lookup", product_id = %product_id);
        session.set_query(product_id);
        session.submit(&state.binding).instrument(span).await;
    }

    Html(view::render_track(
        state.theme,
        &session,
        &state.config.sample_ids,
    ))
}

/// Lookup as JSON. `GET /api/products/{product_id}`
pub async fn product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> (StatusCode, Json<ProductResponse>) {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    info!(product_id = %product_id, "API product request");

    let mut session = LookupSession::mount(&state.binding);
    session.set_query(product_id.as_str());
    let phase = session
        .submit(&state.binding)
        .instrument(info_span!("lookup", product_id = %product_id))
        .await;

    let trimmed = product_id.trim();
    match (phase, session.last_result(), session.last_error()) {
        (LookupPhase::Success, Some(record), _) => {
            (StatusCode::OK, Json(ProductResponse::ok(trimmed, record)))
        }
        (LookupPhase::Failed, _, error) => (
            StatusCode::NOT_FOUND,
            Json(ProductResponse::err(trimmed, error.unwrap_or_default())),
        ),
        (_, _, error) => {
            let status = match session.rejection() {
                Some(Rejection::EmptyProductId) => StatusCode::BAD_REQUEST,
                Some(Rejection::ContractNotInitialized) | None => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            };
            warn!(status = %status, "Lookup rejected");
            (
                status,
                Json(ProductResponse::err(trimmed, error.unwrap_or_default())),
            )
        }
    }
}

/// Readiness probe. 200 once the contract handle is bound.
pub async fn ready(State(state): State<Arc<AppState>>) -> Result<StatusCode, Error> {
    if state.binding.is_bound() {
        return Ok(StatusCode::OK);
    }
    let reason = state.binding.error().unwrap_or(CONTRACT_NOT_INITIALIZED);
    Err(Error::ProviderUnavailable(reason.to_string()))
}

/// Prometheus metrics in text exposition format.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = METRICS.render(
        state.binding.is_bound(),
        state.start_time.elapsed().as_secs(),
    );
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4",
        )],
        body,
    )
}

/// Health check with binding and provider status.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let contract = state.binding.contract();

    let (provider, chain_id) = match contract {
        Some(contract) => {
            let provider = contract.provider();
            match provider.chain_id().await {
                Ok(id) => (Some(provider.endpoint()), Some(id)),
                Err(e) => {
                    warn!(error = %e, "Provider health check failed");
                    (Some(provider.endpoint()), None)
                }
            }
        }
        None => (None, None),
    };

    let status = match (contract.is_some(), chain_id.is_some()) {
        (true, true) => "ok",
        (true, false) => "degraded",
        (false, _) => "unavailable",
    };

    Json(HealthResponse {
        status,
        contract_address: state.config.contract_address.clone(),
        contract_bound: contract.is_some(),
        provider,
        chain_id,
        uptime_secs: state.start_time.elapsed().as_secs(),
        requests: state.request_count.load(Ordering::Relaxed),
    })
}
