use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::ResultEnvelope;
use crate::search::NewsSearch;

use super::models::{ErrorResponse, HealthResponse};

pub async fn news_handler(
    State(news): State<Arc<NewsSearch>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ResultEnvelope>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();

    let envelope = news.search(&params).await.map_err(|e| {
        tracing::error!(error = %e, "news search failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::fetch_failed(&e)),
        )
    })?;

    tracing::info!(
        total = envelope.total,
        returned = envelope.data.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "news search served"
    );
    Ok(Json(envelope))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
