use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dashboard::FilterOptions;
use crate::middleware::RequestId;

use super::{load_options, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct RefreshData {
    pub records: usize,
    pub last_updated: Option<DateTime<Utc>>,
}

pub(super) async fn get_filters(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<FilterOptions>>, ApiError> {
    let (_, options) = load_options(&state, &req_id.0).await?;
    Ok(ApiResponse::new(options, req_id.0))
}

/// Drop the cached dataset and reload it from the store.
pub(super) async fn refresh(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<RefreshData>> {
    state.cache.invalidate().await;
    let dataset = state.cache.get().await;
    tracing::info!(records = dataset.mentions.len(), "dataset refreshed");

    ApiResponse::new(
        RefreshData {
            records: dataset.mentions.len(),
            last_updated: dataset.last_updated,
        },
        req_id.0,
    )
}
