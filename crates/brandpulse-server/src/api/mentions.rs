use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use brandpulse_core::{mentions_to_csv, Mention};
use serde::{Deserialize, Serialize};

use crate::dashboard::FilterQuery;
use crate::middleware::RequestId;

use super::{load_view, ApiError, ApiResponse, AppState};

const EXPORT_FILE_NAME: &str = "reddit_sentiment_data.csv";
const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

#[derive(Debug, Deserialize)]
pub(super) struct PageQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct MentionsPage {
    pub empty: bool,
    pub warning: Option<String>,
    /// Rows matching the filter.
    pub matched: usize,
    /// Rows in the whole store.
    pub total_records: usize,
    pub page: usize,
    pub page_size: usize,
    pub rows: Vec<Mention>,
}

/// Snap to the nearest offered page size at or above the request.
pub(super) fn normalize_page_size(requested: Option<usize>) -> usize {
    let requested = requested.unwrap_or(PAGE_SIZES[0]);
    PAGE_SIZES
        .iter()
        .copied()
        .find(|&size| size >= requested)
        .unwrap_or(PAGE_SIZES[PAGE_SIZES.len() - 1])
}

pub(super) async fn list_mentions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FilterQuery>,
    Query(paging): Query<PageQuery>,
) -> Result<Json<ApiResponse<MentionsPage>>, ApiError> {
    let view = load_view(&state, &req_id.0, &query).await?;
    let rows = view.rows();
    let (empty, warning) = view.notice(rows.len());

    let page = paging.page.unwrap_or(1).max(1);
    let page_size = normalize_page_size(paging.page_size);
    let page_rows = rows
        .iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .map(|m| (*m).clone())
        .collect();

    Ok(ApiResponse::new(
        MentionsPage {
            empty,
            warning,
            matched: rows.len(),
            total_records: view.dataset.mentions.len(),
            page,
            page_size,
            rows: page_rows,
        },
        req_id.0,
    ))
}

/// Filtered rows as a CSV download.
pub(super) async fn export_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, ApiError> {
    let view = load_view(&state, &req_id.0, &query).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        mentions_to_csv(view.rows()),
    )
        .into_response())
}
