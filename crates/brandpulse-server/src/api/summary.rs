use axum::{
    extract::{Query, State},
    Extension, Json,
};
use brandpulse_core::Mention;
use serde::{Deserialize, Serialize};

use crate::dashboard::{summarize, top_posts, FilterQuery, Summary, TopPostSort};
use crate::middleware::RequestId;

use super::{load_view, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct SummaryData {
    pub empty: bool,
    pub warning: Option<String>,
    pub summary: Summary,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopPostsQuery {
    #[serde(default)]
    pub sort: TopPostSort,
}

#[derive(Debug, Serialize)]
pub(super) struct TopPostsData {
    pub empty: bool,
    pub warning: Option<String>,
    pub posts: Vec<Mention>,
}

pub(super) async fn get_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ApiResponse<SummaryData>>, ApiError> {
    let view = load_view(&state, &req_id.0, &query).await?;
    let rows = view.rows();
    let (empty, warning) = view.notice(rows.len());

    Ok(ApiResponse::new(
        SummaryData {
            empty,
            warning,
            summary: summarize(&rows),
        },
        req_id.0,
    ))
}

pub(super) async fn get_top_posts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FilterQuery>,
    Query(sort): Query<TopPostsQuery>,
) -> Result<Json<ApiResponse<TopPostsData>>, ApiError> {
    let view = load_view(&state, &req_id.0, &query).await?;
    let rows = view.rows();
    let (empty, warning) = view.notice(rows.len());

    let posts = top_posts(&rows, sort.sort).into_iter().cloned().collect();
    Ok(ApiResponse::new(
        TopPostsData {
            empty,
            warning,
            posts,
        },
        req_id.0,
    ))
}
