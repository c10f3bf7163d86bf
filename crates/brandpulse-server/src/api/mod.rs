mod filters;
mod mentions;
mod summary;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use brandpulse_core::{Mention, Outcome};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dashboard::{Dataset, DatasetCache, FilterOptions, FilterQuery, MentionFilter};
use crate::middleware::{request_id, RequestId};

pub(crate) const NO_DATA_MESSAGE: &str = "No data found! Please run the data scraper first.";
pub(crate) const NO_MATCH_MESSAGE: &str = "No data matches your filters. Try adjusting your selection.";

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DatasetCache>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
    records: i64,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    pub(super) fn no_data(request_id: impl Into<String>) -> Self {
        Self::new(request_id, "no_data", NO_DATA_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "no_data" | "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// The loaded dataset with a resolved filter applied on demand.
pub(super) struct View {
    pub dataset: Arc<Dataset>,
    pub filter: MentionFilter,
    pub warning: Option<String>,
}

impl View {
    pub(super) fn rows(&self) -> Vec<&Mention> {
        self.filter.apply(&self.dataset.mentions)
    }

    /// `(empty, warning)` for a filtered result set.
    pub(super) fn notice(&self, matched: usize) -> (bool, Option<String>) {
        if matched == 0 {
            (true, Some(NO_MATCH_MESSAGE.to_string()))
        } else {
            (false, self.warning.clone())
        }
    }
}

pub(super) async fn load_options(
    state: &AppState,
    req_id: &str,
) -> Result<(Arc<Dataset>, FilterOptions), ApiError> {
    let dataset = state.cache.get().await;
    let options = FilterOptions::from_mentions(&dataset.mentions, dataset.last_updated)
        .ok_or_else(|| ApiError::no_data(req_id))?;
    Ok((dataset, options))
}

pub(super) async fn load_view(
    state: &AppState,
    req_id: &str,
    query: &FilterQuery,
) -> Result<View, ApiError> {
    let (dataset, options) = load_options(state, req_id).await?;
    let resolved = MentionFilter::resolve(query, &options)
        .map_err(|reason| ApiError::new(req_id, "validation_error", reason))?;
    Ok(View {
        dataset,
        filter: resolved.filter,
        warning: resolved.warning,
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/v1/health", get(health))
        .route("/api/v1/filters", get(filters::get_filters))
        .route("/api/v1/summary", get(summary::get_summary))
        .route("/api/v1/top-posts", get(summary::get_top_posts))
        .route("/api/v1/mentions", get(mentions::list_mentions))
        .route("/api/v1/export.csv", get(mentions::export_csv))
        .route("/api/v1/refresh", post(filters::refresh))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match state.cache.store().count().await {
        Outcome::Failed(reason) => {
            tracing::warn!(error = %reason, "health check: database unreadable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                        records: 0,
                    },
                    meta,
                }),
            )
        }
        outcome => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: if outcome.is_empty() { "empty" } else { "ok" },
                    records: outcome.into_value(),
                },
                meta,
            }),
        ),
    }
}
