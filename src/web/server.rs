//! HTTP server for the dashboard

use crate::charts::ChartKind;
use crate::data::{AccidentTypeCount, Dataset, SectorAggregate, StateAggregate};
use crate::stats::CorrelationMatrix;
use crate::web::dashboard::{Dashboard, DashboardError, DashboardParams, RenderOptions};
use crate::web::page;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only state for every request.
pub struct AppState {
    pub dataset: Dataset,
    pub options: RenderOptions,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub rows: usize,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::UnknownChart(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self, status = status.as_u16(), "render pass failed");
        (status, Html(page::render_error_page(&self.to_string()))).into_response()
    }
}

/// Create the dashboard router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/charts/:chart", get(chart_svg))
        .route("/api/sectors", get(api_sectors))
        .route("/api/accidents", get(api_accidents))
        .route("/api/correlation", get(api_correlation))
        .route("/api/states", get(api_states))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run a render pass on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, DashboardError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DashboardError> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Full dashboard page
async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Result<Html<String>, DashboardError> {
    tracing::debug!(?params, "rendering dashboard");
    let html = blocking(move || {
        let view = Dashboard::render(&state.dataset, &state.options, &params)?;
        Ok(page::render_page(&view, &params))
    })
    .await?;
    Ok(Html(html))
}

/// Single chart as an SVG document
async fn chart_svg(
    State(state): State<Arc<AppState>>,
    Path(chart): Path<String>,
) -> Result<Response, DashboardError> {
    let kind = ChartKind::from_file_name(&chart).ok_or(DashboardError::UnknownChart(chart))?;
    let svg = blocking(move || Dashboard::render_chart(&state.dataset, &state.options, kind)).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn api_sectors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SectorAggregate>>, DashboardError> {
    let sectors = blocking(move || Dashboard::sectors(&state.dataset, &state.options)).await?;
    Ok(Json(sectors))
}

async fn api_accidents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AccidentTypeCount>>, DashboardError> {
    let accidents = blocking(move || Dashboard::accidents(&state.dataset)).await?;
    Ok(Json(accidents))
}

async fn api_correlation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CorrelationMatrix>, DashboardError> {
    let matrix = blocking(move || Dashboard::correlation(&state.dataset)).await?;
    Ok(Json(matrix))
}

async fn api_states(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StateAggregate>>, DashboardError> {
    let states = blocking(move || Dashboard::states(&state.dataset)).await?;
    Ok(Json(states))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rows: state.dataset.row_count(),
    })
}
