use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use super::{error::ApiError, page, run, AnalysisRequest, AppState, Report};
use crate::{charts::ChartKind, frequency::Threshold};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/analyze", get(analyze))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeParams {
    url: Option<String>,
    chart: Option<ChartKind>,
    min_count: Option<u32>,
}

impl AnalyzeParams {
    fn threshold(&self, state: &AppState) -> Result<Threshold, ApiError> {
        match self.min_count {
            Some(value) => Ok(Threshold::new(value)?),
            None => Ok(state.config.analysis.default_min_count),
        }
    }

    /// `None` when no URL was entered yet.
    fn request(&self, state: &AppState) -> Result<Option<AnalysisRequest>, ApiError> {
        let min_count = self.threshold(state)?;
        let url = self.url.as_deref().map(str::trim).unwrap_or_default();
        if url.is_empty() {
            return Ok(None);
        }
        Ok(Some(AnalysisRequest {
            url: url.to_string(),
            chart: self.chart.unwrap_or_default(),
            min_count,
        }))
    }
}

async fn index(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Html<String>, ApiError> {
    let request = params.request(&state)?;
    let form = page::FormState {
        url: params.url.clone().unwrap_or_default(),
        chart: params.chart.unwrap_or_default(),
        min_count: request
            .as_ref()
            .map(|r| r.min_count)
            .map_or_else(|| params.threshold(&state), Ok)?,
    };

    let report = match &request {
        Some(request) => Some(run(&state.analyzer, request, &state.config).await),
        None => None,
    };
    Ok(Html(page::render(&form, report.as_ref())))
}

async fn analyze(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<Report>, ApiError> {
    let request = params
        .request(&state)?
        .ok_or_else(|| ApiError::BadRequest("url is required".to_string()))?;
    Ok(Json(run(&state.analyzer, &request, &state.config).await))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
