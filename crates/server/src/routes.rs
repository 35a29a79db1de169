//! Request handlers.

use axum::Json;
use axum::extract::{Query, State};
use gleaner_core::{ExtractionResult, HtmlSource, MetadataResult, Plan, resolve_metadata};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

impl UrlQuery {
    fn require(self) -> Result<String, ApiError> {
        self.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()).ok_or(ApiError::MissingUrl)
    }
}

/// Body of a successful `/extract` response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub success: bool,
    pub title: String,
    pub content: String,
    pub text_content: String,
    pub excerpt: String,
    pub byline: String,
    pub site_name: String,
    pub length: usize,
    pub plan: Plan,
    pub confidence: u8,
    pub source_url: String,
}

impl ExtractResponse {
    fn new(result: ExtractionResult, source_url: String) -> Self {
        Self {
            success: result.success,
            title: result.title,
            content: result.content,
            text_content: result.text_content,
            excerpt: result.excerpt,
            byline: result.byline,
            site_name: result.site_name,
            length: result.length,
            plan: result.plan,
            confidence: result.confidence,
            source_url,
        }
    }
}

/// Body of a successful `/metadata` response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    #[serde(flatten)]
    pub metadata: MetadataResult,
    pub source_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

/// `GET /extract?url=...`
pub async fn extract<S: HtmlSource>(
    State(state): State<AppState<S>>, Query(query): Query<UrlQuery>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let url = query.require()?;
    let html = state.source.fetch(&url).await?;
    let result = state.extractor.extract(&html, &url).await;

    if !result.success || result.length == 0 {
        return Err(ApiError::ExtractionFailed(url));
    }

    tracing::info!(%url, plan = %result.plan, confidence = result.confidence, "extracted");
    Ok(Json(ExtractResponse::new(result, url)))
}

/// `GET /metadata?url=...`
///
/// Resolution is synchronous DOM work, so it runs on a blocking worker.
pub async fn metadata<S: HtmlSource>(
    State(state): State<AppState<S>>, Query(query): Query<UrlQuery>,
) -> Result<Json<MetadataResponse>, ApiError> {
    let url = query.require()?;
    let html = state.source.fetch(&url).await?;

    let page_url = url.clone();
    let metadata = task::spawn_blocking(move || resolve_metadata(&html, &page_url))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(%url, source = ?metadata.source, confidence = metadata.confidence, "resolved metadata");
    Ok(Json(MetadataResponse { metadata, source_url: url }))
}
