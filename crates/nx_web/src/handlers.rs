use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use nx_core::{ArticleRecord, EntityBuckets, Error};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct EntitiesRequest {
    pub text: String,
}

/// Maps a failure onto an HTTP answer for this request only.
#[derive(Debug)]
pub enum ApiError {
    /// Extraction or classification failed.
    Pipeline(Error),
    /// The body was not the expected JSON.
    Request(JsonRejection),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Pipeline(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Request(rejection)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Pipeline(Error::MissingElement { .. } | Error::DateParse { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Pipeline(Error::Transport(_)) => StatusCode::BAD_GATEWAY,
            Self::Pipeline(Error::PageNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Request(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Pipeline(err) => err.to_string(),
            Self::Request(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        tracing::warn!("request failed with {}: {}", status, message);
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn extract_article(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ArticleRecord>, ApiError> {
    let Json(request) = request?;
    let record = state.extractor.extract(&request.url).await?;
    Ok(Json(record))
}

pub async fn classify_entities(
    State(state): State<Arc<AppState>>,
    request: Result<Json<EntitiesRequest>, JsonRejection>,
) -> Result<Json<EntityBuckets>, ApiError> {
    let Json(request) = request?;
    let buckets = state.classifier.classify(&request.text).await?;
    Ok(Json(buckets))
}
