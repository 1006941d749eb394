//! HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use encourager_core::{Error, Language, VersePayload};
use serde::{Deserialize, Serialize};

use crate::SharedLookup;

/// Query string of `/api/verse/random`
#[derive(Debug, Deserialize)]
pub struct VerseQuery {
    pub lang: Option<String>,
    pub index: Option<i64>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Lookup failure as an HTTP response
pub struct ApiError(Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Verse lookup failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// GET /api/verse/random
pub async fn random_verse(
    State(lookup): State<SharedLookup>,
    Query(query): Query<VerseQuery>,
) -> Result<Json<VersePayload>, ApiError> {
    let language = query
        .lang
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();

    let verse = lookup.pick(language, query.index).map_err(ApiError)?;
    tracing::debug!(
        "Served {} verse {} (requested {:?})",
        language,
        verse.index,
        query.index
    );
    Ok(Json(verse))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
    })
}
