use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{validate_all, Collection, RecommendationRequest, RecommendationResponse},
    services::{lookup::enrich, sorting::SortMethod},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommends catalog tracks for a playlist
pub async fn recommend(
    State(state): State<AppState>,
    request_id: RequestId,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let sort_method = match request.sort_method.as_deref() {
        Some(name) => name.parse::<SortMethod>()?,
        None => state.default_sort_method,
    };
    let limit = request.limit.unwrap_or(state.recommendation_limit);

    tracing::info!(
        request_id = %request_id,
        playlist_tracks = request.tracks.len(),
        sort_method = %sort_method,
        limit,
        "Processing recommendation request"
    );

    let playlist = validate_all(request.tracks, Collection::Playlist)?;

    let recommender = state.recommender.clone();
    let ranked = tokio::task::spawn_blocking(move || {
        recommender.recommend(&playlist, sort_method, limit)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    let recommendations = enrich(state.lookup.as_ref(), ranked).await?;

    tracing::info!(
        request_id = %request_id,
        returned = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(RecommendationResponse {
        sort_method: sort_method.to_string(),
        recommendations,
    }))
}
