use serde::{Deserialize, Serialize};

use super::RawTrackRecord;

/// Cosine similarity of one catalog track to the playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub track_id: String,
    /// In [-1, 1]
    pub similarity: f64,
}

impl SimilarityResult {
    pub fn new(track_id: impl Into<String>, similarity: f64) -> Self {
        Self {
            track_id: track_id.into(),
            similarity,
        }
    }
}

/// Display metadata for a recommended track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDetails {
    pub name: Option<String>,
    pub artist: Option<String>,
}

/// A ranked result enriched with display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub track_id: String,
    pub name: Option<String>,
    pub artist: Option<String>,
    pub similarity: f64,
}

impl Recommendation {
    pub fn new(result: SimilarityResult, details: TrackDetails) -> Self {
        Self {
            track_id: result.track_id,
            name: details.name,
            artist: details.artist,
            similarity: result.similarity,
        }
    }
}

/// Request body for the recommendations endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Playlist tracks, already resolved by the music-service client
    pub tracks: Vec<RawTrackRecord>,
    /// "heap" or "merge"; falls back to the configured default
    #[serde(default)]
    pub sort_method: Option<String>,
    /// Number of recommendations; falls back to the configured default
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response body for the recommendations endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub sort_method: String,
    pub recommendations: Vec<Recommendation>,
}
