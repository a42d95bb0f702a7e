mod features;
mod recommendation;
mod track;

pub use features::{FeatureBlock, FeatureTable, PlaylistVector};
pub use recommendation::{
    Recommendation, RecommendationRequest, RecommendationResponse, SimilarityResult, TrackDetails,
};
pub use track::{
    validate_all, AudioFeatures, Collection, RawTrackRecord, TrackRecord, AUDIO_COLUMNS,
    REQUIRED_COLUMNS,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_from_result_and_details() {
        let rec = Recommendation::new(
            SimilarityResult::new("abc", 0.75),
            TrackDetails {
                name: Some("Dreams".to_string()),
                artist: Some("Fleetwood Mac".to_string()),
            },
        );
        assert_eq!(rec.track_id, "abc");
        assert_eq!(rec.name.as_deref(), Some("Dreams"));
        assert_eq!(rec.similarity, 0.75);
    }

    #[test]
    fn test_request_defaults() {
        let request: RecommendationRequest = serde_json::from_str(r#"{"tracks": []}"#).unwrap();
        assert!(request.tracks.is_empty());
        assert!(request.sort_method.is_none());
        assert!(request.limit.is_none());
    }

    #[test]
    fn test_raw_record_missing_fields_deserialize_as_none() {
        let raw: RawTrackRecord =
            serde_json::from_str(r#"{"track_id": "x", "popularity": 10}"#).unwrap();
        assert_eq!(raw.track_id.as_deref(), Some("x"));
        assert!(raw.track_name.is_none());
        assert!(raw.tempo.is_none());
    }
}
