use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Recommendation, SimilarityResult, TrackDetails},
    services::catalog::Catalog,
};

/// Source of display metadata for recommended tracks
///
/// The ranking core only knows track ids; implementations resolve them to
/// names and artists, e.g. from the catalog or an external music service.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrackLookup: Send + Sync {
    /// Fetch display metadata for one track, `None` if the id is unknown
    async fn track_details(&self, track_id: &str) -> AppResult<Option<TrackDetails>>;

    /// Lookup name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Resolves display metadata from the catalog itself
pub struct CatalogLookup {
    catalog: Arc<Catalog>,
}

impl CatalogLookup {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait::async_trait]
impl TrackLookup for CatalogLookup {
    async fn track_details(&self, track_id: &str) -> AppResult<Option<TrackDetails>> {
        Ok(self.catalog.get(track_id).map(|track| TrackDetails {
            name: track.track_name.clone(),
            artist: track.artist_name.clone(),
        }))
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}

/// Attaches display metadata to ranked results, keeping their order
pub async fn enrich(
    lookup: &dyn TrackLookup,
    results: Vec<SimilarityResult>,
) -> AppResult<Vec<Recommendation>> {
    let mut recommendations = Vec::with_capacity(results.len());

    for result in results {
        let details = lookup
            .track_details(&result.track_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(
                    lookup = lookup.name(),
                    track_id = %result.track_id,
                    "Ranked track has no details"
                );
                AppError::NotFound(format!("track {} not found", result.track_id))
            })?;
        recommendations.push(Recommendation::new(result, details));
    }

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enrich_preserves_order() {
        let mut lookup = MockTrackLookup::new();
        lookup
            .expect_track_details()
            .withf(|track_id| track_id == "b")
            .times(1)
            .returning(|_| {
                Ok(Some(TrackDetails {
                    name: Some("Bee".to_string()),
                    artist: Some("Band".to_string()),
                }))
            });
        lookup
            .expect_track_details()
            .withf(|track_id| track_id == "a")
            .times(1)
            .returning(|_| {
                Ok(Some(TrackDetails {
                    name: Some("Ay".to_string()),
                    artist: None,
                }))
            });

        let enriched = enrich(
            &lookup,
            vec![SimilarityResult::new("b", 0.9), SimilarityResult::new("a", 0.4)],
        )
        .await
        .unwrap();

        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].name.as_deref(), Some("Bee"));
        assert_eq!(enriched[0].similarity, 0.9);
        assert_eq!(enriched[1].track_id, "a");
        assert!(enriched[1].artist.is_none());
    }

    #[tokio::test]
    async fn test_enrich_unknown_track_is_not_found() {
        let mut lookup = MockTrackLookup::new();
        lookup.expect_track_details().returning(|_| Ok(None));
        lookup.expect_name().return_const("mock");

        let err = enrich(&lookup, vec![SimilarityResult::new("ghost", 0.1)])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Arc::new(Catalog::new(Vec::new()));
        let lookup = CatalogLookup::new(catalog);
        let details = tokio_test::block_on(lookup.track_details("missing")).unwrap();
        assert!(details.is_none());
        assert_eq!(lookup.name(), "catalog");
    }
}
