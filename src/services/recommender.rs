use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::RecommendResult,
    models::{Collection, SimilarityResult, TrackRecord},
    services::{
        catalog::Catalog,
        features::{assemble_features, FeatureWeights},
        sentiment::{LexiconAnalyzer, SentimentAnalyzer},
        similarity::rank_similarities,
        sorting::{top_k, SortMethod},
        vectorizer::vectorize_playlist,
    },
};

/// Runs the recommendation pipeline against a shared catalog.
///
/// Feature tables are rebuilt on every call; only the catalog records are
/// shared between calls.
pub struct Recommender {
    catalog: Arc<Catalog>,
    analyzer: Arc<dyn SentimentAnalyzer>,
    weights: FeatureWeights,
}

impl Recommender {
    /// Creates a recommender with the lexicon sentiment analyzer
    pub fn new(catalog: Arc<Catalog>, weights: FeatureWeights) -> Self {
        Self::with_analyzer(catalog, Arc::new(LexiconAnalyzer::new()), weights)
    }

    pub fn with_analyzer(
        catalog: Arc<Catalog>,
        analyzer: Arc<dyn SentimentAnalyzer>,
        weights: FeatureWeights,
    ) -> Self {
        Self {
            catalog,
            analyzer,
            weights,
        }
    }

    /// Similarity of every catalog track outside the playlist, in catalog order
    pub fn similarities(&self, playlist: &[TrackRecord]) -> RecommendResult<Vec<SimilarityResult>> {
        let catalog_features = assemble_features(
            self.catalog.tracks(),
            Collection::Catalog,
            self.analyzer.as_ref(),
            &self.weights,
        )?;
        let playlist_features = assemble_features(
            playlist,
            Collection::Playlist,
            self.analyzer.as_ref(),
            &self.weights,
        )?;

        let vectorized = vectorize_playlist(&catalog_features, &playlist_features);

        Ok(rank_similarities(
            self.catalog.tracks(),
            &vectorized.vector,
            &vectorized.other_tracks,
        ))
    }

    /// The `k` catalog tracks most similar to the playlist
    pub fn recommend(
        &self,
        playlist: &[TrackRecord],
        method: SortMethod,
        k: usize,
    ) -> RecommendResult<Vec<SimilarityResult>> {
        let start = Instant::now();

        let similarities = self.similarities(playlist)?;
        let candidates = similarities.len();
        let ranked = top_k(similarities, k, method);

        tracing::info!(
            playlist_tracks = playlist.len(),
            candidates,
            returned = ranked.len(),
            sort_method = %method,
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendation completed"
        );

        Ok(ranked)
    }
}
