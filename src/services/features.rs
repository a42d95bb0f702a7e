//! Feature assembly for one track collection.
//!
//! Title sentiment labels and the categorical attributes are one-hot encoded,
//! popularity and the audio descriptors are min-max scaled, and every block is
//! weighted before being concatenated into a [`FeatureTable`].

use crate::{
    error::{RecommendError, RecommendResult, Stage},
    models::{Collection, FeatureTable, TrackRecord, AUDIO_COLUMNS},
    services::{
        encoding::one_hot_encode,
        scaling::scale_columns,
        sentiment::{Opinion, Polarization, SentimentAnalyzer},
    },
};

pub const DEFAULT_OPINION_WEIGHT: f64 = 0.3;
pub const DEFAULT_POLARIZATION_WEIGHT: f64 = 0.5;
pub const DEFAULT_KEY_WEIGHT: f64 = 0.5;
pub const DEFAULT_MODE_WEIGHT: f64 = 0.5;
pub const DEFAULT_GENRE_WEIGHT: f64 = 1.0;
pub const DEFAULT_POPULARITY_WEIGHT: f64 = 0.2;
pub const DEFAULT_AUDIO_WEIGHT: f64 = 0.2;

/// Weight applied to each feature block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights {
    pub opinion: f64,
    pub polarization: f64,
    pub key: f64,
    pub mode: f64,
    pub genre: f64,
    pub popularity: f64,
    /// Applied to each of the audio descriptor columns
    pub audio: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            opinion: DEFAULT_OPINION_WEIGHT,
            polarization: DEFAULT_POLARIZATION_WEIGHT,
            key: DEFAULT_KEY_WEIGHT,
            mode: DEFAULT_MODE_WEIGHT,
            genre: DEFAULT_GENRE_WEIGHT,
            popularity: DEFAULT_POPULARITY_WEIGHT,
            audio: DEFAULT_AUDIO_WEIGHT,
        }
    }
}

/// Builds the feature table of one collection.
///
/// Tracks without a title are dropped first. Fails when nothing is left: a
/// catalog with no usable rows is a schema problem, a playlist with no usable
/// rows cannot be turned into a vector.
pub fn assemble_features(
    tracks: &[TrackRecord],
    collection: Collection,
    analyzer: &dyn SentimentAnalyzer,
    weights: &FeatureWeights,
) -> RecommendResult<FeatureTable> {
    let titled: Vec<(&TrackRecord, &str)> = tracks
        .iter()
        .filter_map(|track| track.track_name.as_deref().map(|name| (track, name)))
        .collect();

    let dropped = tracks.len() - titled.len();
    if dropped > 0 {
        tracing::debug!(%collection, dropped, "Dropped tracks without a title");
    }

    if titled.is_empty() {
        let message = if tracks.is_empty() {
            "no tracks supplied".to_string()
        } else {
            format!("all {} tracks were dropped for missing titles", tracks.len())
        };
        return Err(match collection {
            Collection::Catalog => {
                RecommendError::schema(Stage::FeatureAssembly, collection, message)
            }
            Collection::Playlist => {
                RecommendError::degenerate(Stage::FeatureAssembly, collection, message)
            }
        });
    }

    let sentiments: Vec<_> = titled.iter().map(|(_, name)| analyzer.analyze(name)).collect();
    let opinions: Vec<Opinion> = sentiments.iter().map(|s| s.opinion()).collect();
    let polarizations: Vec<Polarization> = sentiments.iter().map(|s| s.polarization()).collect();
    let keys: Vec<i32> = titled.iter().map(|(t, _)| t.key).collect();
    let modes: Vec<i32> = titled.iter().map(|(t, _)| t.mode).collect();
    let genres: Vec<&str> = titled.iter().map(|(t, _)| t.genre.as_str()).collect();

    let popularity = [(
        "popularity",
        titled.iter().map(|(t, _)| t.popularity as f64).collect::<Vec<_>>(),
    )];

    let audio: Vec<(&str, Vec<f64>)> = AUDIO_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, titled.iter().map(|(t, _)| t.audio.values()[i]).collect()))
        .collect();

    let blocks = vec![
        one_hot_encode(&opinions, "opinion", weights.opinion),
        one_hot_encode(&polarizations, "polarization", weights.polarization),
        one_hot_encode(&keys, "key", weights.key),
        one_hot_encode(&modes, "mode", weights.mode),
        one_hot_encode(&genres, "genre", weights.genre),
        scale_columns(&popularity, weights.popularity),
        scale_columns(&audio, weights.audio),
    ];

    let track_ids = titled.iter().map(|(t, _)| t.track_id.clone()).collect();
    let table = FeatureTable::from_blocks(track_ids, blocks);

    tracing::debug!(
        %collection,
        rows = table.len(),
        columns = table.columns().len(),
        "Assembled feature table"
    );

    Ok(table)
}
