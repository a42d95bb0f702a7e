use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{RecommendError, RecommendResult, Stage};

/// Names of the continuous audio descriptors, in feature order
pub const AUDIO_COLUMNS: [&str; 9] = [
    "danceability",
    "energy",
    "loudness",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
];

/// Columns every track collection must provide
pub const REQUIRED_COLUMNS: [&str; 15] = [
    "track_id",
    "popularity",
    "track_name",
    "genre",
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
];

/// Which side of the comparison a set of tracks belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// The reference catalog recommendations are drawn from
    Catalog,
    /// The user-supplied playlist
    Playlist,
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Catalog => write!(f, "catalog"),
            Collection::Playlist => write!(f, "playlist"),
        }
    }
}

/// Continuous audio descriptors of a track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
}

impl AudioFeatures {
    /// Values in the same order as [`AUDIO_COLUMNS`]
    pub fn values(&self) -> [f64; 9] {
        [
            self.danceability,
            self.energy,
            self.loudness,
            self.speechiness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
            self.tempo,
        ]
    }
}

/// A validated, immutable track record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub track_id: String,
    /// Popularity score in [0, 100]
    pub popularity: i64,
    /// Missing titles are kept here and dropped during feature assembly
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub genre: String,
    /// Pitch class code (0 = C, 1 = C#, ...)
    pub key: i32,
    /// 1 = major, 0 = minor
    pub mode: i32,
    pub audio: AudioFeatures,
}

/// Track record as delivered by a catalog file or an external client.
///
/// Every field is optional so that missing data can be reported with the
/// offending column instead of a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTrackRecord {
    pub track_id: Option<String>,
    pub popularity: Option<i64>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub genre: Option<String>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub key: Option<i32>,
    pub loudness: Option<f64>,
    pub mode: Option<i32>,
    pub speechiness: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub valence: Option<f64>,
    pub tempo: Option<f64>,
}

impl RawTrackRecord {
    /// Validates the record into a [`TrackRecord`].
    ///
    /// `row` is the zero-based position of the record in its collection and is
    /// only used for error context.
    pub fn validate(self, collection: Collection, row: usize) -> RecommendResult<TrackRecord> {
        let missing = |column: &str| {
            RecommendError::schema(
                Stage::Validation,
                collection,
                format!("row {}: missing required field `{}`", row, column),
            )
        };

        let track_id = self
            .track_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| missing("track_id"))?;
        let popularity = self.popularity.ok_or_else(|| missing("popularity"))?;
        if !(0..=100).contains(&popularity) {
            return Err(RecommendError::schema(
                Stage::Validation,
                collection,
                format!(
                    "row {} ({}): popularity {} outside [0, 100]",
                    row, track_id, popularity
                ),
            ));
        }

        let genre = self.genre.ok_or_else(|| missing("genre"))?;
        let key = self.key.ok_or_else(|| missing("key"))?;
        let mode = self.mode.ok_or_else(|| missing("mode"))?;

        let float = |value: Option<f64>, column: &str| -> RecommendResult<f64> {
            let value = value.ok_or_else(|| missing(column))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(RecommendError::schema(
                    Stage::Validation,
                    collection,
                    format!("row {}: `{}` is not a finite number", row, column),
                ))
            }
        };

        let audio = AudioFeatures {
            danceability: float(self.danceability, "danceability")?,
            energy: float(self.energy, "energy")?,
            loudness: float(self.loudness, "loudness")?,
            speechiness: float(self.speechiness, "speechiness")?,
            acousticness: float(self.acousticness, "acousticness")?,
            instrumentalness: float(self.instrumentalness, "instrumentalness")?,
            liveness: float(self.liveness, "liveness")?,
            valence: float(self.valence, "valence")?,
            tempo: float(self.tempo, "tempo")?,
        };

        Ok(TrackRecord {
            track_id,
            popularity,
            track_name: self.track_name,
            artist_name: self.artist_name,
            genre,
            key,
            mode,
            audio,
        })
    }
}

/// Validates a whole collection, preserving order
pub fn validate_all(
    records: Vec<RawTrackRecord>,
    collection: Collection,
) -> RecommendResult<Vec<TrackRecord>> {
    records
        .into_iter()
        .enumerate()
        .map(|(row, raw)| raw.validate(collection, row))
        .collect()
}
