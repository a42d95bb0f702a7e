use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::{
    error::{RecommendError, RecommendResult, Stage},
    models::{validate_all, Collection, RawTrackRecord, TrackRecord, REQUIRED_COLUMNS},
};

/// Cell values a CSV export uses for "no value"; a title spelled like one of
/// these is treated as missing.
pub const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn null_marker_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !NULL_MARKERS.contains(&v.as_str()))
}

/// Read-only reference catalog recommendations are drawn from
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<TrackRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from validated tracks, keeping their order.
    ///
    /// When a track id repeats, lookups resolve to its first occurrence.
    pub fn new(tracks: Vec<TrackRecord>) -> Self {
        let mut index = HashMap::with_capacity(tracks.len());
        for (position, track) in tracks.iter().enumerate() {
            index.entry(track.track_id.clone()).or_insert(position);
        }
        Self { tracks, index }
    }

    /// Loads a catalog from a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> RecommendResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            tracks = catalog.len(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    /// Parses CSV with a header row.
    ///
    /// All required columns must be present; extra columns are ignored.
    /// `track_name` cells holding a [`NULL_MARKERS`] value load as missing
    /// titles.
    pub fn from_reader<R: Read>(reader: R) -> RecommendResult<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(RecommendError::schema(
                Stage::CatalogLoad,
                Collection::Catalog,
                format!("missing required columns: {}", missing.join(", ")),
            ));
        }

        let raw = reader
            .deserialize::<RawTrackRecord>()
            .map(|row| {
                row.map(|mut raw: RawTrackRecord| {
                    raw.track_name = null_marker_to_none(raw.track_name);
                    raw
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tracks = validate_all(raw, Collection::Catalog)?;

        Ok(Self::new(tracks))
    }

    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    pub fn get(&self, track_id: &str) -> Option<&TrackRecord> {
        self.index.get(track_id).map(|&i| &self.tracks[i])
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "artist_name,track_name,track_id,popularity,year,genre,danceability,energy,key,loudness,mode,speechiness,acousticness,instrumentalness,liveness,valence,tempo,duration_ms";

    fn csv_with(rows: &[&str]) -> String {
        let mut body = String::from(HEADER);
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body
    }

    #[test]
    fn test_loads_rows_and_ignores_extra_columns() {
        let data = csv_with(&[
            "Jason Mraz,I Won't Give Up,53QF56cjZA9RTuuMZDrSA6,68,2012,acoustic,0.483,0.303,4,-10.058,1,0.0429,0.694,0.0,0.115,0.139,133.406,240166",
            "Jason Mraz,93 Million Miles,1s8tP3jP4GZcyHDsjvw218,50,2012,acoustic,0.572,0.454,3,-10.286,1,0.0258,0.477,1.37e-05,0.0974,0.515,140.182,216387",
        ]);
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let track = catalog.get("1s8tP3jP4GZcyHDsjvw218").unwrap();
        assert_eq!(track.track_name.as_deref(), Some("93 Million Miles"));
        assert_eq!(track.artist_name.as_deref(), Some("Jason Mraz"));
        assert_eq!(track.key, 3);
        assert_eq!(track.audio.instrumentalness, 1.37e-05);
    }

    #[test]
    fn test_empty_title_loads_as_missing() {
        let data = csv_with(&[
            "Unknown,,0abc,10,2012,pop,0.5,0.5,1,-5.0,0,0.05,0.1,0.0,0.1,0.5,120.0,200000",
        ]);
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert!(catalog.get("0abc").unwrap().track_name.is_none());
    }

    #[test]
    fn test_null_marker_titles_load_as_missing() {
        let data = csv_with(&[
            "Unknown,None,a,10,2012,pop,0.5,0.5,1,-5.0,0,0.05,0.1,0.0,0.1,0.5,120.0,200000",
            "Someone,Song,b,20,2012,pop,0.5,0.5,1,-5.0,0,0.05,0.1,0.0,0.1,0.5,120.0,200000",
            "Unknown,NA,c,30,2012,pop,0.5,0.6,1,-5.0,0,0.05,0.1,0.0,0.1,0.5,120.0,200000",
            "Unknown,null,d,40,2012,pop,0.5,0.5,1,-5.0,0,0.05,0.1,0.0,0.1,0.5,120.0,200000",
            "Someone,Nonesuch,e,50,2012,pop,0.5,0.5,1,-5.0,0,0.05,0.1,0.0,0.1,0.5,120.0,200000",
        ]);
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 5);
        for id in ["a", "c", "d"] {
            assert!(catalog.get(id).unwrap().track_name.is_none(), "track {id}");
        }
        assert_eq!(catalog.get("b").unwrap().track_name.as_deref(), Some("Song"));
        assert_eq!(catalog.get("e").unwrap().track_name.as_deref(), Some("Nonesuch"));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let data = "track_id,track_name,popularity\nx,Song,5\n";
        let err = Catalog::from_reader(data.as_bytes()).unwrap_err();
        match err {
            RecommendError::Schema { stage, message, .. } => {
                assert_eq!(stage, Stage::CatalogLoad);
                assert!(message.contains("genre"));
                assert!(message.contains("tempo"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_value_is_schema_error() {
        let data = csv_with(&[
            "A,Song,0abc,10,2012,pop,,0.5,1,-5.0,0,0.05,0.1,0.0,0.1,0.5,120.0,200000",
        ]);
        let err = Catalog::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, RecommendError::Schema { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::from_path("/nonexistent/catalog.csv").unwrap_err();
        assert!(matches!(err, RecommendError::Io(_)));
    }
}
