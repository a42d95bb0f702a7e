use std::collections::HashSet;

use crate::models::{FeatureTable, PlaylistVector};

/// Playlist vector and the catalog rows it is compared against
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizedPlaylist {
    pub vector: PlaylistVector,
    /// Catalog tracks absent from the playlist, in catalog order
    pub other_tracks: FeatureTable,
}

/// Collapses a playlist into one vector aligned with the catalog schema.
///
/// The two tables were encoded independently, so their one-hot columns
/// differ. The playlist is expanded with the catalog's columns before
/// summing, the remaining catalog rows are expanded with the playlist's
/// columns, and the vector is laid out in the catalog side's column order
/// (catalog columns first, then playlist-only columns).
pub fn vectorize_playlist(catalog: &FeatureTable, playlist: &FeatureTable) -> VectorizedPlaylist {
    let mut playlist = playlist.clone();
    playlist.expand_with(catalog.columns());

    let summed = PlaylistVector {
        columns: playlist.columns().to_vec(),
        values: playlist.column_sums(),
    };

    let playlist_ids: HashSet<&str> = playlist.track_ids().iter().map(String::as_str).collect();
    let mut other_tracks = catalog.clone();
    other_tracks.retain_tracks(|id| !playlist_ids.contains(id));
    other_tracks.expand_with(playlist.columns());

    let vector = summed.reorder(other_tracks.columns());

    tracing::debug!(
        playlist_tracks = playlist.len(),
        other_tracks = other_tracks.len(),
        columns = vector.columns.len(),
        "Vectorized playlist"
    );

    VectorizedPlaylist {
        vector,
        other_tracks,
    }
}
