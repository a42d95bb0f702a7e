use std::collections::HashSet;

use crate::models::{FeatureTable, PlaylistVector, SimilarityResult, TrackRecord};

/// Cosine similarity of two equally long vectors.
///
/// Returns 0.0 when either vector has zero norm. Both vectors are divided by
/// their largest magnitude first, so large weights cannot overflow the norms.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let scale_a = max_magnitude(a);
    let scale_b = max_magnitude(b);
    if scale_a == 0.0 || scale_b == 0.0 || !scale_a.is_finite() || !scale_b.is_finite() {
        return 0.0;
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x / scale_a, y / scale_b))
        .fold((0.0_f64, 0.0_f64, 0.0_f64), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

fn max_magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |max, v| max.max(v.abs()))
}

/// Scores every row of `other_tracks` against the playlist vector.
///
/// `other_tracks` must share the vector's column order. Only tracks that
/// exist in `catalog` are scored; results follow the table's row order.
pub fn rank_similarities(
    catalog: &[TrackRecord],
    vector: &PlaylistVector,
    other_tracks: &FeatureTable,
) -> Vec<SimilarityResult> {
    debug_assert_eq!(other_tracks.columns(), &vector.columns[..]);

    let universe: HashSet<&str> = catalog.iter().map(|t| t.track_id.as_str()).collect();

    other_tracks
        .rows()
        .filter(|(track_id, _)| universe.contains(track_id))
        .map(|(track_id, row)| {
            SimilarityResult::new(track_id, cosine_similarity(row, &vector.values))
        })
        .collect()
}
