use crate::models::FeatureBlock;

/// Min-max scales a column into [0, 1].
///
/// A constant column (max == min) scales to exactly 0 for every row.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= 0.0 {
        return vec![0.0; values.len()];
    }

    values
        .iter()
        .map(|v| ((v - min) / range).clamp(0.0, 1.0))
        .collect()
}

/// Scales each named column independently and multiplies by `weight`.
///
/// `columns` holds `(name, per-row values)`; all columns must have the same
/// number of rows.
pub fn scale_columns(columns: &[(&str, Vec<f64>)], weight: f64) -> FeatureBlock {
    let row_count = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
    let scaled: Vec<Vec<f64>> = columns
        .iter()
        .map(|(_, values)| {
            debug_assert_eq!(values.len(), row_count);
            min_max_scale(values)
        })
        .collect();

    let rows = (0..row_count)
        .map(|row| scaled.iter().map(|column| column[row] * weight).collect())
        .collect();

    FeatureBlock::new(
        columns.iter().map(|(name, _)| name.to_string()).collect(),
        rows,
    )
}
