use std::collections::{HashMap, HashSet};

/// A group of feature columns produced by one encoder or scaler.
///
/// Row-major: `rows[i][j]` is the value of `columns[j]` for row `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBlock {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureBlock {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Feature rows for one track collection, keyed by track id.
///
/// All rows share the schema in `columns`; row order is the order of the
/// source collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    track_ids: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureTable {
    /// Concatenates blocks column-wise and attaches the track id column.
    ///
    /// Every block must have one row per track id.
    pub fn from_blocks(track_ids: Vec<String>, blocks: Vec<FeatureBlock>) -> Self {
        let mut columns = Vec::new();
        let mut rows: Vec<Vec<f64>> = vec![Vec::new(); track_ids.len()];

        for block in blocks {
            debug_assert_eq!(block.row_count(), track_ids.len());
            columns.extend(block.columns);
            for (row, values) in rows.iter_mut().zip(block.rows) {
                row.extend(values);
            }
        }

        Self {
            track_ids,
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn track_ids(&self) -> &[String] {
        &self.track_ids
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.track_ids
            .iter()
            .map(String::as_str)
            .zip(self.rows.iter().map(Vec::as_slice))
    }

    /// Feature row of a track as a column-name → value mapping
    pub fn row_by_id(&self, track_id: &str) -> Option<HashMap<&str, f64>> {
        let index = self.track_ids.iter().position(|id| id == track_id)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(self.rows[index].iter().copied())
                .collect(),
        )
    }

    /// Appends a zero-filled column for every column of `other` this table lacks.
    ///
    /// Existing columns keep their position; new columns follow in the order
    /// they appear in `other`.
    pub fn expand_with(&mut self, other: &[String]) {
        let known: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        let missing: Vec<String> = other
            .iter()
            .filter(|column| !known.contains(column.as_str()))
            .cloned()
            .collect();

        if missing.is_empty() {
            return;
        }

        for row in &mut self.rows {
            row.resize(row.len() + missing.len(), 0.0);
        }
        self.columns.extend(missing);
    }

    /// Keeps only the rows whose track id satisfies `keep`
    pub fn retain_tracks<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        let mut kept_ids = Vec::with_capacity(self.track_ids.len());
        let mut kept_rows = Vec::with_capacity(self.rows.len());
        for (id, row) in self.track_ids.drain(..).zip(self.rows.drain(..)) {
            if keep(&id) {
                kept_ids.push(id);
                kept_rows.push(row);
            }
        }
        self.track_ids = kept_ids;
        self.rows = kept_rows;
    }

    /// Column-wise sum over every row
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.columns.len()];
        for row in &self.rows {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }
}

/// The single representative feature row of a playlist
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistVector {
    pub columns: Vec<String>,
    pub values: Vec<f64>,
}

impl PlaylistVector {
    /// Rearranges the vector to follow `order`; absent columns become 0
    pub fn reorder(&self, order: &[String]) -> PlaylistVector {
        let index: HashMap<&str, f64> = self
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
            .collect();

        PlaylistVector {
            columns: order.to_vec(),
            values: order
                .iter()
                .map(|column| index.get(column.as_str()).copied().unwrap_or(0.0))
                .collect(),
        }
    }
}
