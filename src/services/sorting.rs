//! Top-K selection over similarity results.
//!
//! Two strategies with deliberately different tie-break rules:
//!
//! - [`SortMethod::Heap`] keeps the K largest results by
//!   `(similarity, track_id)`, both descending.
//! - [`SortMethod::Merge`] stably sorts everything by similarity descending
//!   and truncates; equal similarities keep their input order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::Display;
use std::str::FromStr;

use crate::{error::RecommendError, models::SimilarityResult};

/// Number of recommendations returned by default
pub const DEFAULT_TOP_K: usize = 5;

/// Strategy used to order similarity results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMethod {
    /// Partial selection with a bounded binary heap
    #[default]
    Heap,
    /// Full stable merge sort, then truncation
    Merge,
}

impl SortMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMethod::Heap => "heap",
            SortMethod::Merge => "merge",
        }
    }
}

impl Display for SortMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortMethod {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heap" => Ok(SortMethod::Heap),
            "merge" => Ok(SortMethod::Merge),
            other => Err(RecommendError::UnknownSortMethod(other.to_string())),
        }
    }
}

/// Returns the best `k` results ordered by the chosen strategy
pub fn top_k(results: Vec<SimilarityResult>, k: usize, method: SortMethod) -> Vec<SimilarityResult> {
    match method {
        SortMethod::Heap => heap_top_k(results, k),
        SortMethod::Merge => {
            let mut sorted = merge_sort(results);
            sorted.truncate(k);
            sorted
        }
    }
}

/// Heap entry ordered by `(similarity, track_id)`
struct Ranked(SimilarityResult);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .similarity
            .total_cmp(&other.0.similarity)
            .then_with(|| self.0.track_id.cmp(&other.0.track_id))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// The `k` largest results by `(similarity, track_id)` descending.
///
/// Keeps a min-heap of at most `k` entries, so runs in O(n log k).
pub fn heap_top_k(results: Vec<SimilarityResult>, k: usize) -> Vec<SimilarityResult> {
    if k == 0 {
        return Vec::new();
    }

    // k comes from callers unchecked; size the heap by what can actually be kept
    let capacity = k.min(results.len()).saturating_add(1);
    let mut heap: BinaryHeap<Reverse<Ranked>> = BinaryHeap::with_capacity(capacity);
    for result in results {
        let candidate = Ranked(result);
        if heap.len() == k {
            match heap.peek() {
                Some(Reverse(smallest)) if candidate <= *smallest => continue,
                _ => {}
            }
        }
        heap.push(Reverse(candidate));
        if heap.len() > k {
            heap.pop();
        }
    }

    // ascending by Reverse is descending by key
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(Ranked(result))| result)
        .collect()
}

/// Stable sort of all results by similarity descending
pub fn merge_sort(results: Vec<SimilarityResult>) -> Vec<SimilarityResult> {
    merge_sort_by(results, |left, right| left.similarity >= right.similarity)
}

/// Stable bottom-up merge sort.
///
/// `take_left(l, r)` decides whether the front of the left run goes first;
/// returning true on ties keeps the sort stable. Runs of width 1, 2, 4, ...
/// are merged pairwise left to right, so no recursion is involved.
pub fn merge_sort_by<T, F>(items: Vec<T>, take_left: F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    if items.len() < 2 {
        return items;
    }

    let mut runs: Vec<Vec<T>> = items.into_iter().map(|item| vec![item]).collect();
    while runs.len() > 1 {
        let mut merged = Vec::with_capacity(runs.len().div_ceil(2));
        let mut pending = runs.into_iter();
        while let Some(left) = pending.next() {
            match pending.next() {
                Some(right) => merged.push(merge(left, right, &take_left)),
                None => merged.push(left),
            }
        }
        runs = merged;
    }

    runs.pop().unwrap_or_default()
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, take_left: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let from_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => take_left(l, r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if from_left { left.next() } else { right.next() };
        out.extend(next);
    }

    out
}
