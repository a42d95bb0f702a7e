use std::sync::Arc;

use crate::services::{lookup::TrackLookup, recommender::Recommender, sorting::SortMethod};

/// Shared application state
///
/// The catalog behind the recommender is immutable, so the state is shared
/// across requests without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub lookup: Arc<dyn TrackLookup>,
    /// Used when a request does not name a sort method
    pub default_sort_method: SortMethod,
    /// Used when a request does not set a limit
    pub recommendation_limit: usize,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>, lookup: Arc<dyn TrackLookup>) -> Self {
        Self {
            recommender,
            lookup,
            default_sort_method: SortMethod::default(),
            recommendation_limit: crate::services::sorting::DEFAULT_TOP_K,
        }
    }

    pub fn with_defaults(mut self, sort_method: SortMethod, limit: usize) -> Self {
        self.default_sort_method = sort_method;
        self.recommendation_limit = limit;
        self
    }
}
