pub mod catalog;
pub mod encoding;
pub mod features;
pub mod lookup;
pub mod recommender;
pub mod scaling;
pub mod sentiment;
pub mod similarity;
pub mod sorting;
pub mod vectorizer;

pub use catalog::Catalog;
pub use lookup::{CatalogLookup, TrackLookup};
pub use recommender::Recommender;
pub use sorting::SortMethod;
