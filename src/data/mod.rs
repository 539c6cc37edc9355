//! Data loading and export
//!
//! CSV match logs in, CSV feature tables out.

pub mod export;
pub mod matches;
pub mod summary;

pub use export::{write_features, write_features_to};
pub use matches::{load_seasons, read_matches, read_matches_from};
pub use summary::DatasetSummary;
