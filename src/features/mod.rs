//! Feature extraction
//!
//! Converts a match log into leakage-safe per-match form features.

pub mod chronology;
pub mod form;
pub mod perspective;
pub mod pipeline;
pub mod rejoin;

pub use form::{FormAverages, RollingForm, TeamForm, TeamFormSnapshot};
pub use perspective::TeamObservation;
pub use pipeline::{build_features, FeatureTable};
pub use rejoin::FeatureRow;
