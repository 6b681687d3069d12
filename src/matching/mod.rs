//! Regulation-to-vehicle matching.

pub mod matcher;

pub use matcher::RegulationMatcher;
