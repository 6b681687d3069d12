//! Unified error types for fleet-tools.
//!
//! Per-record malformations (bad dates, non-numeric mileage) are recovered
//! locally and never surface here; only conditions that make a whole
//! computation pass impossible become errors.

use thiserror::Error;

/// Main error type for fleet-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FleetError {
    /// A required input collection was not supplied at all.
    ///
    /// Aggregation without a service history or without a vehicle identity
    /// table cannot produce a meaningful result; the caller must not receive
    /// a silently empty fleet.
    #[error("Missing required input: {collection}")]
    MissingInput { collection: &'static str },

    /// Errors while loading tabular input into the data model
    #[error("Failed to ingest {context}: {source}")]
    Ingest {
        context: String,
        #[source]
        source: IngestErrorKind,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific ingestion error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IngestErrorKind {
    #[error("Unknown part name: {0}")]
    UnknownPart(String),

    #[error("Unknown period type: {0}")]
    UnknownPeriodType(String),

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for fleet-tools operations
pub type Result<T> = std::result::Result<T, FleetError>;

impl FleetError {
    /// Shortcut for ingestion errors with context.
    pub fn ingest(context: impl Into<String>, source: IngestErrorKind) -> Self {
        Self::Ingest {
            context: context.into(),
            source,
        }
    }
}
