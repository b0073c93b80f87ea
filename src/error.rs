//! # Error Types
//!
//! This module defines error types used throughout the pergamino library.
//!
//! Only fatal conditions surface as errors: a render without a background
//! image, an invalid header set, a font that fails to load, or a batch row
//! that fails mid-run. Degenerate measurements, overflowing text and
//! unresolved placeholders are handled in place and never abort a batch.

use thiserror::Error;

/// Main error type for pergamino operations
#[derive(Debug, Error)]
pub enum PergaminoError {
    /// A render was attempted before a background image was set
    #[error("no background image has been set")]
    MissingBackground,

    /// Header validation failure (duplicate or malformed column name)
    #[error("invalid header set: {0}")]
    InvalidHeaders(String),

    /// Font data could not be parsed or loaded
    #[error("font error: {0}")]
    Font(String),

    /// A batch render failed at a specific row; the batch stops here
    #[error("batch render failed at row {index}: {source}")]
    Batch {
        index: usize,
        #[source]
        source: Box<PergaminoError>,
    },

    /// Image processing error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
