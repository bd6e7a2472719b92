//! Error types for the rich-text pipeline.
//!
//! Parsing, resolving and embedding are total and never fail. The variants
//! here cover the edges that take values from outside the pipeline:
//! hand-built colour strings, host configuration, and the window actor.

use thiserror::Error;

/// Convenience type alias for Results using [`FormatError`].
pub type Result<T, E = FormatError> = std::result::Result<T, E>;

/// Errors raised at the boundaries of the formatting pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
    /// A hex colour was not exactly six hexadecimal digits.
    #[error("invalid hex color: {0:?}")]
    InvalidHexColor(String),

    /// An image extension in the configuration is unusable.
    #[error("invalid image extension: {0:?}")]
    InvalidExtension(String),

    /// The window actor has stopped and can no longer accept work.
    #[error("window closed")]
    WindowClosed,
}
