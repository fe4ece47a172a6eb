//! Error types for the layout engine

use thiserror::Error;

/// Layout configuration errors
///
/// These are programmer errors in template construction, not data errors.
/// A rejected spec never produces partial output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Column widths exceed the printable line width
    #[error("column widths total {total} cells, line holds {limit}")]
    WidthOverflow { total: usize, limit: usize },

    /// Leftover width cannot be split evenly across the inter-column gaps
    #[error("leftover width {leftover} does not divide across {gaps} gaps")]
    UnevenGap { leftover: usize, gaps: usize },

    /// Row rendered with the wrong number of parts
    #[error("row expects {expected} parts, got {got}")]
    PartCount { expected: usize, got: usize },
}

/// Result type for layout operations
pub type FormatResult<T> = Result<T, FormatError>;
