//! Error type shared by the whole crate.

use thiserror::Error;

/// Errors raised by configuration calls.
///
/// Soft failures (duplicate registration, unknown command, clicks on cells
/// that are already open) are not errors; those calls report `false` or do
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    #[error("invalid grid dimensions {rows}x{columns}: each side must be in 2..=8 and the cell count even")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("cannot deal pairs for {0} cells: the count must be even and at least 4")]
    InvalidCellCount(usize),

    #[error("no card renderer for theme `{0}`")]
    UnknownTheme(String),

    #[error("controller `{0}` is not registered")]
    UnregisteredController(String),

    #[error("invalid player count {0} for this controller")]
    InvalidPlayerCount(usize),

    #[error("cannot parse `{0}` as ROWSxCOLUMNS")]
    InvalidDimensionsFormat(String),
}

/// Result alias for fallible operations.
pub type Result<T> = std::result::Result<T, MemoError>;
