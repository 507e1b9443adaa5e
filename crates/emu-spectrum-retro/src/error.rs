//! Error types.

use thiserror::Error;

/// Save-state failures. Nothing is written to the caller's buffer when one
/// of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("data size is not enough for snapshot: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    #[error("snapshot size {encoded} is larger than fixed size {capacity}")]
    ExceedsFixedSize { encoded: usize, capacity: usize },
    #[error("no machine selected")]
    NoMachine,
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Why a cheat directive was rejected. Rejection stops the rest of the
/// text; directives before it stay applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("unknown directive marker {0:?}")]
    UnknownMarker(char),
    #[error("empty directive")]
    Empty,
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("{field} is not a decimal number")]
    BadNumber { field: &'static str },
    #[error("value {0} does not fit in a byte")]
    ValueOutOfRange(u32),
    #[error("RAM bank {0} does not exist")]
    NoSuchBank(u32),
}

/// Frontend-level failures.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("RGB565 is not supported")]
    PixelFormat,
    #[error("core init failed: {0}")]
    CoreInit(String),
    #[error("could not open content: {0}")]
    Content(String),
    #[error("no content loaded")]
    NoContent,
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("option store error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("capture error: {0}")]
    Capture(String),
}

pub type Result<T> = std::result::Result<T, FrontendError>;
