//! Error Module - Heap Error Types
//!
//! Defines all error types returned by heap operations.

use thiserror::Error;

use crate::block::MAX_NAME_LEN;

/// Main error type for all heap operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeapError {
    #[error("name '{0}' exceeds the {MAX_NAME_LEN} character limit")]
    NameTooLong(String),

    #[error("a used block named '{0}' already exists")]
    DuplicateName(String),

    #[error("requested size must be at least 1")]
    InvalidSize,

    #[error("no free block large enough, even after running the collector")]
    OutOfMemory,

    #[error("no used block named '{0}' found")]
    NotFound(String),
}

/// Result type alias for heap operations.
pub type Result<T> = std::result::Result<T, HeapError>;

/// Non-fatal outcomes of reference-graph edits.
///
/// These are reported to the caller through the success path of
/// `add_reference`/`remove_reference` rather than propagated as a
/// [`HeapError`] — an edge that already exists or is already absent is not a
/// failure, just a no-op worth telling the caller about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The edge was freshly created.
    Added,
    /// `to_name` already appeared in `from_name`'s references; left as-is.
    AlreadyExists,
    /// The edge was removed.
    Removed,
    /// The edge was not present; nothing to remove.
    Absent,
}
