//! Error types for applying edit scripts.
//!
//! Computing a diff never fails; only replaying a script onto a list can.

/// Errors that can occur while applying an edit script.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// An operation addressed a position outside the current list.
    #[error("{op} index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        op: &'static str,
        index: usize,
        len: usize,
    },

    /// The same old position was scheduled for removal twice.
    #[error("duplicate remove at index {0}")]
    DuplicateRemove(usize),

    /// A field change expected a field the record does not have.
    #[error("record has no field {field:?}")]
    MissingField { field: String },
}

/// Convenience alias for patch results.
pub type PatchResult<T> = Result<T, PatchError>;
