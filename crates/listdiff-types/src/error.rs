use thiserror::Error;

/// Errors produced when converting untyped JSON into records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("expected a JSON array of records, got {found}")]
    NotAnArray { found: &'static str },

    #[error("expected a JSON object at index {index}, got {found}")]
    NotAnObject { index: usize, found: &'static str },
}
