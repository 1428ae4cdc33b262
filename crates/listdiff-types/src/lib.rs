//! Foundation types for listdiff.
//!
//! This crate provides the record and identity types shared by the diff
//! engine and its callers.
//!
//! # Key Types
//!
//! - [`Item`] — An ordered record (field name to JSON value)
//! - [`KeyValue`] — Normalized, hashable identity derived from a record
//! - [`KeySelector`] — How an identity is read from a record (field or function)
//! - [`TypeError`] — Conversion failures for untyped JSON input

pub mod error;
pub mod item;
pub mod key;

pub use error::TypeError;
pub use item::{item_from_value, items_from_value, Item};
pub use key::{KeySelector, KeyValue};
