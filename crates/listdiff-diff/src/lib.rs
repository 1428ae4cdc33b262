//! Keyed list reconciliation.
//!
//! Given an old and a new list of records that share a notion of identity,
//! computes an edit script (removals, insertions, and field-level
//! modifications) that turns the old list into the new one in a single
//! linear pass. Records whose identity survives are reused and only their
//! changed fields are reported.
//!
//! # Key Types
//!
//! - [`ListDiff`] / [`Remove`] / [`Insert`] / [`Modify`] -- The edit script
//! - [`FieldChange`] -- Field-level change inside a [`Modify`]
//! - [`KeyIndex`] -- Per-list identity index and free (unkeyed) items
//! - [`ListDiffer`] / [`DiffConfig`] -- Configured entry point
//!
//! # Applying a script
//!
//! Apply `removes`, then `inserts`, then `changes`. Remove indices address
//! the old list and are applied from the highest index down; insert indices
//! are final positions applied in ascending order; `Modify::new_index`
//! addresses the final list. [`apply`] implements exactly this contract.

pub mod align;
pub mod config;
pub mod edit;
pub mod error;
pub mod key_index;
pub mod legacy;
pub mod object_diff;
pub mod patch;

pub use align::{diff, ListDiffer};
pub use config::DiffConfig;
pub use edit::{FieldChange, Insert, ListDiff, Modify, Remove};
pub use error::{PatchError, PatchResult};
pub use key_index::{index_by_key, KeyIndex};
pub use object_diff::{diff_fields, diff_records};
pub use patch::{apply, apply_field_changes};

pub use listdiff_types::{Item, KeySelector, KeyValue};
