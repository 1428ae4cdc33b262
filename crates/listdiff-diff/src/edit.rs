//! Edit script types produced by the list aligner.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use listdiff_types::{Item, KeyValue};

/// A single field-level change between two versions of a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldChange {
    /// The field exists only in the new record.
    Added { key: String, new_val: Value },
    /// The field exists only in the old record.
    Removed { key: String, old_val: Value },
    /// The field exists in both with different values.
    Modified {
        key: String,
        new_val: Value,
        old_val: Value,
    },
}

impl FieldChange {
    /// The name of the changed field.
    pub fn key(&self) -> &str {
        match self {
            Self::Added { key, .. } | Self::Removed { key, .. } | Self::Modified { key, .. } => {
                key
            }
        }
    }
}

/// Remove the record at `index` of the old list.
///
/// `index` is an old-list position, not a position in a partially patched
/// list. Scripts from the aligner list removes highest index first, so
/// replaying them in order keeps every index valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remove {
    pub index: usize,
    pub key: Option<KeyValue>,
}

/// Insert `item` so that it ends up at `index` of the new list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insert {
    pub index: usize,
    pub key: Option<KeyValue>,
    pub item: Item,
}

/// Field changes for a record kept across versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modify {
    /// Position of the record in the new list.
    pub new_index: usize,
    /// Position of the record in the old list.
    pub old_index: usize,
    pub key: Option<KeyValue>,
    /// Never empty.
    pub field_changes: Vec<FieldChange>,
}

impl Modify {
    /// Number of added fields.
    pub fn additions(&self) -> usize {
        self.field_changes
            .iter()
            .filter(|c| matches!(c, FieldChange::Added { .. }))
            .count()
    }

    /// Number of removed fields.
    pub fn removals(&self) -> usize {
        self.field_changes
            .iter()
            .filter(|c| matches!(c, FieldChange::Removed { .. }))
            .count()
    }

    /// Number of modified fields.
    pub fn modifications(&self) -> usize {
        self.field_changes
            .iter()
            .filter(|c| matches!(c, FieldChange::Modified { .. }))
            .count()
    }
}

/// The result of reconciling two lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDiff {
    pub removes: Vec<Remove>,
    pub inserts: Vec<Insert>,
    pub changes: Vec<Modify>,
    /// The simulated list: for each old position, the new record that now
    /// carries its identity, or `None` when the identity vanished.
    pub children: Vec<Option<Item>>,
}

impl ListDiff {
    /// Returns `true` if the script contains no operations.
    pub fn is_empty(&self) -> bool {
        self.removes.is_empty() && self.inserts.is_empty() && self.changes.is_empty()
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.removes.len() + self.inserts.len() + self.changes.len()
    }
}
