//! Reference applier for edit scripts.
//!
//! Replays a [`ListDiff`] onto a copy of the old list: removes from the
//! highest old index down, inserts at ascending final positions, then field
//! changes addressed by final position.

use listdiff_types::Item;
use tracing::debug;

use crate::edit::{FieldChange, ListDiff};
use crate::error::{PatchError, PatchResult};

/// Apply `diff` to `old`, returning the reconstructed new list.
pub fn apply(old: &[Item], diff: &ListDiff) -> PatchResult<Vec<Item>> {
    let mut list = old.to_vec();

    let mut removes: Vec<usize> = diff.removes.iter().map(|r| r.index).collect();
    removes.sort_unstable_by(|a, b| b.cmp(a));
    let mut last = None;
    for index in removes {
        if last == Some(index) {
            return Err(PatchError::DuplicateRemove(index));
        }
        if index >= list.len() {
            return Err(PatchError::IndexOutOfRange {
                op: "remove",
                index,
                len: list.len(),
            });
        }
        list.remove(index);
        last = Some(index);
    }

    let mut inserts: Vec<_> = diff.inserts.iter().collect();
    inserts.sort_by_key(|ins| ins.index);
    for ins in inserts {
        if ins.index > list.len() {
            return Err(PatchError::IndexOutOfRange {
                op: "insert",
                index: ins.index,
                len: list.len(),
            });
        }
        list.insert(ins.index, ins.item.clone());
    }

    for change in &diff.changes {
        let len = list.len();
        let target = list
            .get_mut(change.new_index)
            .ok_or(PatchError::IndexOutOfRange {
                op: "modify",
                index: change.new_index,
                len,
            })?;
        apply_field_changes(target, &change.field_changes)?;
    }

    debug!(
        removes = diff.removes.len(),
        inserts = diff.inserts.len(),
        changes = diff.changes.len(),
        len = list.len(),
        "edit script applied"
    );
    Ok(list)
}

/// Apply one record's field changes in place.
pub fn apply_field_changes(item: &mut Item, changes: &[FieldChange]) -> PatchResult<()> {
    for change in changes {
        match change {
            FieldChange::Added { key, new_val } => {
                item.insert(key.clone(), new_val.clone());
            }
            FieldChange::Modified { key, new_val, .. } => match item.get_mut(key) {
                Some(slot) => *slot = new_val.clone(),
                None => return Err(PatchError::MissingField { field: key.clone() }),
            },
            FieldChange::Removed { key, .. } => {
                if item.remove(key).is_none() {
                    return Err(PatchError::MissingField { field: key.clone() });
                }
            }
        }
    }
    Ok(())
}
