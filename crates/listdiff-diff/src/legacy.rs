//! Combined-moves script shape.
//!
//! Older callers consume a single ordered `moves` list in which removals and
//! insertions are interleaved and carry no identity. Every move is addressed
//! against the list as it stands after the previous move, so the list must
//! be replayed strictly in order.
//!
//! Differences from [`crate::align`]:
//!
//! - vanished slots are removed from the simulated list as they are found;
//! - a displaced slot is removed at the *new* cursor and the identity behind
//!   it is consumed without a field diff;
//! - field diffs are not identity-guarded;
//! - unconsumed slots are not removed at the end.
//!
//! The two shapes are not interchangeable, in particular for adjacent swaps.

use serde::{Deserialize, Serialize};

use listdiff_types::{Item, KeySelector, KeyValue};

use crate::edit::Modify;
use crate::error::{PatchError, PatchResult};
use crate::key_index::KeyIndex;
use crate::object_diff::diff_records;

/// One step of a combined-moves script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    Remove { index: usize },
    Insert { index: usize, item: Item },
}

/// Result of [`diff_moves`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesDiff {
    pub moves: Vec<Move>,
    pub changes: Vec<Modify>,
    pub children: Vec<Option<Item>>,
}

impl MovesDiff {
    /// Replay `moves` onto a copy of `old`. Field changes are not applied.
    pub fn replay_moves(&self, old: &[Item]) -> PatchResult<Vec<Item>> {
        let mut list = old.to_vec();
        for mv in &self.moves {
            match mv {
                Move::Remove { index } => {
                    if *index >= list.len() {
                        return Err(PatchError::IndexOutOfRange {
                            op: "remove",
                            index: *index,
                            len: list.len(),
                        });
                    }
                    list.remove(*index);
                }
                Move::Insert { index, item } => {
                    if *index > list.len() {
                        return Err(PatchError::IndexOutOfRange {
                            op: "insert",
                            index: *index,
                            len: list.len(),
                        });
                    }
                    list.insert(*index, item.clone());
                }
            }
        }
        Ok(list)
    }
}

/// Compute a combined-moves script turning `old` into `new`.
#[deprecated(note = "use `listdiff_diff::diff`, which reports removals and insertions separately")]
pub fn diff_moves(old: &[Item], new: &[Item], key: &KeySelector) -> MovesDiff {
    let old_keys: Vec<Option<KeyValue>> = old.iter().map(|item| key.key_of(item)).collect();
    let new_keys: Vec<Option<KeyValue>> = new.iter().map(|item| key.key_of(item)).collect();
    let old_index = KeyIndex::from_keys(old, &old_keys);
    let new_index = KeyIndex::from_keys(new, &new_keys);

    let mut free = new_index.free.iter().map(|(pos, _)| *pos);
    let children: Vec<Option<usize>> = old_keys
        .iter()
        .map(|k| match k {
            Some(k) => new_index.position(k),
            None => free.next(),
        })
        .collect();

    let mut moves = Vec::new();
    let mut changes = Vec::new();

    // (old position, new position) for every surviving slot.
    let mut simulated: Vec<(usize, usize)> = Vec::with_capacity(children.len());
    for (old_pos, slot) in children.iter().enumerate() {
        match slot {
            Some(new_pos) => simulated.push((old_pos, *new_pos)),
            None => moves.push(Move::Remove {
                index: simulated.len(),
            }),
        }
    }

    let mut j = 0;
    for (i, (item, item_key)) in new.iter().zip(&new_keys).enumerate() {
        match simulated.get(j).copied() {
            Some((old_pos, sim_pos)) if *item_key == new_keys[sim_pos] => {
                if let Some(field_changes) = diff_records(item, &old[old_pos]) {
                    changes.push(Modify {
                        new_index: i,
                        old_index: old_pos,
                        key: item_key.clone(),
                        field_changes,
                    });
                }
                j += 1;
            }
            Some(_) if item_key.as_ref().is_some_and(|k| old_index.contains(k)) => {
                let next = simulated.get(j + 1).map(|(_, pos)| &new_keys[*pos]);
                if next == Some(item_key) {
                    moves.push(Move::Remove { index: i });
                    simulated.remove(j);
                    j += 1;
                } else {
                    moves.push(Move::Insert {
                        index: i,
                        item: item.clone(),
                    });
                }
            }
            _ => moves.push(Move::Insert {
                index: i,
                item: item.clone(),
            }),
        }
    }

    MovesDiff {
        moves,
        changes,
        children: children
            .into_iter()
            .map(|slot| slot.map(|pos| new[pos].clone()))
            .collect(),
    }
}
