//! List alignment: reconcile an old list against a new one.
//!
//! The aligner first builds a *simulated list*: every old position is
//! replaced by the new record now carrying its identity (free records are
//! paired positionally), or `None` when the identity vanished. It then walks
//! the new list with one cursor and the simulated list with another, emitting
//! inserts for identities that are not in place and field diffs for those
//! that are.
//!
//! The walk is greedy with a single slot of lookahead. It runs in O(n) and
//! produces a correct script, but not necessarily the shortest one.
//!
//! # Invariants
//!
//! - The simulated list is never compacted, so the simulated cursor is
//!   always an old-list position.
//! - Every old position ends up either matched to exactly one new position
//!   (in increasing new order) or in `removes`.

use listdiff_types::{Item, KeySelector, KeyValue};
use tracing::{debug, trace};

use crate::config::DiffConfig;
use crate::edit::{FieldChange, Insert, ListDiff, Modify, Remove};
use crate::key_index::KeyIndex;
use crate::object_diff::diff_fields;

/// A key selector paired with alignment settings.
#[derive(Clone, Debug)]
pub struct ListDiffer {
    key: KeySelector,
    config: DiffConfig,
}

impl ListDiffer {
    /// Create a differ with the canonical configuration.
    pub fn new(key: impl Into<KeySelector>) -> Self {
        Self {
            key: key.into(),
            config: DiffConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DiffConfig) -> Self {
        self.config = config;
        self
    }

    /// The selector identities are read with.
    pub fn key(&self) -> &KeySelector {
        &self.key
    }

    /// The active alignment settings.
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compute the edit script turning `old` into `new`.
    ///
    /// Identities must be unique within each list; with duplicates the last
    /// occurrence wins in the index and the script is unspecified.
    pub fn diff(&self, old: &[Item], new: &[Item]) -> ListDiff {
        let old_keys = self.keys_of(old);
        let new_keys = self.keys_of(new);
        let old_index = KeyIndex::from_keys(old, &old_keys);
        let new_index = KeyIndex::from_keys(new, &new_keys);

        let mut simulated = simulate(&old_keys, &new_index);
        let children = simulated
            .iter()
            .map(|slot| slot.map(|pos| new[pos].clone()))
            .collect();

        let mut script = ScriptBuilder::default();

        for (slot, target) in simulated.iter().enumerate() {
            if target.is_none() {
                script.remove(slot, &old_keys[slot]);
            }
        }

        let mut i = 0;
        let mut j = 0;
        while i < new.len() {
            let item_key = &new_keys[i];

            let Some(&slot) = simulated.get(j) else {
                script.insert(i, item_key, &new[i]);
                i += 1;
                continue;
            };
            let Some(sim_pos) = slot else {
                // Already removed; test the same new record against the next slot.
                j += 1;
                continue;
            };

            if *item_key == new_keys[sim_pos] {
                self.modify_if_changed(&mut script, new, old, i, j, item_key);
                j += 1;
            } else if !item_key.as_ref().is_some_and(|k| old_index.contains(k)) {
                script.insert(i, item_key, &new[i]);
            } else if self.config.lookahead && next_key(&simulated, &new_keys, j) == Some(item_key)
            {
                trace!(slot = j, key = ?item_key, "displaced slot");
                self.modify_if_changed(&mut script, new, old, i, j + 1, item_key);
                script.remove(j, &old_keys[j]);
                simulated[j] = None;
                j += 2;
            } else {
                script.insert(i, item_key, &new[i]);
            }

            i += 1;
        }

        if self.config.remove_tail {
            for (slot, target) in simulated.iter().enumerate().skip(j) {
                if target.is_some() {
                    script.remove(slot, &old_keys[slot]);
                }
            }
        }

        let diff = script.finish(children);
        debug!(
            old_len = old.len(),
            new_len = new.len(),
            removes = diff.removes.len(),
            inserts = diff.inserts.len(),
            changes = diff.changes.len(),
            "list diff computed"
        );
        diff
    }

    fn keys_of(&self, list: &[Item]) -> Vec<Option<KeyValue>> {
        list.iter().map(|item| self.key.key_of(item)).collect()
    }

    fn modify_if_changed(
        &self,
        script: &mut ScriptBuilder,
        new: &[Item],
        old: &[Item],
        new_index: usize,
        old_index: usize,
        key: &Option<KeyValue>,
    ) {
        if let Some(field_changes) = diff_fields(&new[new_index], &old[old_index], &self.key) {
            script.modify(new_index, old_index, key, field_changes);
        }
    }
}

/// Compute the edit script turning `old` into `new` with the canonical
/// configuration.
pub fn diff(old: &[Item], new: &[Item], key: &KeySelector) -> ListDiff {
    ListDiffer::new(key.clone()).diff(old, new)
}

/// For each old position, the new position now carrying its identity.
fn simulate(old_keys: &[Option<KeyValue>], new_index: &KeyIndex<'_>) -> Vec<Option<usize>> {
    let mut free = new_index.free.iter().map(|(pos, _)| *pos);
    old_keys
        .iter()
        .map(|key| match key {
            Some(key) => new_index.position(key),
            None => free.next(),
        })
        .collect()
}

/// Identity held by the simulated slot after `j`, if that slot is occupied.
fn next_key<'k>(
    simulated: &[Option<usize>],
    new_keys: &'k [Option<KeyValue>],
    j: usize,
) -> Option<&'k Option<KeyValue>> {
    simulated
        .get(j + 1)
        .copied()
        .flatten()
        .map(|pos| &new_keys[pos])
}

/// Accumulates the operations of one diff call.
#[derive(Default)]
struct ScriptBuilder {
    removes: Vec<Remove>,
    inserts: Vec<Insert>,
    changes: Vec<Modify>,
}

impl ScriptBuilder {
    fn remove(&mut self, index: usize, key: &Option<KeyValue>) {
        trace!(index, ?key, "remove");
        self.removes.push(Remove {
            index,
            key: key.clone(),
        });
    }

    fn insert(&mut self, index: usize, key: &Option<KeyValue>, item: &Item) {
        trace!(index, ?key, "insert");
        self.inserts.push(Insert {
            index,
            key: key.clone(),
            item: item.clone(),
        });
    }

    fn modify(
        &mut self,
        new_index: usize,
        old_index: usize,
        key: &Option<KeyValue>,
        field_changes: Vec<FieldChange>,
    ) {
        trace!(new_index, old_index, ?key, fields = field_changes.len(), "modify");
        self.changes.push(Modify {
            new_index,
            old_index,
            key: key.clone(),
            field_changes,
        });
    }

    /// Removes are emitted highest old position first, so replaying them in
    /// order never shifts a later one.
    fn finish(mut self, children: Vec<Option<Item>>) -> ListDiff {
        self.removes.sort_unstable_by(|a, b| b.index.cmp(&a.index));
        ListDiff {
            removes: self.removes,
            inserts: self.inserts,
            changes: self.changes,
            children,
        }
    }
}
