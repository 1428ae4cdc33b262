//! Per-list identity index.
//!
//! One scan splits a list into keyed records (indexed by identity) and free
//! records (no identity, kept in order for positional matching).

use std::collections::HashMap;

use listdiff_types::{Item, KeySelector, KeyValue};

/// Identity index of a single list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyIndex<'a> {
    /// Identity to position. With duplicate identities the last position wins.
    pub key_index: HashMap<KeyValue, usize>,
    /// Records without identity as `(position, record)`, in list order.
    pub free: Vec<(usize, &'a Item)>,
}

impl<'a> KeyIndex<'a> {
    /// Position of the record carrying `key`.
    pub fn position(&self, key: &KeyValue) -> Option<usize> {
        self.key_index.get(key).copied()
    }

    /// Returns `true` if some record carries `key`.
    pub fn contains(&self, key: &KeyValue) -> bool {
        self.key_index.contains_key(key)
    }

    /// Build from precomputed identities (`keys[i]` belongs to `list[i]`).
    pub(crate) fn from_keys(list: &'a [Item], keys: &[Option<KeyValue>]) -> Self {
        let mut index = Self::default();
        for (position, (item, key)) in list.iter().zip(keys).enumerate() {
            match key {
                Some(key) => {
                    index.key_index.insert(key.clone(), position);
                }
                None => index.free.push((position, item)),
            }
        }
        index
    }
}

/// Index `list` by the identities `key` selects.
pub fn index_by_key<'a>(list: &'a [Item], key: &KeySelector) -> KeyIndex<'a> {
    let keys: Vec<Option<KeyValue>> = list.iter().map(|item| key.key_of(item)).collect();
    KeyIndex::from_keys(list, &keys)
}
