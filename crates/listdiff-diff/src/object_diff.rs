//! Field-level diff of two versions of one record.
//!
//! Additions and modifications are reported while walking the new record,
//! removals while walking the old one, both in field insertion order.

use listdiff_types::{Item, KeySelector};
use tracing::trace;

use crate::edit::FieldChange;

/// Diff two versions of the same record.
///
/// Returns `None` when the records' identities differ (one keyed and the
/// other not counts as different), so two unrelated records are never
/// compared. Two records without identity are a positional pair and are
/// compared. Also returns `None` when nothing changed.
pub fn diff_fields(new: &Item, old: &Item, key: &KeySelector) -> Option<Vec<FieldChange>> {
    let new_key = key.key_of(new);
    let old_key = key.key_of(old);
    if new_key != old_key {
        trace!(?new_key, ?old_key, "identity mismatch, skipping field diff");
        return None;
    }
    diff_records(new, old)
}

/// Diff two records without checking identity.
///
/// Returns `None` when nothing changed, never an empty list.
pub fn diff_records(new: &Item, old: &Item) -> Option<Vec<FieldChange>> {
    let mut changes = Vec::new();

    for (key, new_val) in new {
        match old.get(key) {
            Some(old_val) => {
                if old_val != new_val {
                    changes.push(FieldChange::Modified {
                        key: key.clone(),
                        new_val: new_val.clone(),
                        old_val: old_val.clone(),
                    });
                }
            }
            None => {
                changes.push(FieldChange::Added {
                    key: key.clone(),
                    new_val: new_val.clone(),
                });
            }
        }
    }

    for (key, old_val) in old {
        if !new.contains_key(key) {
            changes.push(FieldChange::Removed {
                key: key.clone(),
                old_val: old_val.clone(),
            });
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn item(value: Value) -> Item {
        listdiff_types::item_from_value(0, value).unwrap()
    }

    fn id() -> KeySelector {
        KeySelector::from("id")
    }

    #[test]
    fn identical_records_no_diff() {
        let a = item(json!({"id": 1, "v": "x", "n": [1, 2]}));
        assert_eq!(diff_fields(&a, &a, &id()), None);
    }

    #[test]
    fn single_field_modification() {
        let old = item(json!({"id": 1, "v": "a"}));
        let new = item(json!({"id": 1, "v": "b"}));

        let changes = diff_fields(&new, &old, &id()).unwrap();
        assert_eq!(
            changes,
            vec![FieldChange::Modified {
                key: "v".into(),
                new_val: json!("b"),
                old_val: json!("a"),
            }]
        );
    }

    #[test]
    fn order_follows_new_then_old() {
        let old = item(json!({"id": 1, "gone": true, "keep": 1, "also_gone": 2}));
        let new = item(json!({"id": 1, "added": "x", "keep": 2, "added_2": null}));

        let changes = diff_fields(&new, &old, &id()).unwrap();
        let keys: Vec<&str> = changes.iter().map(FieldChange::key).collect();
        assert_eq!(keys, vec!["added", "keep", "added_2", "gone", "also_gone"]);
        assert!(matches!(changes[0], FieldChange::Added { .. }));
        assert!(matches!(changes[1], FieldChange::Modified { .. }));
        assert!(matches!(changes[3], FieldChange::Removed { .. }));
    }

    #[test]
    fn different_identity_is_refused() {
        let old = item(json!({"id": 1, "v": "same"}));
        let new = item(json!({"id": 2, "v": "same"}));
        assert_eq!(diff_fields(&new, &old, &id()), None);

        let changed = item(json!({"id": 2, "v": "other"}));
        assert_eq!(diff_fields(&changed, &old, &id()), None);
    }

    #[test]
    fn keyed_against_unkeyed_is_refused() {
        let old = item(json!({"v": 1}));
        let new = item(json!({"id": 1, "v": 2}));
        assert_eq!(diff_fields(&new, &old, &id()), None);
        assert!(diff_records(&new, &old).is_some());
    }

    #[test]
    fn unkeyed_pair_is_compared() {
        let old = item(json!({"v": 1}));
        let new = item(json!({"v": 2}));
        let changes = diff_fields(&new, &old, &id()).unwrap();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn nested_values_compare_by_value() {
        let old = item(json!({"id": 1, "cfg": {"debug": false}}));
        let same = item(json!({"id": 1, "cfg": {"debug": false}}));
        let new = item(json!({"id": 1, "cfg": {"debug": true}}));
        assert_eq!(diff_fields(&same, &old, &id()), None);
        assert_eq!(diff_fields(&new, &old, &id()).map(|c| c.len()), Some(1));
    }

    #[test]
    fn type_change_detected() {
        let old = item(json!({"id": 1, "value": 42}));
        let new = item(json!({"id": 1, "value": "forty-two"}));
        let changes = diff_fields(&new, &old, &id()).unwrap();
        assert!(matches!(&changes[0], FieldChange::Modified { key, .. } if key == "value"));
    }
}
