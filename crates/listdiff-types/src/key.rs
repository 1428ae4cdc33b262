use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::item::Item;

/// Normalized identity of a record.
///
/// A `KeyValue` only exists for *truthy* selected values. `null`, `false`,
/// numeric zero, the empty string, and absent fields all mean "no identity",
/// so `0` is never a key. Numbers are keyed by value (`1` and `1.0` are the
/// same identity) but never equal a string, so `1` and `"1"` are distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KeyValue {
    /// Only `true` can appear here.
    Bool(bool),
    /// A non-zero number, stored as its JSON text; integral floats use the
    /// integer text.
    Number(String),
    /// A non-empty string.
    Text(String),
    /// An array or object, stored as its compact JSON text.
    Composite(String),
}

impl KeyValue {
    /// Normalize a selected value into an identity, or `None` when the value
    /// is falsy.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Bool(true) => Some(Self::Bool(true)),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f == 0.0 => None,
                Some(f) if n.is_f64() && is_integral(f) => {
                    Some(Self::Number((f as i64).to_string()))
                }
                _ => Some(Self::Number(n.to_string())),
            },
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Composite(value.to_string())),
        }
    }
}

/// Integral floats inside the `i64` range key the same as the integer.
fn is_integral(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(s) | Self::Text(s) | Self::Composite(s) => f.write_str(s),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for KeyValue {
    fn from(n: i64) -> Self {
        Self::Number(n.to_string())
    }
}

type KeyFn = dyn Fn(&Item) -> Value + Send + Sync;

/// How the identity of a record is read.
///
/// Either a field name (the identity is that field's value) or a pure
/// function over the whole record. Both paths go through
/// [`KeyValue::from_value`], so the falsy rule applies uniformly.
#[derive(Clone)]
pub enum KeySelector {
    /// Identity is the value of the named field. An empty name selects
    /// nothing, making every record free.
    Field(String),
    /// Identity is computed from the record.
    Func(Arc<KeyFn>),
}

impl KeySelector {
    /// Select identities by field name.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Select identities with a function.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Item) -> Value + Send + Sync + 'static,
    {
        Self::Func(Arc::new(f))
    }

    /// The field this selector reads, if it is a field selector.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field(name) => Some(name.as_str()),
            Self::Func(_) => None,
        }
    }

    /// The identity of `item`, or `None` when it has none.
    pub fn key_of(&self, item: &Item) -> Option<KeyValue> {
        match self {
            Self::Field(name) if name.is_empty() => None,
            Self::Field(name) => item.get(name).and_then(KeyValue::from_value),
            Self::Func(f) => KeyValue::from_value(&f(item)),
        }
    }
}

impl fmt::Debug for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl From<&str> for KeySelector {
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

impl From<String> for KeySelector {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn falsy_values_have_no_identity() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!(-0.0), json!("")] {
            assert_eq!(KeyValue::from_value(&v), None, "{v} should be falsy");
        }
    }

    #[test]
    fn truthy_scalars_become_keys() {
        assert_eq!(KeyValue::from_value(&json!("a")), Some(KeyValue::from("a")));
        assert_eq!(KeyValue::from_value(&json!(7)), Some(KeyValue::from(7_i64)));
        assert_eq!(KeyValue::from_value(&json!(-3)), Some(KeyValue::from(-3_i64)));
        assert_eq!(KeyValue::from_value(&json!(true)), Some(KeyValue::Bool(true)));
    }

    #[test]
    fn number_and_string_keys_are_distinct() {
        let n = KeyValue::from_value(&json!(1)).unwrap();
        let s = KeyValue::from_value(&json!("1")).unwrap();
        assert_ne!(n, s);
        assert_eq!(n.to_string(), s.to_string());
    }

    #[test]
    fn integral_floats_key_like_integers() {
        let int = KeyValue::from_value(&json!(1)).unwrap();
        assert_eq!(KeyValue::from_value(&json!(1.0)), Some(int));
        assert_eq!(
            KeyValue::from_value(&json!(-42.0)),
            Some(KeyValue::from(-42_i64))
        );
        assert_eq!(
            KeyValue::from_value(&json!(1.5)),
            Some(KeyValue::Number("1.5".to_string()))
        );
    }

    #[test]
    fn composite_values_are_keys() {
        let k = KeyValue::from_value(&json!([1, 2])).unwrap();
        assert_eq!(k, KeyValue::Composite("[1,2]".to_string()));
        assert!(KeyValue::from_value(&json!({})).is_some());
    }

    #[test]
    fn field_selector_reads_field() {
        let sel = KeySelector::from("id");
        assert_eq!(sel.key_of(&item(json!({"id": 5}))), Some(KeyValue::from(5_i64)));
        assert_eq!(sel.key_of(&item(json!({"name": "x"}))), None);
        assert_eq!(sel.key_of(&item(json!({"id": 0}))), None);
        assert_eq!(sel.field_name(), Some("id"));
    }

    #[test]
    fn empty_field_name_selects_nothing() {
        let sel = KeySelector::field("");
        assert_eq!(sel.key_of(&item(json!({"": "x", "id": 1}))), None);
    }

    #[test]
    fn func_selector_applies_falsy_rule() {
        let sel = KeySelector::func(|it: &Item| {
            it.get("name").cloned().unwrap_or(Value::Null)
        });
        assert_eq!(
            sel.key_of(&item(json!({"name": "ann"}))),
            Some(KeyValue::from("ann"))
        );
        assert_eq!(sel.key_of(&item(json!({"name": ""}))), None);
        assert_eq!(sel.field_name(), None);
        assert_eq!(format!("{sel:?}"), "Func(..)");
    }

    #[test]
    fn serde_is_tagged() {
        let json = serde_json::to_value(KeyValue::from(2_i64)).unwrap();
        assert_eq!(json, json!({"kind": "number", "value": "2"}));
        let back: KeyValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, KeyValue::from(2_i64));
    }

    proptest! {
        #[test]
        fn non_empty_strings_are_keys(s in ".+") {
            prop_assert_eq!(
                KeyValue::from_value(&Value::String(s.clone())),
                Some(KeyValue::Text(s))
            );
        }

        #[test]
        fn integer_keys_match_from_i64(n in any::<i64>().prop_filter("non-zero", |n| *n != 0)) {
            prop_assert_eq!(KeyValue::from_value(&json!(n)), Some(KeyValue::from(n)));
        }
    }
}
