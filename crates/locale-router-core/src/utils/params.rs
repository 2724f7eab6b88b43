//! An insertion-ordered parameter mapping.
//!
//! [`Params`] carries route parameters and query-string values. Keys are
//! unique; values are either a single string or a list of strings
//! ([`ParamValue`]). Iteration follows insertion order, and overwriting a key
//! keeps its original position, so generated query strings are stable.

use std::borrow::Cow;
use std::fmt;
use std::slice;
use std::vec;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single parameter value.
///
/// Catch-all path segments and repeated query keys produce
/// [`ParamValue::Many`]; everything else is [`ParamValue::One`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single string value.
    One(String),
    /// An ordered list of values.
    Many(Vec<String>),
}

impl ParamValue {
    /// Returns the value if this is a single string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    /// Returns the values as a slice. A single value is a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::One(s) => slice::from_ref(s),
            Self::Many(values) => values,
        }
    }

    /// Returns `true` for [`ParamValue::Many`].
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    /// Joins a list with `sep`; a single value is returned as-is.
    pub fn joined(&self, sep: &str) -> Cow<'_, str> {
        match self {
            Self::One(s) => Cow::Borrowed(s),
            Self::Many(values) => Cow::Owned(values.join(sep)),
        }
    }

    /// Adds another value, turning a single value into a list.
    fn push(&mut self, value: String) {
        match self {
            Self::One(existing) => {
                let first = std::mem::take(existing);
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(values) => values.push(value),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined("/"))
    }
}

impl PartialEq<str> for ParamValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for ParamValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::One(value.clone())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.into_iter().map(String::from).collect())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::One(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize);

/// An insertion-ordered map from parameter names to [`ParamValue`]s.
///
/// # Examples
///
/// ```
/// use locale_router_core::utils::{ParamValue, Params};
///
/// let mut params = Params::new();
/// params.insert("b", "b");
/// params.insert("c", vec!["1", "2"]);
/// params.insert("b", "x");
///
/// let keys: Vec<&str> = params.keys().collect();
/// assert_eq!(keys, ["b", "c"]);
/// assert_eq!(params.get("b"), Some(&ParamValue::from("x")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Creates an empty `Params`.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the value for `key`, or `None` if the key is not present.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Returns the value for `key` if it is a single string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParamValue::as_str)
    }

    /// Sets the value for `key`, returning the previous value.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Appends a value for `key`. A repeated key collects its values into a list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1.push(value);
        } else {
            self.entries.push((key, ParamValue::One(value)));
        }
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Overwrites entries in `self` with every entry of `other`.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map contains no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = Params;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of strings or string lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Params, A::Error> {
                let mut params = Params::new();
                while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
                    params.insert(key, value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let p = Params::new();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let mut p = Params::new();
        assert!(p.insert("key", "value").is_none());
        assert_eq!(p.get_str("key"), Some("value"));
        assert!(p.contains_key("key"));
        assert!(!p.contains_key("other"));
    }

    #[test]
    fn test_insert_overwrite_keeps_position() {
        let mut p = Params::from([("a", "1"), ("b", "2"), ("c", "3")]);
        let previous = p.insert("a", "9");
        assert_eq!(previous, Some(ParamValue::from("1")));
        let keys: Vec<_> = p.keys().collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(p.get_str("a"), Some("9"));
    }

    #[test]
    fn test_append_collects_list() {
        let mut p = Params::new();
        p.append("color", "red");
        assert_eq!(p.get("color"), Some(&ParamValue::from("red")));
        p.append("color", "blue");
        p.append("color", "green");
        assert_eq!(
            p.get("color"),
            Some(&ParamValue::from(vec!["red", "blue", "green"]))
        );
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut p = Params::from([("a", "1"), ("b", "2")]);
        assert_eq!(p.remove("a"), Some(ParamValue::from("1")));
        assert_eq!(p.remove("a"), None);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_merge_overwrites() {
        let mut query = Params::from([("b", "x"), ("c", "c")]);
        query.merge(Params::from([("b", "b"), ("d", "d")]));
        let items: Vec<_> = query.iter().map(|(k, v)| (k, v.to_string())).collect();
        assert_eq!(
            items,
            [
                ("b", "b".to_string()),
                ("c", "c".to_string()),
                ("d", "d".to_string())
            ]
        );
    }

    #[test]
    fn test_param_value_helpers() {
        let one = ParamValue::from("a");
        let many = ParamValue::from(["1", "2"]);
        assert_eq!(one.as_str(), Some("a"));
        assert_eq!(many.as_str(), None);
        assert_eq!(one.as_slice(), ["a".to_string()]);
        assert!(many.is_many());
        assert_eq!(many.joined("/"), "1/2");
        assert_eq!(ParamValue::from(42_u32), "42");
    }

    #[test]
    fn test_serialize_preserves_order() {
        let p = Params::from([
            ("z", ParamValue::from("1")),
            ("a", ParamValue::from(vec!["x", "y"])),
        ]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"z":"1","a":["x","y"]}"#);
    }

    #[test]
    fn test_deserialize() {
        let p: Params = serde_json::from_str(r#"{"slug":"hello","tags":["a","b"]}"#).unwrap();
        assert_eq!(p.get_str("slug"), Some("hello"));
        assert_eq!(p.get("tags"), Some(&ParamValue::from(vec!["a", "b"])));
    }
}
