//! Filter values and the ordered filter object
//!
//! [`FilterValue`] is a closed set of JSON-safe values. [`FilterObject`] is
//! the insertion-ordered mapping every builder writes into; it serializes as
//! a JSON object with keys in the order they were first set.

use crate::{FilterError, FilterResult};
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Value stored under a filter key.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    /// Non-finite floats are accepted here and rejected at serialize time.
    Float(f64),
    Text(String),
    Array(Vec<FilterValue>),
    Object(FilterObject),
}

impl FilterValue {
    /// Empty JSON object, used by relative date predicates such as `past_week`.
    pub fn empty_object() -> Self {
        FilterValue::Object(FilterObject::new())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FilterObject> {
        match self {
            FilterValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Bool(b) => serializer.serialize_bool(*b),
            FilterValue::Int(i) => serializer.serialize_i64(*i),
            FilterValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            FilterValue::Float(f) => Err(S::Error::custom(format!(
                "non-finite number {} cannot be represented in JSON",
                f
            ))),
            FilterValue::Text(s) => serializer.serialize_str(s),
            FilterValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FilterValue::Object(obj) => obj.serialize(serializer),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    FilterValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Values past `i64::MAX` become floats.
macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(i) => FilterValue::Int(i),
                        Err(_) => FilterValue::Float(value as f64),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f32> for FilterValue {
    fn from(value: f32) -> Self {
        FilterValue::Float(f64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::Text(value.clone())
    }
}

/// Page and user ids are sent as hyphenated strings.
impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        FilterValue::Text(value.hyphenated().to_string())
    }
}

/// Calendar dates are sent as `YYYY-MM-DD`.
impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Text(value.format("%Y-%m-%d").to_string())
    }
}

/// Instants are sent as RFC 3339 strings, keeping their offset.
impl<Tz: TimeZone> From<DateTime<Tz>> for FilterValue
where
    Tz::Offset: fmt::Display,
{
    fn from(value: DateTime<Tz>) -> Self {
        FilterValue::Text(value.to_rfc3339())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        FilterValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<FilterObject> for FilterValue {
    fn from(value: FilterObject) -> Self {
        FilterValue::Object(value)
    }
}

impl TryFrom<serde_json::Value> for FilterValue {
    type Error = FilterError;

    fn try_from(value: serde_json::Value) -> FilterResult<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Err(FilterError::InvalidValue {
                reason: "null is not a filter value".to_string(),
            }),
            Value::Bool(b) => Ok(FilterValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(FilterValue::Int(i)),
                None => n.as_f64().map(FilterValue::Float).ok_or_else(|| {
                    FilterError::InvalidValue {
                        reason: format!("number {} is out of range", n),
                    }
                }),
            },
            Value::String(s) => Ok(FilterValue::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(FilterValue::try_from)
                .collect::<FilterResult<Vec<_>>>()
                .map(FilterValue::Array),
            Value::Object(map) => {
                let mut obj = FilterObject::new();
                for (key, value) in map {
                    obj.insert(key, FilterValue::try_from(value)?);
                }
                Ok(FilterValue::Object(obj))
            }
        }
    }
}

// ============================================================================
// FILTER OBJECT
// ============================================================================

/// Insertion-ordered string-keyed mapping.
///
/// Setting a key that already exists replaces its value in place, so the key
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterObject {
    entries: Vec<(String, FilterValue)>,
}

impl FilterObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Option<FilterValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style [`FilterObject::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FilterValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a structured JSON mapping, preserving key order.
    pub fn to_map(&self) -> FilterResult<serde_json::Map<String, serde_json::Value>> {
        match self.to_value()? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(FilterError::Serialization {
                reason: format!("expected a JSON object, got {}", other),
            }),
        }
    }

    /// Convert to a structured JSON value.
    pub fn to_value(&self) -> FilterResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|err| {
            tracing::warn!(error = %err, "Filter object could not be converted to JSON");
            FilterError::from(err)
        })
    }
}

impl Serialize for FilterObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = FilterObject::new();
        for (key, value) in iter {
            obj.insert(key, value);
        }
        obj
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_insert_preserves_first_position() {
        let mut obj = FilterObject::new();
        obj.insert("property", "done");
        obj.insert("type", "checkbox");
        obj.insert("equals", true);
        let previous = obj.insert("type", "number");

        assert_eq!(previous, Some(FilterValue::Text("checkbox".to_string())));
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["property", "type", "equals"]);
        assert_eq!(obj.get("type").and_then(FilterValue::as_str), Some("number"));
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn test_serialize_keeps_key_order() {
        let obj = FilterObject::new()
            .with("zeta", 1)
            .with("alpha", 2)
            .with("mid", 3);
        let json = serde_json::to_string(&obj).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2,"mid":3}"#);

        let map = obj.to_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_finite_float_fails_at_serialize_time() {
        let obj = FilterObject::new().with("equals", f64::NAN);
        // Construction succeeded; only serialization fails.
        assert!(obj.contains_key("equals"));
        assert!(matches!(
            obj.to_value(),
            Err(FilterError::Serialization { .. })
        ));
        assert!(serde_json::to_string(&obj).is_err());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(FilterValue::from(5), FilterValue::Int(5));
        assert_eq!(FilterValue::from(2.5f32), FilterValue::Float(2.5));
        assert_eq!(FilterValue::from("x"), FilterValue::Text("x".to_string()));
        assert_eq!(
            FilterValue::from(vec!["a", "b"]),
            FilterValue::Array(vec!["a".into(), "b".into()])
        );

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(FilterValue::from(date).as_str(), Some("2024-03-09"));

        let instant = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap();
        assert_eq!(
            FilterValue::from(instant).as_str(),
            Some("2024-03-09T12:30:00+00:00")
        );

        let id = Uuid::nil();
        assert_eq!(
            FilterValue::from(id).as_str(),
            Some("00000000-0000-0000-0000-000000000000")
        );
    }

    #[test]
    fn test_wide_integer_conversions() {
        assert_eq!(FilterValue::from(3usize), FilterValue::Int(3));
        assert_eq!(FilterValue::from(-3isize), FilterValue::Int(-3));
        assert_eq!(FilterValue::from(i64::MAX as u64), FilterValue::Int(i64::MAX));
        assert_eq!(FilterValue::from(u64::MAX), FilterValue::Float(u64::MAX as f64));

        let obj = FilterObject::new().with("equals", vec![1, 2, 3].len());
        assert_eq!(obj.get("equals"), Some(&FilterValue::Int(3)));
    }

    #[test]
    fn test_try_from_json_value() {
        let value = FilterValue::try_from(json!({"past_week": {}, "n": [1, 2.5, "x"]})).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("past_week"), Some(&FilterValue::empty_object()));
        assert_eq!(
            obj.get("n"),
            Some(&FilterValue::Array(vec![
                FilterValue::Int(1),
                FilterValue::Float(2.5),
                FilterValue::Text("x".to_string()),
            ]))
        );
    }

    #[test]
    fn test_try_from_rejects_null() {
        assert!(matches!(
            FilterValue::try_from(json!(null)),
            Err(FilterError::InvalidValue { .. })
        ));
        assert!(FilterValue::try_from(json!({"nested": [null]})).is_err());
    }

    #[test]
    fn test_from_iterator() {
        let obj: FilterObject = vec![("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("a"), Some(&FilterValue::Int(3)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Keys serialize in first-insertion order and each appears once.
        #[test]
        fn prop_object_keeps_first_insertion_order(
            entries in prop::collection::vec(("[a-e]", any::<i64>()), 0..12),
        ) {
            let obj: FilterObject = entries.iter().cloned().collect();

            let mut expected: Vec<String> = Vec::new();
            for (key, _) in &entries {
                if !expected.contains(key) {
                    expected.push(key.clone());
                }
            }
            let keys: Vec<String> = obj.keys().map(str::to_string).collect();
            prop_assert_eq!(&keys, &expected);

            let map = obj.to_map().unwrap();
            let emitted: Vec<String> = map.keys().cloned().collect();
            prop_assert_eq!(emitted, expected);
        }

        /// The last write to a key wins.
        #[test]
        fn prop_object_last_write_wins(
            entries in prop::collection::vec(("[a-c]", any::<i64>()), 1..12),
        ) {
            let obj: FilterObject = entries.iter().cloned().collect();
            for (key, _) in &entries {
                let last = entries.iter().rev().find(|(k, _)| k == key).map(|(_, v)| *v);
                let expected = last.map(FilterValue::Int);
                prop_assert_eq!(obj.get(key), expected.as_ref());
            }
        }
    }
}
