//! Named request parameters and their URL-encoded / JSON renderings.
//!
//! [`Params`] is an ordered map from string keys to [`ParamValue`]s. Values are
//! scalars (text, numbers, booleans) or containers (lists, nested maps).
//!
//! # URL encoding
//!
//! | Input | Output |
//! |-------|--------|
//! | `{"a": "1"}` | `a=1` |
//! | `{"user": {"name": "bo"}}` | `user[name]=bo` |
//! | `{"ids": [1, 2]}` | `ids[]=1&ids[]=2` |
//!
//! Keys and values are percent-encoded with [`PARAM_VALUE`](super::constants::PARAM_VALUE).
//!
//! # Examples
//!
//! ```
//! use declarative_connect::Params;
//!
//! let params = Params::new()
//!     .with("q", "rust & go")
//!     .with("page", 2);
//! assert_eq!(params.to_percent_encoded(), "page=2&q=rust%20%26%20go");
//! ```

use super::constants::PARAM_VALUE;
use bytes::Bytes;
use percent_encoding::utf8_percent_encode;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text, written verbatim
    Text(String),
    /// Integer or float
    Number(serde_json::Number),
    /// `true` / `false`
    Bool(bool),
    /// Ordered sequence, URL-encoded as repeated `key[]=value`
    List(Vec<ParamValue>),
    /// Nested mapping, URL-encoded as `parent[key]=value`
    Map(Params),
}

impl fmt::Display for ParamValue {
    /// Scalars display verbatim; containers display as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Number(number) => write!(f, "{}", number),
            ParamValue::Bool(flag) => write!(f, "{}", flag),
            ParamValue::List(_) | ParamValue::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ParamValue::Text(text) => serializer.serialize_str(text),
            ParamValue::Number(number) => number.serialize(serializer),
            ParamValue::Bool(flag) => serializer.serialize_bool(*flag),
            ParamValue::List(items) => items.serialize(serializer),
            ParamValue::Map(params) => params.serialize(serializer),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for ParamValue {
    /// Non-finite floats have no JSON number form and fall back to text.
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(number) => ParamValue::Number(number),
            None => ParamValue::Text(value.to_string()),
        }
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::from(f64::from(value))
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Params> for ParamValue {
    fn from(params: Params) -> Self {
        ParamValue::Map(params)
    }
}

impl ParamValue {
    fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(flag) => Some(ParamValue::Bool(flag)),
            serde_json::Value::Number(number) => Some(ParamValue::Number(number)),
            serde_json::Value::String(text) => Some(ParamValue::Text(text)),
            serde_json::Value::Array(items) => Some(ParamValue::List(
                items.into_iter().filter_map(ParamValue::from_json).collect(),
            )),
            serde_json::Value::Object(map) => Some(ParamValue::Map(Params::from_json_map(map))),
        }
    }
}

/// Ordered, string-keyed request parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Params(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous value under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over top-level entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    /// Render as a `key=value&key2=value2` string.
    ///
    /// Nested maps become `parent[key]=value`, lists become repeated
    /// `key[]=value` entries in their original order.
    pub fn to_percent_encoded(&self) -> String {
        let mut pairs = Vec::new();
        self.encode_into(None, &mut pairs);
        pairs.join("&")
    }

    fn encode_into(&self, parent: Option<&str>, pairs: &mut Vec<String>) {
        for (key, value) in &self.0 {
            let escaped = escape(key);
            let key = match parent {
                Some(parent) => format!("{}[{}]", parent, escaped),
                None => escaped,
            };

            match value {
                ParamValue::Map(nested) => nested.encode_into(Some(&key), pairs),
                ParamValue::List(items) => {
                    for item in items {
                        pairs.push(format!("{}[]={}", key, escape(&item.to_string())));
                    }
                }
                scalar => pairs.push(format!("{}={}", key, escape(&scalar.to_string()))),
            }
        }
    }

    /// Serialize as a JSON object.
    ///
    /// Returns `None` when the serializer fails; the caller decides whether a
    /// missing body is an error.
    pub fn to_json(&self) -> Option<Bytes> {
        serde_json::to_vec(self).ok().map(Bytes::from)
    }

    /// Convert any serializable struct into parameters.
    ///
    /// Anything that does not serialize to a JSON object yields an empty set.
    /// `null` fields are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use declarative_connect::Params;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Login { user: String, remember: bool }
    ///
    /// let params = Params::from_serializable(&Login { user: "bo".into(), remember: true });
    /// assert_eq!(params.to_percent_encoded(), "remember=true&user=bo");
    /// ```
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(map)) => Params::from_json_map(map),
            _ => Params::new(),
        }
    }

    /// Convert the parameters back into a typed value, if they fit.
    pub fn decode_into<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::to_value(self)
            .ok()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Params(
            map.into_iter()
                .filter_map(|(key, value)| ParamValue::from_json(value).map(|value| (key, value)))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn escape(raw: &str) -> String {
    utf8_percent_encode(raw, PARAM_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_flat_encoding() {
        let params = Params::new().with("a", "1").with("b", "two words");
        assert_eq!(params.to_percent_encoded(), "a=1&b=two%20words");
    }

    #[test]
    fn test_flat_round_trip() {
        let params = Params::new()
            .with("email", "bo@example.com")
            .with("note", "a+b=c; d&e (f) [g] #h")
            .with("path", "/tmp/x?y")
            .with("emoji", "caf\u{e9} \u{1f980}");

        let encoded = params.to_percent_encoded();
        let decoded: Vec<(String, String)> = url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();

        let expected: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_reserved_delimiters_are_escaped() {
        let params = Params::new().with("k", ":#[]@!$&'()*+,;=");
        assert_eq!(
            params.to_percent_encoded(),
            "k=%3A%23%5B%5D%40%21%24%26%27%28%29%2A%2B%2C%3B%3D"
        );
    }

    #[test]
    fn test_unreserved_and_query_safe_kept() {
        let params = Params::new().with("k", "a-b.c_d~e/f?g");
        assert_eq!(params.to_percent_encoded(), "k=a-b.c_d~e/f?g");
    }

    #[test]
    fn test_nested_map() {
        let params = Params::new().with(
            "user",
            Params::new().with("name", "bo").with("age", 7),
        );
        assert_eq!(params.to_percent_encoded(), "user[age]=7&user[name]=bo");
    }

    #[test]
    fn test_deeply_nested_map() {
        let params = Params::new().with(
            "a",
            Params::new().with("b", Params::new().with("c", true)),
        );
        assert_eq!(params.to_percent_encoded(), "a[b][c]=true");
    }

    #[test]
    fn test_list_preserves_order() {
        let params = Params::new().with("ids", vec![3, 1, 2]);
        assert_eq!(params.to_percent_encoded(), "ids[]=3&ids[]=1&ids[]=2");
    }

    #[test]
    fn test_list_inside_map() {
        let params = Params::new().with("filter", Params::new().with("tags", vec!["x y", "z"]));
        assert_eq!(
            params.to_percent_encoded(),
            "filter[tags][]=x%20y&filter[tags][]=z"
        );
    }

    #[test]
    fn test_nested_key_is_escaped_inside_brackets() {
        let params = Params::new().with("p", Params::new().with("a b", 1));
        assert_eq!(params.to_percent_encoded(), "p[a%20b]=1");
    }

    #[test]
    fn test_empty_params() {
        assert_eq!(Params::new().to_percent_encoded(), "");
        assert_eq!(Params::new().to_json().unwrap(), Bytes::from_static(b"{}"));
    }

    #[test]
    fn test_json_keeps_native_types() {
        let params = Params::new()
            .with("n", 5)
            .with("f", 1.5)
            .with("ok", false)
            .with("tags", vec!["a"])
            .with("inner", Params::new().with("k", "v"));
        let json: serde_json::Value = serde_json::from_slice(&params.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"n": 5, "f": 1.5, "ok": false, "tags": ["a"], "inner": {"k": "v"}})
        );
    }

    #[test]
    fn test_non_finite_float_falls_back_to_text() {
        let value = ParamValue::from(f64::NAN);
        assert_eq!(value, ParamValue::Text("NaN".to_string()));
    }

    #[test]
    fn test_display_of_containers() {
        assert_eq!(ParamValue::from(vec![1, 2]).to_string(), "[1,2]");
        assert_eq!(
            ParamValue::from(Params::new().with("a", "b")).to_string(),
            r#"{"a":"b"}"#
        );
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Profile {
        name: String,
        age: u32,
        nickname: Option<String>,
    }

    #[test]
    fn test_serializable_round_trip() {
        let profile = Profile {
            name: "bo".into(),
            age: 31,
            nickname: None,
        };
        let params = Params::from_serializable(&profile);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("age"), Some(&ParamValue::from(31)));
        assert_eq!(params.decode_into::<Profile>(), Some(profile));
    }

    #[test]
    fn test_from_serializable_non_object() {
        assert!(Params::from_serializable(&vec![1, 2, 3]).is_empty());
        assert!(Params::from_serializable("text").is_empty());
    }

    #[test]
    fn test_decode_into_mismatch() {
        let params = Params::new().with("name", 1);
        assert_eq!(params.decode_into::<Profile>(), None);
    }

    #[test]
    fn test_from_iterator() {
        let params: Params = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(params.to_percent_encoded(), "a=1&b=2");
    }
}
