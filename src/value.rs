//! Raw attribute values.
//!
//! The high-level render path accepts loosely typed attribute values: plain
//! strings, sequences and token maps for `class`, booleans for bare flags
//! such as `required`, integers, and arbitrary structured data that ends up
//! JSON encoded inside the attribute. [`AttrValue`] is the sum type for all
//! of them.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Insertion-ordered attribute name → raw value mapping.
pub type Attributes = IndexMap<String, AttrValue>;

/// A raw, unsanitized attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttrValue {
	/// No value. Renders as an empty string.
	#[default]
	Null,
	/// A boolean. `true` renders as a bare attribute name.
	Bool(bool),
	/// An integer, passed through unchanged by sanitization.
	Int(i64),
	/// A floating point number.
	Float(f64),
	/// A string.
	Text(String),
	/// An ordered sequence of values.
	List(Vec<AttrValue>),
	/// An ordered key → value mapping.
	Map(IndexMap<String, AttrValue>),
}

impl AttrValue {
	/// Builds a [`AttrValue::List`] from anything convertible.
	pub fn list<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<AttrValue>,
	{
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Builds a [`AttrValue::Map`] from key/value pairs, keeping their order.
	///
	/// ```
	/// use reinhardt_markup::AttrValue;
	///
	/// let classes = AttrValue::map([("active", true), ("hidden", false)]);
	/// assert!(classes.is_structured());
	/// ```
	pub fn map<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<AttrValue>,
	{
		Self::Map(
			entries
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}

	/// Loose truthiness used by the merge policy and class-list filtering.
	///
	/// Falsy values are `Null`, `false`, `0`, `0.0`, `""`, `"0"` and empty
	/// sequences or maps. Everything else is truthy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Bool(b) => *b,
			Self::Int(i) => *i != 0,
			Self::Float(f) => *f != 0.0,
			Self::Text(s) => !s.is_empty() && s != "0",
			Self::List(items) => !items.is_empty(),
			Self::Map(entries) => !entries.is_empty(),
		}
	}

	/// Whether this is a sequence or a map.
	pub fn is_structured(&self) -> bool {
		matches!(self, Self::List(_) | Self::Map(_))
	}

	/// Returns the string slice if this is a [`AttrValue::Text`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Scalar string conversion.
	///
	/// `Null` and `false` become `""`, `true` becomes `"1"`, numbers use
	/// their decimal form. Structured values have no scalar form and yield
	/// `""`; callers that need them encoded go through
	/// [`json_encode_for_html_attr`](crate::sanitize::json_encode_for_html_attr).
	pub fn to_attr_string(&self) -> String {
		match self {
			Self::Null | Self::Bool(false) => String::new(),
			Self::Bool(true) => "1".to_string(),
			Self::Int(i) => i.to_string(),
			Self::Float(f) => f.to_string(),
			Self::Text(s) => s.clone(),
			Self::List(_) | Self::Map(_) => String::new(),
		}
	}
}

impl fmt::Display for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_attr_string())
	}
}

impl Serialize for AttrValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(b) => serializer.serialize_bool(*b),
			Self::Int(i) => serializer.serialize_i64(*i),
			Self::Float(f) => serializer.serialize_f64(*f),
			Self::Text(s) => serializer.serialize_str(s),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Map(entries) => {
				let mut map = serializer.serialize_map(Some(entries.len()))?;
				for (k, v) in entries {
					map.serialize_entry(k, v)?;
				}
				map.end()
			}
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&String> for AttrValue {
	fn from(value: &String) -> Self {
		Self::Text(value.clone())
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for AttrValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for AttrValue {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<u32> for AttrValue {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<usize> for AttrValue {
	fn from(value: usize) -> Self {
		Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
	fn from(value: Vec<T>) -> Self {
		Self::list(value)
	}
}

impl<T: Into<AttrValue>, const N: usize> From<[T; N]> for AttrValue {
	fn from(value: [T; N]) -> Self {
		Self::list(value)
	}
}

impl From<IndexMap<String, AttrValue>> for AttrValue {
	fn from(value: IndexMap<String, AttrValue>) -> Self {
		Self::Map(value)
	}
}

impl From<serde_json::Value> for AttrValue {
	fn from(value: serde_json::Value) -> Self {
		use serde_json::Value;

		match value {
			Value::Null => Self::Null,
			Value::Bool(b) => Self::Bool(b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => Self::Int(i),
				None => Self::Float(n.as_f64().unwrap_or_default()),
			},
			Value::String(s) => Self::Text(s),
			Value::Array(items) => Self::list(items),
			Value::Object(entries) => Self::map(entries),
		}
	}
}

/// Builds an [`Attributes`] map from `name => value` pairs.
///
/// ```
/// use reinhardt_markup::{attributes, AttrValue};
///
/// let attrs = attributes! { "type" => "checkbox", "checked" => true };
/// assert_eq!(attrs["checked"], AttrValue::Bool(true));
/// ```
#[macro_export]
macro_rules! attributes {
	() => {
		$crate::Attributes::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {{
		let mut map = $crate::Attributes::new();
		$(
			map.insert(::std::string::String::from($name), $crate::AttrValue::from($value));
		)+
		map
	}};
}
