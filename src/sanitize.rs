//! Sanitization and merge policy for tag names and attribute values.
//!
//! Sanitization never fails. Characters outside the allowed set are
//! stripped and the result may be empty.

use std::borrow::Cow;

use crate::error::Result;
use crate::serializer::StrictValue;
use crate::value::{AttrValue, Attributes};

fn strip(input: &str, keep: impl Fn(char) -> bool) -> String {
	let output: String = input.chars().filter(|c| keep(*c)).collect();
	if output.len() != input.len() {
		tracing::trace!(input, output = %output, "stripped disallowed characters");
	}
	output
}

// PCRE's `\s`: space, \t, \n, \v, \f, \r.
fn is_pcre_space(c: char) -> bool {
	c.is_ascii_whitespace() || c == '\x0B'
}

/// Keeps ASCII letters only. Digits and hyphens are dropped too, so custom
/// element names do not survive.
pub fn sanitize_tag(tag: &str) -> String {
	strip(tag, |c| c.is_ascii_alphabetic())
}

/// Keeps ASCII letters, digits, `_` and `-` (enough for `data-*` and
/// `aria-*`).
pub fn sanitize_attribute_name(name: &str) -> String {
	strip(name, |c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Sanitizes a class list or id: ASCII letters, digits, `_`, `-` and
/// whitespace.
pub fn sanitize_class_str(value: &str) -> String {
	strip(value, |c| {
		c.is_ascii_alphanumeric() || c == '_' || c == '-' || is_pcre_space(c)
	})
}

/// Normalizes any class input into a sanitized, space-joined token string.
///
/// Accepts a string, a sequence (falsy items skipped, nested sequences
/// flattened) or a token → flag map (tokens with falsy flags skipped).
/// Non-string scalars have no class form and yield `""`.
///
/// ```
/// use reinhardt_markup::{sanitize::parse_classes, AttrValue};
///
/// let expected = "class-1 class-2";
/// assert_eq!(parse_classes(&"class-1 class-2".into()), expected);
/// assert_eq!(
/// 	parse_classes(&AttrValue::List(vec![
/// 		"class-1".into(),
/// 		"class-2".into(),
/// 		"".into(),
/// 		false.into(),
/// 	])),
/// 	expected
/// );
/// assert_eq!(
/// 	parse_classes(&AttrValue::map([
/// 		("class-1", AttrValue::Bool(true)),
/// 		("class-2", AttrValue::Int(1)),
/// 		("class-3", AttrValue::Bool(false)),
/// 	])),
/// 	expected
/// );
/// ```
pub fn parse_classes(value: &AttrValue) -> String {
	match value {
		AttrValue::Text(s) => sanitize_class_str(s),
		AttrValue::List(items) => join_tokens(
			items
				.iter()
				.filter(|item| item.is_truthy())
				.map(parse_classes),
		),
		AttrValue::Map(entries) => join_tokens(
			entries
				.iter()
				.filter(|(_, flag)| flag.is_truthy())
				.map(|(token, flag)| {
					if token.is_empty() {
						parse_classes(flag)
					} else {
						sanitize_class_str(token)
					}
				}),
		),
		_ => String::new(),
	}
}

fn join_tokens(tokens: impl Iterator<Item = String>) -> String {
	tokens
		.filter(|t| !t.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
		.trim()
		.to_string()
}

/// Backslash-escapes `'`, `"`, `\` and NUL.
pub fn add_slashes(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'\'' | '"' | '\\' => {
				escaped.push('\\');
				escaped.push(c);
			}
			'\0' => escaped.push_str("\\0"),
			_ => escaped.push(c),
		}
	}
	escaped
}

const ESCAPED_CHARS: [char; 5] = ['&', '<', '>', '"', '\''];

fn entity(c: char) -> Option<&'static str> {
	match c {
		'&' => Some("&amp;"),
		'<' => Some("&lt;"),
		'>' => Some("&gt;"),
		'"' => Some("&quot;"),
		'\'' => Some("&#x27;"),
		_ => None,
	}
}

/// Entity-escapes `&`, `<`, `>`, `"` and `'` so the text can sit inside a
/// double-quoted attribute. Borrows the input when nothing needs escaping.
pub fn escape_html(s: &str) -> Cow<'_, str> {
	let Some(first) = s.find(ESCAPED_CHARS) else {
		return Cow::Borrowed(s);
	};
	let mut escaped = String::with_capacity(s.len() + 16);
	escaped.push_str(&s[..first]);
	for c in s[first..].chars() {
		match entity(c) {
			Some(replacement) => escaped.push_str(replacement),
			None => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// JSON-encodes a value so it can sit inside a double-quoted attribute.
///
/// ```
/// use reinhardt_markup::{sanitize::json_encode_for_html_attr, AttrValue};
///
/// let encoded = json_encode_for_html_attr(&AttrValue::list(["a", "<b>"])).unwrap();
/// assert_eq!(encoded, "[&quot;a&quot;,&quot;&lt;b&gt;&quot;]");
/// ```
pub fn json_encode_for_html_attr(value: &AttrValue) -> Result<String> {
	let json = serde_json::to_string(value)?;
	Ok(escape_html(&json).into_owned())
}

/// Sanitizes a raw value according to the attribute it belongs to.
///
/// The attribute name is compared case-insensitively:
/// - `class`: [`parse_classes`]
/// - `id`: [`sanitize_class_str`]
/// - `style`: strings are backslash-escaped; structured values are not
///   supported yet and yield `""`
/// - anything else: structured values are JSON encoded and HTML escaped,
///   booleans/null/integers pass through, the rest is backslash-escaped.
pub fn sanitize_value(name: &str, value: &AttrValue) -> StrictValue {
	match name.to_ascii_lowercase().as_str() {
		"class" => StrictValue::Text(parse_classes(value)),
		"id" => StrictValue::Text(sanitize_class_str(&value.to_attr_string())),
		"style" => {
			if value.is_structured() {
				tracing::debug!(name, "structured style values are not supported");
				StrictValue::Text(String::new())
			} else {
				StrictValue::Text(add_slashes(&value.to_attr_string()))
			}
		}
		_ => match value {
			AttrValue::List(_) | AttrValue::Map(_) => match json_encode_for_html_attr(value) {
				Ok(encoded) => StrictValue::Text(encoded),
				Err(error) => {
					tracing::warn!(name, %error, "failed to encode attribute value");
					StrictValue::Text(String::new())
				}
			},
			AttrValue::Bool(true) => StrictValue::Bare,
			AttrValue::Bool(false) | AttrValue::Null | AttrValue::Int(_) => {
				StrictValue::Text(value.to_attr_string())
			}
			AttrValue::Float(_) | AttrValue::Text(_) => {
				StrictValue::Text(add_slashes(&value.to_attr_string()))
			}
		},
	}
}

/// Merges a value that arrived outside the attribute map (from a tag
/// selector) into it.
///
/// - `class` appends: the incoming value is pushed onto a sequence, added
///   as a token to a map, or appended space-separated to a string. With no
///   existing class it is inserted as is.
/// - `style` is left alone; style merging is not supported.
/// - Every other name (normally `id`) is only written when the map has no
///   truthy value for it, so explicit attributes win.
///
/// Falsy incoming values are ignored.
pub fn merge_attribute(name: &str, incoming: &AttrValue, attrs: &mut Attributes) {
	if !incoming.is_truthy() {
		return;
	}

	match name {
		"class" => match attrs.get_mut("class") {
			Some(AttrValue::List(items)) => items.push(incoming.clone()),
			Some(AttrValue::Map(entries)) => {
				entries.insert(parse_classes(incoming), AttrValue::Bool(true));
			}
			Some(existing) if existing.is_truthy() => {
				let merged = format!("{} {}", existing.to_attr_string(), parse_classes(incoming));
				*existing = AttrValue::Text(merged);
			}
			Some(existing) => *existing = incoming.clone(),
			None => {
				attrs.insert(name.to_string(), incoming.clone());
			}
		},
		"style" => {
			tracing::debug!("style merge from tag selector is not supported");
		}
		_ => {
			let has_truthy = attrs.get(name).is_some_and(AttrValue::is_truthy);
			if !has_truthy {
				attrs.insert(name.to_string(), incoming.clone());
			}
		}
	}
}
