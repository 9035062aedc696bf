//! Tag selector parsing.
//!
//! A tag selector is a CSS-selector-like string carrying a tag name plus
//! optional classes and an id, e.g. `div.card.active#main`. Only tags,
//! classes and ids are understood; anything else stays in the tag and is
//! stripped later by [`sanitize_tag`](crate::sanitize::sanitize_tag).

use regex::{Captures, Regex};
use std::sync::OnceLock;

static CLASS_RUN: OnceLock<Regex> = OnceLock::new();
static ID_RUN: OnceLock<Regex> = OnceLock::new();

// One or more `.` up to (not including) the next `.` or `#`.
fn class_run() -> &'static Regex {
	CLASS_RUN.get_or_init(|| Regex::new(r"\.+[^.#]*").expect("class run pattern is valid"))
}

fn id_run() -> &'static Regex {
	ID_RUN.get_or_init(|| Regex::new(r"#+[^.#]*").expect("id run pattern is valid"))
}

/// The parts of a parsed tag selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelector {
	/// Whatever remains after classes and ids are stripped.
	pub tag: String,
	/// The first id found, or empty.
	pub id: String,
	/// Space-joined classes in order of appearance, or empty.
	pub classes: String,
}

impl TagSelector {
	/// Parses a selector. Classes are extracted first, then the id.
	///
	/// ```
	/// use reinhardt_markup::TagSelector;
	///
	/// let parsed = TagSelector::parse("div.card.active#main");
	/// assert_eq!(parsed.tag, "div");
	/// assert_eq!(parsed.id, "main");
	/// assert_eq!(parsed.classes, "card active");
	/// ```
	pub fn parse(selector: &str) -> Self {
		let (rest, classes) = parse_tag_and_classes(selector);
		let (tag, id) = parse_tag_and_id(&rest);
		Self { tag, id, classes }
	}

	/// Consumes the selector, returning `(tag, id, classes)`.
	pub fn into_parts(self) -> (String, String, String) {
		(self.tag, self.id, self.classes)
	}
}

/// Parses a selector into its `(tag, id, classes)` parts.
pub fn parse_tag_selector(selector: &str) -> TagSelector {
	TagSelector::parse(selector)
}

/// Splits classes off a selector.
///
/// `"div.class-1.class-2"` becomes `("div", "class-1 class-2")`. An id, if
/// present, is left in the returned tag: class runs stop at `#`.
pub fn parse_tag_and_classes(selector: &str) -> (String, String) {
	if !selector.contains('.') {
		return (selector.to_string(), String::new());
	}

	let mut classes = Vec::new();
	let tag = class_run()
		.replace_all(selector, |caps: &Captures<'_>| {
			classes.push(caps[0].replace('.', ""));
			""
		})
		.into_owned();

	(tag, classes.join(" ").trim().to_string())
}

/// Splits the id off a selector.
///
/// `"div#the-id#another-id"` becomes `("div", "the-id")`: every `#` run is
/// stripped but only the first non-empty one is kept.
pub fn parse_tag_and_id(selector: &str) -> (String, String) {
	if !selector.contains('#') {
		return (selector.to_string(), String::new());
	}

	let mut first_id = String::new();
	let tag = id_run()
		.replace_all(selector, |caps: &Captures<'_>| {
			if first_id.is_empty() {
				first_id = caps[0].replace('#', "");
			}
			""
		})
		.into_owned();

	(tag, first_id)
}
