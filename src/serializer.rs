//! Tag serialization.
//!
//! Two entry points turn a tag, attributes and inner HTML into markup:
//!
//! - [`Renderer::render_strict`] trusts its input completely. The tag must
//!   already be sanitized and every attribute value must be a plain string
//!   or a bare-name marker. Nothing is escaped, merged or reordered.
//! - [`Renderer::render`] accepts a tag selector (`div.card#main`) and raw
//!   attribute values, merges selector classes/id into the attributes,
//!   sanitizes everything and then hands over to the strict path.
//!
//! Untrusted data must only ever go through the high-level path.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::options::RenderOptions;
use crate::sanitize::{merge_attribute, sanitize_attribute_name, sanitize_tag, sanitize_value};
use crate::selector::TagSelector;
use crate::value::{AttrValue, Attributes};

/// Tags rendered without a closing tag.
pub const SELF_CLOSING_TAGS: &[&str] = &["input", "img", "hr", "br", "meta", "link"];

/// Whether `tag` is one of [`SELF_CLOSING_TAGS`].
pub fn is_self_closing(tag: &str) -> bool {
	SELF_CLOSING_TAGS.contains(&tag)
}

/// A sanitized attribute value, ready to be written into a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrictValue {
	/// Rendered as `name="value"`. The value is written verbatim.
	Text(String),
	/// Rendered as the bare attribute name, e.g. `required`.
	Bare,
}

impl From<&str> for StrictValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for StrictValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

/// Insertion-ordered attribute name → sanitized value mapping.
pub type StrictAttributes = IndexMap<String, StrictValue>;

/// Content placed between the opening and closing tag.
pub enum InnerHtml<'a> {
	/// Literal HTML, inserted as is.
	Literal(Cow<'a, str>),
	/// A closure producing the HTML. It runs once, at render time.
	Producer(Box<dyn FnOnce() -> String + 'a>),
}

impl<'a> InnerHtml<'a> {
	/// Wraps a closure producing the inner HTML.
	///
	/// Only the closure's return value is used.
	pub fn producer(f: impl FnOnce() -> String + 'a) -> Self {
		Self::Producer(Box::new(f))
	}

	/// Resolves the content, running the producer if there is one.
	pub fn into_string(self) -> String {
		match self {
			Self::Literal(html) => html.into_owned(),
			Self::Producer(produce) => produce(),
		}
	}
}

impl Default for InnerHtml<'_> {
	fn default() -> Self {
		Self::Literal(Cow::Borrowed(""))
	}
}

impl fmt::Debug for InnerHtml<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(html) => f.debug_tuple("Literal").field(html).finish(),
			Self::Producer(_) => f.debug_tuple("Producer").field(&"<closure>").finish(),
		}
	}
}

impl<'a> From<&'a str> for InnerHtml<'a> {
	fn from(value: &'a str) -> Self {
		Self::Literal(Cow::Borrowed(value))
	}
}

impl From<String> for InnerHtml<'_> {
	fn from(value: String) -> Self {
		Self::Literal(Cow::Owned(value))
	}
}

impl<'a> From<&'a String> for InnerHtml<'a> {
	fn from(value: &'a String) -> Self {
		Self::Literal(Cow::Borrowed(value.as_str()))
	}
}

impl<'a> From<Cow<'a, str>> for InnerHtml<'a> {
	fn from(value: Cow<'a, str>) -> Self {
		Self::Literal(value)
	}
}

/// Serializes tags with a fixed set of [`RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
	options: RenderOptions,
}

impl Renderer {
	/// Creates a renderer with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a renderer with custom options.
	pub fn with_options(options: RenderOptions) -> Self {
		Self { options }
	}

	/// Returns the options.
	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Renders a full element from a tag selector and raw attributes.
	///
	/// Classes from the selector are appended to any `class` attribute;
	/// an id from the selector is used only when `attributes` has no truthy
	/// `id`. In the output, `name="value"` pairs come first and bare-name
	/// attributes last.
	///
	/// ```
	/// use reinhardt_markup::{attributes, Renderer};
	///
	/// let html = Renderer::new().render(
	/// 	"input.field",
	/// 	"",
	/// 	attributes! { "required" => true, "type" => "email" },
	/// 	true,
	/// );
	/// assert_eq!(html, r#"<input type="email" class="field" required />"#);
	/// ```
	pub fn render<'a>(
		&self,
		selector: &str,
		inner: impl Into<InnerHtml<'a>>,
		attributes: Attributes,
		close: bool,
	) -> String {
		let (tag, attributes) = prepare_tag(selector, attributes);
		let inner = inner.into().into_string();
		self.render_strict(&tag, &inner, &attributes, close)
	}

	/// Renders a full element without any sanitization.
	///
	/// Attributes are written in insertion order. A [`StrictValue::Bare`]
	/// entry with an empty name degrades to `="1"`.
	pub fn render_strict(
		&self,
		tag: &str,
		inner: &str,
		attributes: &StrictAttributes,
		close: bool,
	) -> String {
		let mut html = String::with_capacity(tag.len() * 2 + inner.len() + 16);
		self.write_open(&mut html, tag, attributes);
		html.push_str(inner);
		if close {
			self.write_close(&mut html, tag);
		}
		html
	}

	/// Appends the opening tag to `output`, without sanitization.
	///
	/// Callers streaming a tree write the open tag, then the children, then
	/// [`Renderer::write_close`] into the same buffer.
	pub fn write_open(&self, output: &mut String, tag: &str, attributes: &StrictAttributes) {
		output.push('<');
		output.push_str(tag);

		for (name, value) in attributes {
			output.push(' ');
			match value {
				StrictValue::Bare if !name.is_empty() => output.push_str(name),
				StrictValue::Bare => output.push_str("=\"1\""),
				StrictValue::Text(text) => {
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(text);
					output.push('"');
				}
			}
		}

		if is_self_closing(tag) && self.options.self_closing_slash {
			output.push_str(" />");
		} else {
			output.push('>');
		}
	}

	/// Appends the closing tag to `output`. Self-closing tags get nothing.
	pub fn write_close(&self, output: &mut String, tag: &str) {
		if !is_self_closing(tag) {
			output.push_str("</");
			output.push_str(tag);
			output.push('>');
		}
	}

	/// Renders only the opening tag, with full sanitization.
	pub fn open(&self, selector: &str, attributes: Attributes) -> String {
		self.render(selector, "", attributes, false)
	}

	/// Renders only the opening tag, without sanitization.
	pub fn open_strict(&self, tag: &str, attributes: &StrictAttributes) -> String {
		self.render_strict(tag, "", attributes, false)
	}

	/// Renders the closing tag for a selector, or `""` for self-closing tags.
	pub fn close(&self, selector: &str) -> String {
		let tag = clean_tag(&TagSelector::parse(selector));
		let mut html = String::new();
		self.write_close(&mut html, &tag);
		html
	}
}

// A non-blank selector can still sanitize to nothing (`"123"`, `".card"`);
// the element is then written with an empty tag name.
fn clean_tag(selector: &TagSelector) -> String {
	let tag = sanitize_tag(&selector.tag);
	if tag.is_empty() {
		tracing::debug!(tag = %selector.tag, "tag is empty after sanitization");
	}
	tag
}

/// Parses a selector and prepares its attributes for the strict path.
///
/// Returns the sanitized tag and the output of [`prepare_attributes`].
pub fn prepare_tag(selector: &str, attributes: Attributes) -> (String, StrictAttributes) {
	let parsed = TagSelector::parse(selector);
	let tag = clean_tag(&parsed);
	let attributes = prepare_attributes(&parsed, attributes);
	(tag, attributes)
}

/// Merges selector classes/id into `attributes`, sanitizes names and
/// values, and orders `name="value"` pairs before bare names.
///
/// Attributes whose name sanitizes to nothing are dropped. If two names
/// sanitize to the same string the later value wins.
pub fn prepare_attributes(selector: &TagSelector, mut attributes: Attributes) -> StrictAttributes {
	merge_attribute("class", &AttrValue::Text(selector.classes.clone()), &mut attributes);
	merge_attribute("id", &AttrValue::Text(selector.id.clone()), &mut attributes);

	let mut pairs = StrictAttributes::with_capacity(attributes.len());
	let mut bare = StrictAttributes::new();

	for (name, value) in &attributes {
		let clean = sanitize_attribute_name(name);
		if clean.is_empty() {
			tracing::debug!(name = %name, "dropping attribute with empty sanitized name");
			continue;
		}
		pairs.shift_remove(&clean);
		bare.shift_remove(&clean);
		match sanitize_value(name, value) {
			StrictValue::Bare => bare.insert(clean, StrictValue::Bare),
			text => pairs.insert(clean, text),
		};
	}

	pairs.extend(bare);
	pairs
}

/// [`Renderer::render`] with default options.
pub fn render<'a>(
	selector: &str,
	inner: impl Into<InnerHtml<'a>>,
	attributes: Attributes,
	close: bool,
) -> String {
	Renderer::default().render(selector, inner, attributes, close)
}

/// [`Renderer::render_strict`] with default options.
pub fn render_strict(tag: &str, inner: &str, attributes: &StrictAttributes, close: bool) -> String {
	Renderer::default().render_strict(tag, inner, attributes, close)
}

/// [`Renderer::open`] with default options.
pub fn open(selector: &str, attributes: Attributes) -> String {
	Renderer::default().open(selector, attributes)
}

/// [`Renderer::open_strict`] with default options.
pub fn open_strict(tag: &str, attributes: &StrictAttributes) -> String {
	Renderer::default().open_strict(tag, attributes)
}

/// [`Renderer::close`] with default options.
pub fn close(selector: &str) -> String {
	Renderer::default().close(selector)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attributes;
	use rstest::rstest;

	#[rstest]
	fn test_render_empty_div() {
		assert_eq!(render("div", "", attributes! {}, true), "<div></div>");
	}

	#[rstest]
	fn test_render_inner_html() {
		assert_eq!(
			render("div", "Hello...", attributes! {}, true),
			"<div>Hello...</div>"
		);
	}

	#[rstest]
	fn test_render_class_attribute() {
		assert_eq!(
			render("div", "", attributes! { "class" => "class-1" }, true),
			"<div class=\"class-1\"></div>"
		);
	}

	#[rstest]
	fn test_open_key_only_attribute() {
		assert_eq!(
			open("thing", attributes! { "required" => true }),
			"<thing required>"
		);
	}

	#[rstest]
	fn test_render_bare_attributes_come_last() {
		let html = render(
			"input",
			"",
			attributes! { "required" => true, "name" => "email", "disabled" => true, "type" => "text" },
			true,
		);
		assert_eq!(
			html,
			"<input name=\"email\" type=\"text\" required disabled />"
		);
	}

	#[rstest]
	fn test_render_strict_keeps_insertion_order() {
		let mut attrs = StrictAttributes::new();
		attrs.insert("required".to_string(), StrictValue::Bare);
		attrs.insert("name".to_string(), "email".into());
		assert_eq!(
			render_strict("input", "", &attrs, true),
			"<input required name=\"email\" />"
		);
	}

	#[rstest]
	fn test_render_strict_does_not_escape() {
		let mut attrs = StrictAttributes::new();
		attrs.insert("title".to_string(), "<b>".into());
		assert_eq!(
			render_strict("div", "<i>x</i>", &attrs, true),
			"<div title=\"<b>\"><i>x</i></div>"
		);
	}

	#[rstest]
	fn test_render_strict_empty_bare_name() {
		let mut attrs = StrictAttributes::new();
		attrs.insert(String::new(), StrictValue::Bare);
		assert_eq!(render_strict("p", "", &attrs, true), "<p =\"1\"></p>");
	}

	#[rstest]
	fn test_render_selector_merges_class_and_id() {
		let html = render(
			"div.card.active#main",
			"",
			attributes! { "class" => "wide" },
			true,
		);
		assert_eq!(html, "<div class=\"wide card active\" id=\"main\"></div>");
	}

	#[rstest]
	fn test_render_explicit_id_wins() {
		let html = render("div#selector", "", attributes! { "id" => "explicit" }, true);
		assert_eq!(html, "<div id=\"explicit\"></div>");
	}

	#[rstest]
	fn test_render_sanitizes_tag_and_names() {
		let html = render(
			"di<v>",
			"",
			attributes! { "data-<x>" => "1", "\"" => "dropped" },
			true,
		);
		assert_eq!(html, "<div data-x=\"1\"></div>");
	}

	#[rstest]
	fn test_render_self_closing() {
		assert_eq!(render("br", "", attributes! {}, true), "<br />");
		assert_eq!(close("br"), "");
		assert_eq!(close("div.card"), "</div>");
	}

	#[rstest]
	fn test_render_without_slash() {
		let renderer = Renderer::with_options(RenderOptions::new().html5());
		assert_eq!(
			renderer.render("img", "", attributes! { "src" => "/a.png" }, true),
			"<img src=\"/a.png\">"
		);
		assert_eq!(renderer.close("img"), "");
	}

	#[rstest]
	fn test_render_not_closed() {
		assert_eq!(render("p", "text", attributes! {}, false), "<p>text");
	}

	#[rstest]
	fn test_write_open_and_close_share_buffer() {
		let renderer = Renderer::new();
		let (tag, attrs) = prepare_tag("ul.menu", attributes! { "id" => "nav" });
		let mut html = String::from("<nav>");
		renderer.write_open(&mut html, &tag, &attrs);
		html.push_str("<li>a</li>");
		renderer.write_close(&mut html, &tag);
		html.push_str("</nav>");
		assert_eq!(
			html,
			"<nav><ul id=\"nav\" class=\"menu\"><li>a</li></ul></nav>"
		);
	}

	#[rstest]
	fn test_write_close_skips_self_closing() {
		let mut html = String::new();
		Renderer::new().write_close(&mut html, "img");
		assert!(html.is_empty());
	}

	#[rstest]
	#[case("123", "<></>")]
	#[case(".card", "< class=\"card\"></>")]
	fn test_tag_sanitized_to_empty(#[case] selector: &str, #[case] expected: &str) {
		assert_eq!(render(selector, "", attributes! {}, true), expected);
		assert_eq!(prepare_tag(selector, attributes! {}).0, "");
	}

	#[rstest]
	fn test_render_producer() {
		let name = String::from("World");
		let html = render(
			"p",
			InnerHtml::producer(|| format!("Hello, {name}")),
			attributes! {},
			true,
		);
		assert_eq!(html, "<p>Hello, World</p>");
	}

	#[rstest]
	fn test_render_json_attribute() {
		let html = render(
			"div",
			"",
			attributes! { "data-config" => AttrValue::map([("a", 1)]) },
			true,
		);
		assert_eq!(html, "<div data-config=\"{&quot;a&quot;:1}\"></div>");
	}

	#[rstest]
	#[case("input", true)]
	#[case("img", true)]
	#[case("hr", true)]
	#[case("br", true)]
	#[case("meta", true)]
	#[case("link", true)]
	#[case("div", false)]
	#[case("source", false)]
	fn test_is_self_closing(#[case] tag: &str, #[case] expected: bool) {
		assert_eq!(is_self_closing(tag), expected);
	}
}
