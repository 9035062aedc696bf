//! Mutable element tree.
//!
//! An [`Element`] owns a tag, an ordered set of [`Attribute`] cells and an
//! ordered list of children. An element with an empty tag is a *fragment*:
//! it renders as the concatenation of its children and never carries
//! attributes.
//!
//! ```
//! use reinhardt_markup::Element;
//!
//! let mut list = Element::new("ul.menu")
//! 	.child(Element::new("li").child("Home"))
//! 	.child(Element::new("li").child("About"));
//! list.add_class("open");
//!
//! assert_eq!(
//! 	list.render(),
//! 	r#"<ul class="open menu"><li>Home</li><li>About</li></ul>"#
//! );
//! ```

use std::fmt;
use std::mem;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::attribute::{Attribute, AttributeRegistry, Operation, Outcome};
use crate::error::Result;
use crate::options::RenderOptions;
use crate::serializer::{Renderer, prepare_tag};
use crate::value::{AttrValue, Attributes};

/// A child of an [`Element`].
#[derive(Debug, Clone)]
pub enum ChildNode {
	/// Literal HTML, rendered verbatim.
	Text(String),
	/// A nested element.
	Element(Element),
	/// Renders nothing.
	Empty,
}

impl ChildNode {
	/// Returns the nested element, if this node is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			_ => None,
		}
	}

	/// Returns the nested element mutably, if this node is one.
	pub fn as_element_mut(&mut self) -> Option<&mut Element> {
		match self {
			Self::Element(element) => Some(element),
			_ => None,
		}
	}

	fn render_into(&self, output: &mut String, renderer: &Renderer) {
		match self {
			Self::Text(html) => output.push_str(html),
			Self::Element(element) => element.render_into(output, renderer),
			Self::Empty => {}
		}
	}
}

/// Conversion into a [`ChildNode`].
pub trait IntoChild {
	/// Converts `self` into a child node.
	fn into_child(self) -> ChildNode;
}

impl IntoChild for ChildNode {
	fn into_child(self) -> ChildNode {
		self
	}
}

impl IntoChild for Element {
	fn into_child(self) -> ChildNode {
		ChildNode::Element(self)
	}
}

impl IntoChild for String {
	fn into_child(self) -> ChildNode {
		ChildNode::Text(self)
	}
}

impl IntoChild for &str {
	fn into_child(self) -> ChildNode {
		ChildNode::Text(self.to_string())
	}
}

impl IntoChild for &String {
	fn into_child(self) -> ChildNode {
		ChildNode::Text(self.clone())
	}
}

impl<T: IntoChild> IntoChild for Option<T> {
	fn into_child(self) -> ChildNode {
		match self {
			Some(child) => child.into_child(),
			None => ChildNode::Empty,
		}
	}
}

impl IntoChild for () {
	fn into_child(self) -> ChildNode {
		ChildNode::Empty
	}
}

/// A node of the markup tree.
///
/// Attribute cells are created lazily on first access to a name, using the
/// element's [`AttributeRegistry`] to pick their behavior. Child elements
/// built with [`Element::new`] use the shared registry; call
/// [`Element::with_registry`] to use a custom one.
#[derive(Debug, Clone)]
pub struct Element {
	tag: String,
	attributes: IndexMap<String, Attribute>,
	children: Vec<ChildNode>,
	registry: Arc<AttributeRegistry>,
}

impl Element {
	/// Creates an element. `tag` may use selector syntax (`div.card#main`);
	/// it is parsed and sanitized at render time.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: IndexMap::new(),
			children: Vec::new(),
			registry: AttributeRegistry::shared(),
		}
	}

	/// Creates an element with initial attributes and children.
	pub fn from_parts<I, C>(tag: impl Into<String>, attributes: Attributes, children: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: IntoChild,
	{
		let mut element = Self::new(tag);
		for (name, value) in attributes {
			element.set_attribute(&name, value);
		}
		element.children(children)
	}

	/// Creates a fragment holding `children`.
	pub fn fragment<I, C>(children: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: IntoChild,
	{
		Self::new("").children(children)
	}

	/// Replaces the registry used to create attribute cells from now on.
	pub fn with_registry(mut self, registry: Arc<AttributeRegistry>) -> Self {
		self.registry = registry;
		self
	}

	/// Sets an attribute, consuming and returning the element.
	pub fn attr(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
		self.set_attribute(name, value);
		self
	}

	/// Appends a child, consuming and returning the element.
	pub fn child(mut self, child: impl IntoChild) -> Self {
		self.append_child(child);
		self
	}

	/// Appends several children, consuming and returning the element.
	pub fn children<I, C>(mut self, children: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: IntoChild,
	{
		self.children
			.extend(children.into_iter().map(IntoChild::into_child));
		self
	}

	/// The raw tag, as given (possibly in selector syntax).
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Replaces the tag. Setting an empty tag turns the element into a
	/// fragment and discards its attributes.
	pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
		self.tag = tag.into();
		if self.is_fragment() && !self.attributes.is_empty() {
			tracing::debug!("element became a fragment, discarding attributes");
			self.attributes.clear();
		}
		self
	}

	/// Turns the element into a fragment.
	pub fn clear_tag(&mut self) -> &mut Self {
		self.set_tag("")
	}

	/// Whether this element is a fragment (its tag is empty or blank).
	pub fn is_fragment(&self) -> bool {
		self.tag.trim().is_empty()
	}

	/// The children in order.
	pub fn child_nodes(&self) -> &[ChildNode] {
		&self.children
	}

	/// The children, mutably.
	pub fn child_nodes_mut(&mut self) -> &mut Vec<ChildNode> {
		&mut self.children
	}

	/// Appends a child.
	pub fn append_child(&mut self, child: impl IntoChild) -> &mut Self {
		self.children.push(child.into_child());
		self
	}

	/// Prepends a child.
	pub fn prepend_child(&mut self, child: impl IntoChild) -> &mut Self {
		self.children.insert(0, child.into_child());
		self
	}

	/// Removes all children.
	pub fn empty(&mut self) -> &mut Self {
		self.children.clear();
		self
	}

	/// Places `node` after this element.
	///
	/// On a fragment, `node` is simply appended. Otherwise this element is
	/// turned into a fragment whose children are a copy of its previous
	/// state followed by `node`; the copy is returned. References to `self`
	/// now denote the fragment, not the original element.
	///
	/// ```
	/// use reinhardt_markup::Element;
	///
	/// let mut title = Element::new("header").child("Title");
	/// if let Some(moved) = title.insert_after(Element::new("hr")) {
	/// 	moved.add_class("heading");
	/// }
	/// assert!(title.is_fragment());
	/// assert_eq!(title.render(), r#"<header class="heading">Title</header><hr />"#);
	/// ```
	pub fn insert_after(&mut self, node: impl IntoChild) -> Option<&mut Element> {
		if self.is_fragment() {
			self.children.push(node.into_child());
			return None;
		}
		let moved = self.detach();
		self.children = vec![ChildNode::Element(moved), node.into_child()];
		self.children.first_mut().and_then(ChildNode::as_element_mut)
	}

	/// Places `node` before this element.
	///
	/// The mirror image of [`Element::insert_after`]: on a fragment `node`
	/// is prepended, otherwise the children become `node` followed by a
	/// copy of this element, which is returned.
	pub fn insert_before(&mut self, node: impl IntoChild) -> Option<&mut Element> {
		if self.is_fragment() {
			self.children.insert(0, node.into_child());
			return None;
		}
		let moved = self.detach();
		self.children = vec![node.into_child(), ChildNode::Element(moved)];
		self.children.get_mut(1).and_then(ChildNode::as_element_mut)
	}

	// Moves tag, attributes and children into a new element, leaving a
	// fragment behind.
	fn detach(&mut self) -> Element {
		tracing::debug!(tag = %self.tag, "converting element into a fragment");
		Element {
			tag: mem::take(&mut self.tag),
			attributes: mem::take(&mut self.attributes),
			children: mem::take(&mut self.children),
			registry: Arc::clone(&self.registry),
		}
	}

	/// Sets an attribute, creating its cell if needed. Ignored on fragments.
	pub fn set_attribute(&mut self, name: &str, value: impl Into<AttrValue>) -> &mut Self {
		if let Some(cell) = self.attribute_mut(name) {
			cell.set(value);
		}
		self
	}

	/// Installs an explicitly constructed cell under `name`, replacing any
	/// existing one in place. Ignored on fragments.
	pub fn set_attribute_instance(&mut self, name: &str, attribute: Attribute) -> &mut Self {
		if self.is_fragment() {
			tracing::warn!(name, "attributes cannot be set on a fragment, ignoring");
			return self;
		}
		self.attributes.insert(name.to_string(), attribute);
		self
	}

	/// Removes the cell for `name`, returning it.
	pub fn delete_attribute(&mut self, name: &str) -> Option<Attribute> {
		self.attributes.shift_remove(name)
	}

	/// Replaces the cell for `name` with a fresh one holding the zero value.
	/// An existing cell keeps its position.
	pub fn reset_attribute(&mut self, name: &str) -> &mut Self {
		if self.is_fragment() {
			return self;
		}
		let fresh = self.registry.build(name);
		self.attributes.insert(name.to_string(), fresh);
		self
	}

	/// Whether a cell exists for `name`, whatever its value.
	pub fn has_attribute_name(&self, name: &str) -> bool {
		self.attributes.contains_key(name)
	}

	/// The cell for `name`, if one exists.
	pub fn attribute(&self, name: &str) -> Option<&Attribute> {
		self.attributes.get(name)
	}

	/// The cell for `name`, created if missing. `None` on fragments.
	pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
		if self.is_fragment() {
			tracing::warn!(name, "attributes cannot be set on a fragment, ignoring");
			return None;
		}
		let registry = &self.registry;
		Some(
			self.attributes
				.entry(name.to_string())
				.or_insert_with(|| registry.build(name)),
		)
	}

	/// The value of `name`, or the zero value of a fresh cell if there is
	/// none. No cell is stored.
	pub fn get_attribute(&self, name: &str) -> AttrValue {
		match self.attributes.get(name) {
			Some(cell) => cell.get(),
			None => self.registry.build(name).get(),
		}
	}

	/// Dispatches an operation to the cell for `name`, creating it if
	/// needed. Returns [`Outcome::Skipped`] on fragments.
	pub fn invoke_attribute(
		&mut self,
		name: &str,
		operation: Operation,
		args: Vec<AttrValue>,
	) -> Result<Outcome> {
		match self.attribute_mut(name) {
			Some(cell) => cell.invoke(operation, args),
			None => Ok(Outcome::Skipped),
		}
	}

	/// Adds to a compound attribute. No-op if the attribute has no `add`.
	pub fn compound_add(&mut self, name: &str, value: impl Into<AttrValue>) -> &mut Self {
		if let Some(cell) = self.attribute_mut(name) {
			cell.add(value);
		}
		self
	}

	/// Removes from a compound attribute, returning whether anything was
	/// removed.
	pub fn compound_remove(&mut self, name: &str, value: impl Into<AttrValue>) -> bool {
		self.attributes
			.get_mut(name)
			.and_then(|cell| cell.remove(value))
			.unwrap_or(false)
	}

	/// Tests membership in a compound attribute.
	pub fn compound_has(&self, name: &str, value: impl Into<AttrValue>) -> bool {
		self.attributes
			.get(name)
			.and_then(|cell| cell.has(value))
			.unwrap_or(false)
	}

	/// Appends a class token.
	pub fn add_class(&mut self, class: impl Into<AttrValue>) -> &mut Self {
		self.compound_add("class", class)
	}

	/// Removes the first occurrence of a class token.
	pub fn remove_class(&mut self, class: impl Into<AttrValue>) -> bool {
		self.compound_remove("class", class)
	}

	/// Whether a class token is present.
	pub fn has_class(&self, class: impl Into<AttrValue>) -> bool {
		self.compound_has("class", class)
	}

	/// Appends a style declaration.
	pub fn add_style(&mut self, declaration: impl Into<AttrValue>) -> &mut Self {
		self.compound_add("style", declaration)
	}

	/// Attribute values in insertion order, as read from each cell.
	pub fn compile_attributes(&self) -> Attributes {
		self.attributes
			.iter()
			.map(|(name, cell)| (name.clone(), cell.get()))
			.collect()
	}

	/// The opening tag, or `""` for a fragment.
	pub fn open_tag(&self) -> String {
		self.open_tag_with(&RenderOptions::default())
	}

	/// [`Element::open_tag`] with the given options.
	pub fn open_tag_with(&self, options: &RenderOptions) -> String {
		let mut output = String::new();
		if !self.is_fragment() {
			let (tag, attributes) = prepare_tag(&self.tag, self.compile_attributes());
			Renderer::with_options(options.clone()).write_open(&mut output, &tag, &attributes);
		}
		output
	}

	/// The closing tag, or `""` for a fragment or self-closing tag.
	pub fn close_tag(&self) -> String {
		self.close_tag_with(&RenderOptions::default())
	}

	/// [`Element::close_tag`] with the given options.
	pub fn close_tag_with(&self, options: &RenderOptions) -> String {
		if self.is_fragment() {
			return String::new();
		}
		Renderer::with_options(options.clone()).close(&self.tag)
	}

	/// The rendered children.
	pub fn inner_html(&self) -> String {
		self.inner_html_with(&RenderOptions::default())
	}

	/// [`Element::inner_html`] with the given options.
	pub fn inner_html_with(&self, options: &RenderOptions) -> String {
		let renderer = Renderer::with_options(options.clone());
		let mut output = String::new();
		self.render_children(&mut output, &renderer);
		output
	}

	/// Renders the tree with default options.
	pub fn render(&self) -> String {
		self.render_with(&RenderOptions::default())
	}

	/// Renders the tree with the given options.
	///
	/// The whole tree is written into a single buffer.
	pub fn render_with(&self, options: &RenderOptions) -> String {
		let renderer = Renderer::with_options(options.clone());
		let mut output = String::new();
		self.render_into(&mut output, &renderer);
		output
	}

	fn render_children(&self, output: &mut String, renderer: &Renderer) {
		for child in &self.children {
			child.render_into(output, renderer);
		}
	}

	fn render_into(&self, output: &mut String, renderer: &Renderer) {
		if self.is_fragment() {
			self.render_children(output, renderer);
			return;
		}
		let (tag, attributes) = prepare_tag(&self.tag, self.compile_attributes());
		renderer.write_open(output, &tag, &attributes);
		self.render_children(output, renderer);
		renderer.write_close(output, &tag);
	}
}

impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}
