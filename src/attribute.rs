//! Attribute value cells.
//!
//! An [`Attribute`] pairs a name with a behavior set chosen once, at
//! construction, by looking the name up in an [`AttributeRegistry`]. Every
//! behavior supports `get` and `set`; compound attributes add optional
//! capabilities on top:
//!
//! | Name      | Behavior        | Optional capabilities |
//! |-----------|-----------------|-----------------------|
//! | `class`   | [`ClassList`]   | `add`, `remove`, `has` |
//! | `style`   | [`StyleList`]   | `add` |
//! | any other | [`ScalarValue`] | none |
//!
//! Invoking a missing optional capability is a no-op. Custom behaviors
//! registered by callers can expose further named operations through
//! [`AttributeBehavior::call`]; invoking one that does not exist fails
//! with [`MarkupError::UnsupportedOperation`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::{MarkupError, Result};
use crate::value::AttrValue;

/// An operation that can be dispatched to an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Read the value. Always supported.
	Get,
	/// Replace the value. Always supported.
	Set,
	/// Add to a compound value.
	Add,
	/// Remove from a compound value.
	Remove,
	/// Test membership in a compound value.
	Has,
	/// Restore the zero value.
	Reset,
	/// A behavior-specific named operation.
	Custom(String),
}

impl Operation {
	/// The operation's name.
	pub fn name(&self) -> &str {
		match self {
			Self::Get => "get",
			Self::Set => "set",
			Self::Add => "add",
			Self::Remove => "remove",
			Self::Has => "has",
			Self::Reset => "reset",
			Self::Custom(name) => name,
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Result of [`Attribute::invoke`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	/// The operation produced a value (`get`).
	Value(AttrValue),
	/// The operation answered a yes/no question (`remove`, `has`).
	Flag(bool),
	/// The operation ran and has nothing to report.
	Done,
	/// The capability is absent; nothing happened.
	Skipped,
}

/// The capability interface shared by all attribute behaviors.
///
/// `get` and `set` are mandatory. Optional capabilities are advertised
/// through [`supports`](AttributeBehavior::supports); their default bodies
/// are never reached through [`Attribute`] unless advertised.
pub trait AttributeBehavior: fmt::Debug + Send + Sync {
	/// Returns a value directly embeddable as an attribute string.
	fn get(&self) -> AttrValue;

	/// Replaces the stored value.
	fn set(&mut self, value: AttrValue);

	/// Whether the behavior implements `operation`.
	fn supports(&self, operation: &Operation) -> bool {
		matches!(operation, Operation::Get | Operation::Set)
	}

	/// Adds to a compound value.
	fn add(&mut self, value: AttrValue) {
		let _ = value;
	}

	/// Removes from a compound value, returning whether anything was found.
	fn remove(&mut self, value: &AttrValue) -> bool {
		let _ = value;
		false
	}

	/// Tests membership in a compound value.
	fn has(&self, value: &AttrValue) -> bool {
		let _ = value;
		false
	}

	/// Restores the zero value.
	fn reset(&mut self) {}

	/// Runs a behavior-specific named operation, or returns `None` if the
	/// behavior has no such operation.
	fn call(&mut self, operation: &str, args: Vec<AttrValue>) -> Option<Outcome> {
		let _ = (operation, args);
		None
	}

	/// Clones the behavior behind a box.
	fn clone_box(&self) -> Box<dyn AttributeBehavior>;
}

/// Plain value cell: `get` returns what `set` stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarValue {
	value: AttrValue,
}

impl AttributeBehavior for ScalarValue {
	fn get(&self) -> AttrValue {
		self.value.clone()
	}

	fn set(&mut self, value: AttrValue) {
		self.value = value;
	}

	fn clone_box(&self) -> Box<dyn AttributeBehavior> {
		Box::new(self.clone())
	}
}

/// Space-separated class tokens.
///
/// Stored as a string, in insertion order, without de-duplication. `has`
/// and `remove` match whole tokens only: `btn` never matches inside
/// `btn-lg`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
	value: String,
}

impl ClassList {
	/// The raw token string.
	pub fn as_str(&self) -> &str {
		&self.value
	}

	fn padded(&self) -> String {
		format!(" {} ", self.value)
	}
}

// Unsanitized token text; sanitization happens at render time.
fn class_text(value: &AttrValue) -> String {
	let join = |tokens: Vec<String>| {
		tokens
			.into_iter()
			.filter(|t| !t.is_empty())
			.collect::<Vec<_>>()
			.join(" ")
	};

	match value {
		AttrValue::List(items) => join(
			items
				.iter()
				.filter(|item| item.is_truthy())
				.map(class_text)
				.collect(),
		),
		AttrValue::Map(entries) => join(
			entries
				.iter()
				.filter(|(_, flag)| flag.is_truthy())
				.map(|(token, flag)| {
					if token.is_empty() {
						class_text(flag)
					} else {
						token.clone()
					}
				})
				.collect(),
		),
		AttrValue::Bool(_) => String::new(),
		other => other.to_attr_string(),
	}
}

impl AttributeBehavior for ClassList {
	fn get(&self) -> AttrValue {
		AttrValue::Text(self.value.clone())
	}

	fn set(&mut self, value: AttrValue) {
		self.value = class_text(&value);
	}

	fn supports(&self, operation: &Operation) -> bool {
		matches!(
			operation,
			Operation::Get | Operation::Set | Operation::Add | Operation::Remove | Operation::Has
		)
	}

	fn add(&mut self, value: AttrValue) {
		let text = class_text(&value);
		let token = text.trim();
		if token.is_empty() {
			return;
		}
		if !self.value.trim().is_empty() {
			self.value.push(' ');
		}
		self.value.push_str(token);
	}

	fn remove(&mut self, value: &AttrValue) -> bool {
		let text = class_text(value);
		let token = text.trim();
		if token.is_empty() {
			return false;
		}
		let needle = format!(" {token} ");
		let padded = self.padded();
		if padded.contains(&needle) {
			self.value = padded.replacen(&needle, " ", 1).trim().to_string();
			true
		} else {
			false
		}
	}

	fn has(&self, value: &AttrValue) -> bool {
		let text = class_text(value);
		let token = text.trim();
		!token.is_empty() && self.padded().contains(&format!(" {token} "))
	}

	fn clone_box(&self) -> Box<dyn AttributeBehavior> {
		Box::new(self.clone())
	}
}

/// Semicolon-terminated style declarations.
///
/// The value always ends with exactly one `;`, except when empty. There is
/// no `remove` or `has`: declarations are not parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleList {
	value: String,
}

impl StyleList {
	/// The normalized declaration string.
	pub fn as_str(&self) -> &str {
		&self.value
	}
}

fn normalize_style(declarations: &str) -> String {
	if declarations.is_empty() {
		String::new()
	} else {
		format!("{};", declarations.trim_end_matches(';'))
	}
}

fn style_text(value: &AttrValue) -> String {
	if value.is_structured() {
		tracing::debug!("structured style values are not supported");
		String::new()
	} else {
		value.to_attr_string()
	}
}

impl AttributeBehavior for StyleList {
	fn get(&self) -> AttrValue {
		AttrValue::Text(normalize_style(&self.value))
	}

	fn set(&mut self, value: AttrValue) {
		self.value = normalize_style(&style_text(&value));
	}

	fn supports(&self, operation: &Operation) -> bool {
		matches!(operation, Operation::Get | Operation::Set | Operation::Add)
	}

	fn add(&mut self, value: AttrValue) {
		let declaration = style_text(&value);
		if !self.value.is_empty() {
			self.value = normalize_style(&self.value);
		}
		if !declaration.is_empty() {
			self.value.push_str(&normalize_style(&declaration));
		}
	}

	fn clone_box(&self) -> Box<dyn AttributeBehavior> {
		Box::new(self.clone())
	}
}

/// The behavior set of an attribute.
#[derive(Debug)]
pub enum AttributeKind {
	/// Default scalar behavior.
	Scalar(ScalarValue),
	/// `class` behavior.
	Class(ClassList),
	/// `style` behavior.
	Style(StyleList),
	/// A caller-supplied behavior.
	Custom(Box<dyn AttributeBehavior>),
}

impl AttributeKind {
	/// Wraps a caller-supplied behavior.
	pub fn custom(behavior: impl AttributeBehavior + 'static) -> Self {
		Self::Custom(Box::new(behavior))
	}

	fn behavior(&self) -> &dyn AttributeBehavior {
		match self {
			Self::Scalar(b) => b,
			Self::Class(b) => b,
			Self::Style(b) => b,
			Self::Custom(b) => b.as_ref(),
		}
	}

	fn behavior_mut(&mut self) -> &mut dyn AttributeBehavior {
		match self {
			Self::Scalar(b) => b,
			Self::Class(b) => b,
			Self::Style(b) => b,
			Self::Custom(b) => b.as_mut(),
		}
	}
}

impl Clone for AttributeKind {
	fn clone(&self) -> Self {
		match self {
			Self::Scalar(b) => Self::Scalar(b.clone()),
			Self::Class(b) => Self::Class(b.clone()),
			Self::Style(b) => Self::Style(b.clone()),
			Self::Custom(b) => Self::Custom(b.clone_box()),
		}
	}
}

/// Builds the behavior set for a registered attribute name.
pub type AttributeFactory = Arc<dyn Fn() -> AttributeKind + Send + Sync>;

static SHARED_REGISTRY: OnceLock<Arc<AttributeRegistry>> = OnceLock::new();

/// Maps attribute names to behavior sets.
///
/// Names without an entry get [`ScalarValue`]; lookups never fail.
///
/// ```
/// use reinhardt_markup::{AttributeKind, AttributeRegistry};
///
/// let registry = AttributeRegistry::new();
/// assert!(matches!(registry.build("class").kind(), AttributeKind::Class(_)));
/// assert!(matches!(registry.build("title").kind(), AttributeKind::Scalar(_)));
/// ```
#[derive(Clone)]
pub struct AttributeRegistry {
	factories: HashMap<String, AttributeFactory>,
}

impl AttributeRegistry {
	/// Creates a registry with the built-in `class` and `style` behaviors.
	pub fn new() -> Self {
		let mut registry = Self::empty();
		registry.register("class", || AttributeKind::Class(ClassList::default()));
		registry.register("style", || AttributeKind::Style(StyleList::default()));
		registry
	}

	/// Creates a registry where every name gets the scalar behavior.
	pub fn empty() -> Self {
		Self {
			factories: HashMap::new(),
		}
	}

	/// The process-wide registry holding only the built-in behaviors.
	pub fn shared() -> Arc<Self> {
		Arc::clone(SHARED_REGISTRY.get_or_init(|| Arc::new(Self::new())))
	}

	/// Registers (or replaces) the behavior set for `name`.
	pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
	where
		F: Fn() -> AttributeKind + Send + Sync + 'static,
	{
		self.factories.insert(name.into(), Arc::new(factory));
		self
	}

	/// Whether `name` has a dedicated behavior set.
	pub fn contains(&self, name: &str) -> bool {
		self.factories.contains_key(name)
	}

	/// Builds a fresh attribute cell for `name`.
	pub fn build(&self, name: &str) -> Attribute {
		let kind = match self.factories.get(name) {
			Some(factory) => factory(),
			None => AttributeKind::Scalar(ScalarValue::default()),
		};
		Attribute::new(name, kind)
	}
}

impl Default for AttributeRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for AttributeRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
		names.sort_unstable();
		f.debug_struct("AttributeRegistry")
			.field("names", &names)
			.finish()
	}
}

/// A named attribute value cell.
#[derive(Debug, Clone)]
pub struct Attribute {
	name: String,
	kind: AttributeKind,
}

impl Attribute {
	/// Creates an attribute with an explicit behavior set.
	pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
		Self {
			name: name.into(),
			kind,
		}
	}

	/// Creates an attribute whose behavior is resolved from its name using
	/// the shared registry.
	pub fn for_name(name: &str) -> Self {
		AttributeRegistry::shared().build(name)
	}

	/// Creates a scalar attribute.
	pub fn scalar(name: impl Into<String>) -> Self {
		Self::new(name, AttributeKind::Scalar(ScalarValue::default()))
	}

	/// Creates a `class` attribute.
	pub fn class_list() -> Self {
		Self::new("class", AttributeKind::Class(ClassList::default()))
	}

	/// Creates a `style` attribute.
	pub fn style_list() -> Self {
		Self::new("style", AttributeKind::Style(StyleList::default()))
	}

	/// Sets the value, consuming and returning the attribute.
	pub fn with_value(mut self, value: impl Into<AttrValue>) -> Self {
		self.set(value);
		self
	}

	/// The attribute name.
	///
	/// Inside an [`Element`](crate::Element) the map key is authoritative;
	/// this name is only used to pick the behavior set.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Renames the attribute. The behavior set is kept.
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = name.into();
	}

	/// The behavior set.
	pub fn kind(&self) -> &AttributeKind {
		&self.kind
	}

	/// Whether the behavior set implements `operation`.
	pub fn supports(&self, operation: &Operation) -> bool {
		self.kind.behavior().supports(operation)
	}

	/// Reads the value.
	pub fn get(&self) -> AttrValue {
		self.kind.behavior().get()
	}

	/// Replaces the value.
	pub fn set(&mut self, value: impl Into<AttrValue>) {
		self.kind.behavior_mut().set(value.into());
	}

	/// Adds to a compound value. No-op without an `add` capability.
	pub fn add(&mut self, value: impl Into<AttrValue>) {
		if self.check(&Operation::Add) {
			self.kind.behavior_mut().add(value.into());
		}
	}

	/// Removes from a compound value.
	///
	/// Returns `None` without a `remove` capability, otherwise whether the
	/// value was found.
	pub fn remove(&mut self, value: impl Into<AttrValue>) -> Option<bool> {
		self.check(&Operation::Remove)
			.then(|| self.kind.behavior_mut().remove(&value.into()))
	}

	/// Tests membership in a compound value.
	///
	/// Returns `None` without a `has` capability.
	pub fn has(&self, value: impl Into<AttrValue>) -> Option<bool> {
		self.check(&Operation::Has)
			.then(|| self.kind.behavior().has(&value.into()))
	}

	/// Restores the zero value. No-op without a `reset` capability.
	pub fn reset(&mut self) {
		if self.check(&Operation::Reset) {
			self.kind.behavior_mut().reset();
		}
	}

	/// Dispatches an operation by name.
	///
	/// Missing optional capabilities yield [`Outcome::Skipped`]. A custom
	/// operation the behavior does not know fails with
	/// [`MarkupError::UnsupportedOperation`]; a missing argument fails with
	/// [`MarkupError::InvalidArgument`].
	///
	/// ```
	/// use reinhardt_markup::{Attribute, AttrValue, Operation, Outcome};
	///
	/// let mut class = Attribute::class_list();
	/// class.invoke(Operation::Add, vec!["btn".into()]).unwrap();
	/// assert_eq!(
	/// 	class.invoke(Operation::Has, vec!["btn".into()]).unwrap(),
	/// 	Outcome::Flag(true)
	/// );
	/// assert!(class.invoke(Operation::Custom("toggle".into()), vec![]).is_err());
	/// ```
	pub fn invoke(&mut self, operation: Operation, args: Vec<AttrValue>) -> Result<Outcome> {
		if let Operation::Custom(name) = &operation {
			return self
				.kind
				.behavior_mut()
				.call(name, args)
				.ok_or_else(|| MarkupError::UnsupportedOperation {
					attribute: self.name.clone(),
					operation: name.clone(),
				});
		}

		if !self.check(&operation) {
			return Ok(Outcome::Skipped);
		}

		let mut args = args.into_iter();
		let behavior = self.kind.behavior_mut();
		let outcome = match operation {
			Operation::Get => Outcome::Value(behavior.get()),
			Operation::Reset => {
				behavior.reset();
				Outcome::Done
			}
			Operation::Set | Operation::Add | Operation::Remove | Operation::Has => {
				let Some(arg) = args.next() else {
					return Err(MarkupError::InvalidArgument {
						attribute: self.name.clone(),
						operation: operation.to_string(),
					});
				};
				match operation {
					Operation::Set => {
						behavior.set(arg);
						Outcome::Done
					}
					Operation::Add => {
						behavior.add(arg);
						Outcome::Done
					}
					Operation::Remove => Outcome::Flag(behavior.remove(&arg)),
					_ => Outcome::Flag(behavior.has(&arg)),
				}
			}
			Operation::Custom(_) => Outcome::Skipped,
		};
		Ok(outcome)
	}

	fn check(&self, operation: &Operation) -> bool {
		let supported = self.supports(operation);
		if !supported {
			tracing::debug!(
				attribute = %self.name,
				operation = %operation,
				"attribute has no such capability, ignoring"
			);
		}
		supported
	}
}
