//! # Reinhardt Markup
//!
//! Programmatic HTML construction: a mutable element tree whose attributes
//! know how to merge and sanitize themselves, and a serializer that turns
//! tags, attributes and inner HTML into markup.
//!
//! ## Layers
//!
//! - [`selector`]: parses `div.card#main` style tag selectors.
//! - [`value`]: [`AttrValue`], the loosely typed raw attribute value.
//! - [`sanitize`]: strips unsafe characters from tags, names and values and
//!   merges selector classes/ids into attribute maps.
//! - [`serializer`]: the strict and high-level render entry points.
//! - [`attribute`]: attribute cells with per-name behavior (`class` token
//!   lists, `style` declarations, caller-registered kinds).
//! - [`element`]: the tree itself.
//!
//! ## Example
//!
//! ```
//! use reinhardt_markup::{Element, RenderOptions};
//!
//! let mut form = Element::new("form#login").attr("method", "post");
//! form.append_child(
//! 	Element::new("input.field")
//! 		.attr("name", "email")
//! 		.attr("required", true),
//! );
//! form.add_class("compact");
//!
//! assert_eq!(
//! 	form.render(),
//! 	r#"<form method="post" class="compact" id="login"><input name="email" class="field" required /></form>"#
//! );
//! assert_eq!(
//! 	form.render_with(&RenderOptions::new().html5()),
//! 	r#"<form method="post" class="compact" id="login"><input name="email" class="field" required></form>"#
//! );
//! ```
//!
//! ## Trust boundary
//!
//! Inner HTML (string children, [`InnerHtml`] content) is never escaped: it
//! is treated as markup. Attribute values are sanitized on the high-level
//! path only; [`render_strict`] writes its input verbatim.

pub mod attribute;
pub mod element;
pub mod error;
pub mod options;
pub mod sanitize;
pub mod selector;
pub mod serializer;
pub mod value;

pub use attribute::{
	Attribute, AttributeBehavior, AttributeFactory, AttributeKind, AttributeRegistry, ClassList,
	Operation, Outcome, ScalarValue, StyleList,
};
pub use element::{ChildNode, Element, IntoChild};
pub use error::{MarkupError, Result};
pub use options::RenderOptions;
pub use sanitize::{escape_html, json_encode_for_html_attr};
pub use selector::{TagSelector, parse_tag_selector};
pub use serializer::{
	InnerHtml, Renderer, SELF_CLOSING_TAGS, StrictAttributes, StrictValue, close, is_self_closing,
	open, open_strict, render, render_strict,
};
pub use value::{AttrValue, Attributes};
