//! Rendering configuration.

use serde::{Deserialize, Serialize};

/// Options controlling how markup is serialized.
///
/// Options are carried by a [`Renderer`](crate::Renderer) or passed to
/// [`Element::render_with`](crate::Element::render_with), so two trees can
/// render with different policies side by side.
///
/// The struct deserializes with defaults for missing fields, so it can be
/// embedded in application settings:
///
/// ```
/// use reinhardt_markup::RenderOptions;
///
/// let options: RenderOptions = serde_json::from_str(r#"{"self_closing_slash": false}"#).unwrap();
/// assert!(!options.self_closing_slash);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
	/// Emit `<br />` instead of `<br>` for self-closing tags.
	pub self_closing_slash: bool,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			self_closing_slash: true,
		}
	}
}

impl RenderOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether self-closing tags get a trailing slash.
	pub fn self_closing_slash(mut self, enabled: bool) -> Self {
		self.self_closing_slash = enabled;
		self
	}

	/// Disables the trailing slash on self-closing tags (HTML5 style).
	pub fn html5(self) -> Self {
		self.self_closing_slash(false)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_emits_slash() {
		assert!(RenderOptions::default().self_closing_slash);
	}

	#[rstest]
	fn test_builder() {
		let options = RenderOptions::new().html5();
		assert!(!options.self_closing_slash);
		assert!(options.self_closing_slash(true).self_closing_slash);
	}

	#[rstest]
	fn test_deserialize_missing_fields_uses_defaults() {
		let options: RenderOptions = serde_json::from_str("{}").unwrap();
		assert_eq!(options, RenderOptions::default());
	}
}
