//! Error types for reinhardt-markup
//!
//! Sanitizing entry points never fail: bad input is stripped, not rejected.
//! The errors below cover the remaining hard failures, which are attribute
//! capability dispatch and JSON encoding of structured attribute values.

use thiserror::Error;

/// Error type for markup operations
#[derive(Debug, Error)]
pub enum MarkupError {
	/// The attribute's behavior set does not define the requested operation.
	#[error("Operation not supported: `{operation}` on attribute `{attribute}`")]
	UnsupportedOperation {
		/// Attribute the operation was invoked on.
		attribute: String,
		/// Name of the missing operation.
		operation: String,
	},

	/// An operation received an argument it cannot use.
	#[error("Invalid argument for `{operation}` on attribute `{attribute}`")]
	InvalidArgument {
		/// Attribute the operation was invoked on.
		attribute: String,
		/// Name of the operation.
		operation: String,
	},

	/// A structured attribute value could not be JSON encoded.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type for markup operations
pub type Result<T> = std::result::Result<T, MarkupError>;
