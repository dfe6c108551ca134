//! Error types for binding tables.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Errors that can occur when constructing or loading bindings.
#[derive(Debug, Error)]
pub enum KeymapError {
	/// A binding was declared with no keys.
	#[error("binding key sequence must not be empty")]
	EmptySequence,

	/// A key sequence string could not be parsed.
	#[error("invalid key sequence {keys:?}: {source}")]
	InvalidKeys {
		/// The offending key sequence text.
		keys: String,
		/// The underlying parse error.
		source: ParseError,
	},

	/// A mode name was not recognized.
	#[error("unknown mode: {0}")]
	UnknownMode(String),

	/// A declared binding did not name exactly one action shape.
	#[error("binding {keys:?} must set exactly one of `label`, `commands`, or `keys-to`")]
	AmbiguousAction {
		/// The key sequence of the offending binding.
		keys: String,
	},

	/// Error reading a binding file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for keymap operations.
pub type Result<T> = std::result::Result<T, KeymapError>;
