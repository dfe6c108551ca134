//! Error types for configuration loading and presentation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading which-key configuration.
///
/// Malformed individual entries are not errors; they are skipped and
/// reported as [`ConfigWarning`](crate::ConfigWarning)s.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failure reported by a [`Presenter`](crate::Presenter).
///
/// Never propagated to the host's keystroke path; the scheduler logs it and
/// carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
	/// The output surface does not exist or has been torn down.
	#[error("presenter unavailable: {0}")]
	Unavailable(String),

	/// The output surface rejected the request.
	#[error("presenter failed: {0}")]
	Failed(String),
}
