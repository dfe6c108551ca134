//! Which-key configuration.
//!
//! Configuration is written in TOML under a `[whichkey]` table:
//!
//! ```toml
//! [whichkey]
//! enabled = true
//! delay-ms = 200
//! repeat-trigger = true
//!
//! [whichkey.groups]
//! "<leader>f" = "Files"
//! "<leader>w" = "Windows"
//! ```
//!
//! Malformed entries (wrong value types, negative delays, non-string group
//! labels, unknown keys) are skipped and collected in
//! [`WhichKeyConfig::warnings`]; they never fail the whole load. Only invalid
//! TOML syntax or an unreadable file is an error.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use toml::{Table, Value};
use tracing::warn;

use crate::error::{ConfigError, Result};


/// Default debounce delay before a disclosure is shown.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

/// Configuration surface for the which-key engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhichKeyConfig {
	/// Master switch for disclosures.
	pub enabled: bool,
	/// Debounce delay between the last keystroke and showing a disclosure.
	pub delay: Duration,
	/// Key-sequence prefix → group label, e.g. `"<leader>f" → "Files"`.
	pub group_labels: BTreeMap<String, String>,
	/// Whether the host should honor the "repeat last command" trigger.
	pub repeat_trigger_enabled: bool,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

impl Default for WhichKeyConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			delay: DEFAULT_DELAY,
			group_labels: BTreeMap::new(),
			repeat_trigger_enabled: true,
			warnings: Vec::new(),
		}
	}
}

/// Non-fatal warning during configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A value had the wrong type or was out of range; the default was kept.
	InvalidValue {
		/// Dotted path of the offending key.
		key: String,
		/// Description of the accepted values.
		expected: &'static str,
	},
	/// A group label was not a string; the group was ignored.
	InvalidGroupLabel {
		/// The group's key-sequence prefix.
		keys: String,
	},
	/// A key is not part of the which-key schema.
	UnknownKey {
		/// Dotted path of the unknown key.
		key: String,
	},
}

impl fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigWarning::InvalidValue { key, expected } => write!(f, "'{key}' ignored (expected {expected})"),
			ConfigWarning::InvalidGroupLabel { keys } => write!(f, "group '{keys}' ignored (label must be a string)"),
			ConfigWarning::UnknownKey { key } => write!(f, "unknown key '{key}' ignored"),
		}
	}
}

impl WhichKeyConfig {
	/// Parse a TOML document into a [`WhichKeyConfig`].
	///
	/// A document without a `[whichkey]` table yields the defaults.
	pub fn parse(input: &str) -> Result<Self> {
		let doc: Table = toml::from_str(input)?;
		let mut config = Self::default();

		match doc.get("whichkey") {
			None => {}
			Some(Value::Table(section)) => config.apply_section(section),
			Some(_) => config.warnings.push(ConfigWarning::InvalidValue {
				key: "whichkey".to_string(),
				expected: "a table",
			}),
		}

		for warning in &config.warnings {
			warn!(%warning, "Ignoring malformed which-key config entry");
		}

		Ok(config)
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}

	pub fn with_enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;
		self
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	/// Adds a group label for a key-sequence prefix.
	pub fn with_group(mut self, keys: impl Into<String>, label: impl Into<String>) -> Self {
		self.group_labels.insert(keys.into(), label.into());
		self
	}

	pub fn with_repeat_trigger(mut self, enabled: bool) -> Self {
		self.repeat_trigger_enabled = enabled;
		self
	}

	fn apply_section(&mut self, section: &Table) {
		for (key, value) in section {
			match key.as_str() {
				"enabled" => match value.as_bool() {
					Some(enabled) => self.enabled = enabled,
					None => self.invalid(key, "a boolean"),
				},
				"delay-ms" => match value.as_integer().and_then(|ms| u64::try_from(ms).ok()) {
					Some(ms) => self.delay = Duration::from_millis(ms),
					None => self.invalid(key, "a non-negative integer"),
				},
				"repeat-trigger" => match value.as_bool() {
					Some(enabled) => self.repeat_trigger_enabled = enabled,
					None => self.invalid(key, "a boolean"),
				},
				"groups" => match value.as_table() {
					Some(groups) => self.apply_groups(groups),
					None => self.invalid(key, "a table"),
				},
				_ => self.warnings.push(ConfigWarning::UnknownKey {
					key: format!("whichkey.{key}"),
				}),
			}
		}
	}

	fn apply_groups(&mut self, groups: &Table) {
		for (keys, label) in groups {
			match label.as_str() {
				Some(label) => {
					self.group_labels.insert(keys.clone(), label.to_string());
				}
				None => self.warnings.push(ConfigWarning::InvalidGroupLabel { keys: keys.clone() }),
			}
		}
	}

	fn invalid(&mut self, key: &str, expected: &'static str) {
		self.warnings.push(ConfigWarning::InvalidValue {
			key: format!("whichkey.{key}"),
			expected,
		});
	}
}
