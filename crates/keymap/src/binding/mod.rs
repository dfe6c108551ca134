//! Multi-key bindings and the per-mode tables that hold them.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{KeymapError, Result};
use crate::key::KeySeq;
use crate::mode::Mode;
use crate::parser::parse_seq;


/// What a binding does, as far as describing it is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionSummary {
	/// A human-readable label supplied with the binding.
	Label(String),
	/// Host command identifiers, run in order (e.g. `workbench.action.quickOpen`).
	Commands(Vec<String>),
	/// Redirect to another key sequence.
	Keys(KeySeq),
}

impl ActionSummary {
	/// Creates a label summary.
	pub fn label(label: impl Into<String>) -> Self {
		Self::Label(label.into())
	}

	/// Creates a single-command summary.
	pub fn command(id: impl Into<String>) -> Self {
		Self::Commands(vec![id.into()])
	}
}

/// A configured mapping from a multi-key sequence, scoped to a mode, to an action.
///
/// Bindings are owned by the host's remapping engine; keyhint only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
	sequence: KeySeq,
	mode: Mode,
	action: ActionSummary,
	repeatable: bool,
}

impl Binding {
	/// Creates a non-repeatable binding.
	///
	/// # Errors
	///
	/// Returns [`KeymapError::EmptySequence`] if `sequence` has no tokens.
	pub fn new(mode: Mode, sequence: KeySeq, action: ActionSummary) -> Result<Self> {
		if sequence.is_empty() {
			return Err(KeymapError::EmptySequence);
		}
		Ok(Self {
			sequence,
			mode,
			action,
			repeatable: false,
		})
	}

	/// Parses `keys` and creates a non-repeatable binding.
	pub fn parse(mode: Mode, keys: &str, action: ActionSummary) -> Result<Self> {
		let sequence = parse_seq(keys).map_err(|source| KeymapError::InvalidKeys {
			keys: keys.to_string(),
			source,
		})?;
		Self::new(mode, sequence, action)
	}

	/// Marks this binding as eligible for the repeat trigger.
	pub fn with_repeatable(mut self, repeatable: bool) -> Self {
		self.repeatable = repeatable;
		self
	}

	/// Key sequence that triggers this binding. Never empty.
	pub fn sequence(&self) -> &KeySeq {
		&self.sequence
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn action(&self) -> &ActionSummary {
		&self.action
	}

	pub fn is_repeatable(&self) -> bool {
		self.repeatable
	}
}

/// Read-only view over a host's per-mode binding tables.
pub trait BindingSource {
	/// Returns all bindings for `mode`, in table order.
	fn bindings(&self, mode: Mode) -> &[Binding];
}

impl<T: BindingSource + ?Sized> BindingSource for &T {
	fn bindings(&self, mode: Mode) -> &[Binding] {
		(**self).bindings(mode)
	}
}

impl<T: BindingSource + ?Sized> BindingSource for Box<T> {
	fn bindings(&self, mode: Mode) -> &[Binding] {
		(**self).bindings(mode)
	}
}

impl<T: BindingSource + ?Sized> BindingSource for Arc<T> {
	fn bindings(&self, mode: Mode) -> &[Binding] {
		(**self).bindings(mode)
	}
}

/// In-memory binding tables organized by mode.
///
/// Insertion order within a mode is preserved. Duplicate sequences are kept;
/// consumers decide which one wins.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
	modes: HashMap<Mode, Vec<Binding>>,
}

impl BindingSource for BindingTable {
	fn bindings(&self, mode: Mode) -> &[Binding] {
		self.modes.get(&mode).map(Vec::as_slice).unwrap_or_default()
	}
}

impl BindingTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a binding to its mode's table.
	pub fn push(&mut self, binding: Binding) {
		self.modes.entry(binding.mode()).or_default().push(binding);
	}

	/// Total number of bindings across all modes.
	pub fn len(&self) -> usize {
		self.modes.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.modes.values().all(Vec::is_empty)
	}

	/// Parses a declarative TOML binding table.
	///
	/// ```toml
	/// [[bindings]]
	/// mode = "normal"
	/// keys = "<leader>ff"
	/// label = "Find Files"
	///
	/// [[bindings]]
	/// mode = "normal"
	/// keys = "<leader>wv"
	/// keys-to = "<C-w>v"
	/// repeatable = true
	/// ```
	///
	/// Each binding sets exactly one of `label`, `commands`, or `keys-to`.
	pub fn from_toml(input: &str) -> Result<Self> {
		let doc: TableDoc = toml::from_str(input)?;
		let mut table = Self::new();

		for decl in doc.bindings {
			let mode: Mode = decl.mode.parse()?;
			let action = match (decl.label, decl.commands, decl.keys_to) {
				(Some(label), None, None) => ActionSummary::Label(label),
				(None, Some(commands), None) => ActionSummary::Commands(commands),
				(None, None, Some(target)) => {
					let seq = parse_seq(&target).map_err(|source| KeymapError::InvalidKeys {
						keys: target.clone(),
						source,
					})?;
					ActionSummary::Keys(seq)
				}
				_ => return Err(KeymapError::AmbiguousAction { keys: decl.keys }),
			};
			table.push(Binding::parse(mode, &decl.keys, action)?.with_repeatable(decl.repeatable));
		}

		debug!(count = table.len(), "Loaded binding table");
		Ok(table)
	}

	/// Loads a declarative TOML binding table from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| KeymapError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml(&content)
	}
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDoc {
	#[serde(default)]
	bindings: Vec<BindingDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct BindingDecl {
	mode: String,
	keys: String,
	label: Option<String>,
	commands: Option<Vec<String>>,
	keys_to: Option<String>,
	#[serde(default)]
	repeatable: bool,
}
