//! Editing modes that scope bindings.

use std::fmt;
use std::str::FromStr;

use crate::error::KeymapError;

/// Editing mode a binding table is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
	Normal,
	Insert,
	/// Characterwise visual selection.
	Visual,
	/// Linewise visual selection.
	VisualLine,
	/// Blockwise visual selection.
	VisualBlock,
	/// Waiting for a motion after an operator (`d`, `c`, `y`, ...).
	OperatorPending,
}

impl Mode {
	/// Every supported mode.
	pub const ALL: [Mode; 6] = [
		Mode::Normal,
		Mode::Insert,
		Mode::Visual,
		Mode::VisualLine,
		Mode::VisualBlock,
		Mode::OperatorPending,
	];

	/// Returns true for the visual family of modes.
	pub fn is_visual(self) -> bool {
		matches!(self, Mode::Visual | Mode::VisualLine | Mode::VisualBlock)
	}

	/// Returns the canonical config name of this mode.
	pub fn name(self) -> &'static str {
		match self {
			Mode::Normal => "normal",
			Mode::Insert => "insert",
			Mode::Visual => "visual",
			Mode::VisualLine => "visual-line",
			Mode::VisualBlock => "visual-block",
			Mode::OperatorPending => "operator-pending",
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Mode {
	type Err = KeymapError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		// Single-letter aliases are case-sensitive (`v` vs `V`).
		match s.trim() {
			"n" => return Ok(Mode::Normal),
			"i" => return Ok(Mode::Insert),
			"v" | "x" => return Ok(Mode::Visual),
			"V" => return Ok(Mode::VisualLine),
			"o" => return Ok(Mode::OperatorPending),
			_ => {}
		}

		match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
			"normal" => Ok(Mode::Normal),
			"insert" => Ok(Mode::Insert),
			"visual" => Ok(Mode::Visual),
			"visual-line" => Ok(Mode::VisualLine),
			"visual-block" => Ok(Mode::VisualBlock),
			"operator-pending" => Ok(Mode::OperatorPending),
			_ => Err(KeymapError::UnknownMode(s.to_string())),
		}
	}
}
