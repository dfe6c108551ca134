//! Single-slot store for the last repeatable binding.

use keyhint_keymap::{ActionSummary, Binding};
use tracing::debug;

/// Remembers the action of the most recently executed repeatable binding.
///
/// Holds at most one action and never expires it. The host recognizes the
/// repeat trigger itself and dispatches whatever [`fetch`](Self::fetch)
/// returns.
#[derive(Debug, Clone, Default)]
pub struct RepeatTracker {
	slot: Option<ActionSummary>,
}

impl RepeatTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `binding`'s action if it is repeatable.
	///
	/// Returns true if the slot was overwritten.
	pub fn record(&mut self, binding: &Binding) -> bool {
		if !binding.is_repeatable() {
			return false;
		}
		debug!(sequence = %binding.sequence(), mode = %binding.mode(), "Recorded repeatable binding");
		self.slot = Some(binding.action().clone());
		true
	}

	pub fn fetch(&self) -> Option<&ActionSummary> {
		self.slot.as_ref()
	}
}
