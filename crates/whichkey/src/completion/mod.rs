//! Completion entries for a typed key prefix.

use std::collections::HashSet;

use heck::ToTitleCase;
use keyhint_keymap::{ActionSummary, BindingSource, KeySeq, KeyToken, Mode, join};
use tracing::trace;

use crate::group::GroupTable;


/// Description used when a binding's action has nothing describable.
pub const FALLBACK_DESCRIPTION: &str = "Custom mapping";

/// Suffix marking a collapsed group entry (`f…`).
pub const GROUP_SUFFIX: char = '…';

/// One `next key → description` row of a disclosure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
	/// Keys remaining after the typed prefix, space-joined.
	pub label: String,
	pub description: String,
	/// Group the next key belongs to, if one is configured at that depth.
	pub group: Option<String>,
}

/// Builds completion entries from a binding source and group table.
pub struct CompletionBuilder<'a, S: ?Sized> {
	source: &'a S,
	groups: &'a GroupTable,
}

impl<'a, S: BindingSource + ?Sized> CompletionBuilder<'a, S> {
	pub fn new(source: &'a S, groups: &'a GroupTable) -> Self {
		Self { source, groups }
	}

	/// Returns the entries that could complete `prefix` in `mode`.
	///
	/// Only bindings strictly longer than `prefix` and starting with it
	/// contribute. The first binding wins when several share a sequence.
	/// Multi-key remainders whose next key belongs to a group collapse into a
	/// single `key…` entry labelled with the group. Entries are sorted by
	/// lowercased label in code-point order (no locale collation, so `é`
	/// sorts after `z`); the sort is stable, so labels differing only in case
	/// keep table order.
	pub fn build(&self, mode: Mode, prefix: &KeySeq) -> Vec<CompletionEntry> {
		let mut seen: HashSet<String> = HashSet::new();
		let mut collapsed: HashSet<&KeyToken> = HashSet::new();
		let mut entries = Vec::new();

		for binding in self.source.bindings(mode) {
			let Some(remaining) = binding.sequence().strip_prefix(prefix) else {
				continue;
			};
			if !seen.insert(binding.sequence().to_string()) {
				trace!(sequence = %binding.sequence(), %mode, "Skipping duplicate binding sequence");
				continue;
			}

			let next = &remaining[0];
			let group = self.groups.resolve(prefix, next);

			if remaining.len() > 1
				&& let Some(group) = group
			{
				if collapsed.insert(next) {
					entries.push(CompletionEntry {
						label: format!("{next}{GROUP_SUFFIX}"),
						description: group.to_string(),
						group: Some(group.to_string()),
					});
				}
				continue;
			}

			entries.push(CompletionEntry {
				label: join(remaining),
				description: describe(binding.action()),
				group: group.map(str::to_string),
			});
		}

		entries.sort_by_cached_key(|entry| entry.label.to_lowercase());
		entries
	}

	/// Returns true if any binding could still complete `prefix` in `mode`.
	pub fn has_completions(&self, mode: Mode, prefix: &KeySeq) -> bool {
		self.source.bindings(mode).iter().any(|binding| binding.sequence().strip_prefix(prefix).is_some())
	}
}

/// Produces the human-readable description of a binding's action.
///
/// Labels are used verbatim; command lists describe their first command,
/// title-cased (`workbench.action.quickOpen` → `Workbench Action Quick Open`);
/// redirects render as `→ <target keys>`. Anything blank or empty falls back
/// to [`FALLBACK_DESCRIPTION`].
pub fn describe(action: &ActionSummary) -> String {
	match action {
		ActionSummary::Label(label) if !label.trim().is_empty() => label.clone(),
		ActionSummary::Commands(commands) => match commands.first().map(|id| id.trim()) {
			Some(id) if !id.is_empty() => id.to_title_case(),
			_ => FALLBACK_DESCRIPTION.to_string(),
		},
		ActionSummary::Keys(target) if !target.is_empty() => format!("→ {target}"),
		ActionSummary::Label(_) | ActionSummary::Keys(_) => FALLBACK_DESCRIPTION.to_string(),
	}
}
