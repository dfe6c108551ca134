//! User-labelled key prefix groups.
//!
//! A group labels a key prefix such as `<leader>f` ("Files"). When the user
//! has typed `<leader>`, the candidate whose next key is `f` reports the
//! "Files" group. A group matches only at exactly one key past the typed
//! prefix, so a nested `<leader>fd` group never competes with `<leader>f`.

use std::collections::{BTreeMap, HashMap};

use keyhint_keymap::{KeySeq, KeyToken, parse_seq};
use tracing::warn;


#[derive(Debug, Clone)]
struct GroupLabel {
	label: String,
	/// Configured key text, kept for tie-breaking.
	source: String,
}

/// Parsed group labels keyed by their full key sequence.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
	groups: HashMap<KeySeq, GroupLabel>,
}

impl GroupTable {
	/// Builds a table from configured `prefix → label` associations.
	///
	/// Unparseable prefixes, empty prefixes, and blank labels are skipped with
	/// a warning. When several configured prefixes parse to the same key
	/// sequence (`"<leader>c"` and `"<leader> c"`), the longest configured
	/// text wins, then the lexicographically smaller one.
	pub fn new(configured: &BTreeMap<String, String>) -> Self {
		let mut groups: HashMap<KeySeq, GroupLabel> = HashMap::new();

		for (keys, label) in configured {
			let seq = match parse_seq(keys) {
				Ok(seq) if !seq.is_empty() => seq,
				Ok(_) => {
					warn!(keys = %keys, "Ignoring group with empty key prefix");
					continue;
				}
				Err(error) => {
					warn!(keys = %keys, %error, "Ignoring group with invalid key prefix");
					continue;
				}
			};
			if label.trim().is_empty() {
				warn!(keys = %keys, "Ignoring group with blank label");
				continue;
			}

			let candidate = GroupLabel {
				label: label.clone(),
				source: keys.clone(),
			};
			match groups.get_mut(&seq) {
				None => {
					groups.insert(seq, candidate);
				}
				Some(existing) => {
					warn!(
						prefix = %seq,
						first = %existing.source,
						second = %candidate.source,
						"Conflicting group labels for the same key prefix"
					);
					if outranks(&candidate, existing) {
						*existing = candidate;
					}
				}
			}
		}

		Self { groups }
	}

	/// Returns the label of the group one key past `prefix` via `next`.
	pub fn resolve(&self, prefix: &KeySeq, next: &KeyToken) -> Option<&str> {
		if self.groups.is_empty() {
			return None;
		}
		self.groups.get(&prefix.with(next)).map(|group| group.label.as_str())
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}
}

fn outranks(candidate: &GroupLabel, existing: &GroupLabel) -> bool {
	match candidate.source.len().cmp(&existing.source.len()) {
		std::cmp::Ordering::Greater => true,
		std::cmp::Ordering::Less => false,
		std::cmp::Ordering::Equal => candidate.source < existing.source,
	}
}
