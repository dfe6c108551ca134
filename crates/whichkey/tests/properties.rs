//! Property tests for completion building and debouncing.

#![allow(unused_crate_dependencies)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

use keyhint_keymap::{ActionSummary, Binding, BindingSource, BindingTable, KeySeq, KeyToken, Mode, join};
use keyhint_whichkey::{
	CompletionBuilder, CompletionEntry, GroupTable, Presenter, PresenterError, WhichKey, WhichKeyConfig,
};
use proptest::prelude::*;

const TOKENS: &[&str] = &["<leader>", "<C-w>", "a", "b", "f", "F", "."];

fn arb_token() -> impl Strategy<Value = KeyToken> {
	prop::sample::select(TOKENS).prop_map(KeyToken::from)
}

fn arb_seq(len: std::ops::Range<usize>) -> impl Strategy<Value = KeySeq> {
	prop::collection::vec(arb_token(), len).prop_map(KeySeq::from)
}

fn arb_table() -> impl Strategy<Value = BindingTable> {
	prop::collection::vec(arb_seq(1..5), 0..24).prop_map(|seqs| {
		let mut table = BindingTable::new();
		for (i, seq) in seqs.into_iter().enumerate() {
			let binding = Binding::new(Mode::Normal, seq, ActionSummary::label(format!("action {i}")))
				.expect("generated sequences are non-empty");
			table.push(binding);
		}
		table
	})
}

fn arb_groups() -> impl Strategy<Value = GroupTable> {
	prop::collection::btree_map(arb_seq(1..3).prop_map(|seq| seq.to_string()), "[A-Z][a-z]{0,6}", 0..4)
		.prop_map(|groups: BTreeMap<String, String>| GroupTable::new(&groups))
}

#[derive(Default, Clone)]
struct Renders(Rc<RefCell<Vec<String>>>);

impl Presenter for Renders {
	fn render(&mut self, title: &str, _entries: &[CompletionEntry]) -> Result<(), PresenterError> {
		self.0.borrow_mut().push(title.to_string());
		Ok(())
	}

	fn clear(&mut self) -> Result<(), PresenterError> {
		Ok(())
	}
}

proptest! {
	/// Without groups every entry is the remainder of a strictly longer binding that starts with the prefix.
	#[test]
	fn prop_entries_extend_prefix(table in arb_table(), prefix in arb_seq(0..3)) {
		let groups = GroupTable::default();
		let entries = CompletionBuilder::new(&table, &groups).build(Mode::Normal, &prefix);

		let expected: HashSet<String> = table
			.bindings(Mode::Normal)
			.iter()
			.filter_map(|b| b.sequence().strip_prefix(&prefix).map(join))
			.collect();

		prop_assert_eq!(entries.len(), expected.len());
		for entry in &entries {
			prop_assert!(expected.contains(&entry.label), "unexpected entry {:?}", entry.label);
		}
	}

	/// Building twice over the same inputs yields identical, case-folded sorted output.
	#[test]
	fn prop_build_is_idempotent_and_sorted(table in arb_table(), groups in arb_groups(), prefix in arb_seq(0..3)) {
		let builder = CompletionBuilder::new(&table, &groups);
		let first = builder.build(Mode::Normal, &prefix);
		let second = builder.build(Mode::Normal, &prefix);

		prop_assert_eq!(&first, &second);
		prop_assert!(first.windows(2).all(|w| w[0].label.to_lowercase() <= w[1].label.to_lowercase()));
		prop_assert_eq!(first.is_empty(), !builder.has_completions(Mode::Normal, &prefix));
	}

	/// Requests arriving faster than the delay render at most once, for the last prefix.
	#[test]
	fn prop_debounce_renders_last_prefix(gaps in prop::collection::vec(0u64..200, 1..8)) {
		let mut table = BindingTable::new();
		table.push(Binding::parse(Mode::Normal, "abcdefghij", ActionSummary::label("deep")).expect("valid keys"));
		let renders = Renders::default();
		let mut whichkey = WhichKey::new(table, renders.clone(), WhichKeyConfig::default());

		let delay = Duration::from_millis(200);
		let keys = ["a", "b", "c", "d", "e", "f", "g", "h", "i"];
		let mut now = Instant::now();
		for (i, gap) in gaps.iter().enumerate() {
			now += Duration::from_millis(*gap);
			prop_assert!(!whichkey.poll_timer_at(now));
			let prefix: KeySeq = keys[..=i].iter().copied().collect();
			whichkey.request_disclosure_at(now, Mode::Normal, &prefix);
		}
		let last: KeySeq = keys[..gaps.len()].iter().copied().collect();
		prop_assert!(whichkey.poll_timer_at(now + delay));
		prop_assert_eq!(renders.0.borrow().clone(), vec![last.to_string()]);
	}
}
