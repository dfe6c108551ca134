//! End-to-end flows through the host facade, driven by synthetic instants.

use std::time::{Duration, Instant};

use keyhint_keymap::{ActionSummary, BindingSource, Mode};
use keyhint_whichkey::{DisclosureState, RemapSignal, SignalOutcome, WhichKey};
use pretty_assertions::assert_eq;

use crate::common::{self, Event, RecordingPresenter};

fn ms(n: u64) -> Duration {
	Duration::from_millis(n)
}

fn setup() -> (WhichKey<keyhint_keymap::BindingTable, RecordingPresenter>, RecordingPresenter) {
	let presenter = RecordingPresenter::default();
	let whichkey = WhichKey::new(common::bindings(), presenter.clone(), common::config());
	(whichkey, presenter)
}

#[test]
fn typing_leader_shows_grouped_disclosure() {
	let (mut whichkey, presenter) = setup();
	let t0 = Instant::now();

	let outcome = whichkey.handle_signal_at(t0, Mode::Normal, &common::seq("<leader>"), RemapSignal::SequenceStillExtendable);
	assert_eq!(outcome, SignalOutcome::KeepWaiting);
	assert!(!whichkey.poll_timer_at(t0 + ms(149)));
	assert!(whichkey.poll_timer_at(t0 + ms(150)));

	assert_eq!(
		presenter.events(),
		vec![Event::Render {
			title: "<leader>".into(),
			lines: vec!["c a  Editor Action Quick Fix".into(), "f…   Files".into(), "w…   Windows".into()],
		}]
	);
}

#[test]
fn fast_typing_only_discloses_final_prefix() {
	let (mut whichkey, presenter) = setup();
	let t0 = Instant::now();

	whichkey.handle_signal_at(t0, Mode::Normal, &common::seq("<leader>"), RemapSignal::SequenceStillExtendable);
	whichkey.poll_timer_at(t0 + ms(5));
	whichkey.handle_signal_at(t0 + ms(5), Mode::Normal, &common::seq("<leader>f"), RemapSignal::SequenceStillExtendable);
	whichkey.poll_timer_at(t0 + ms(10));

	assert_eq!(whichkey.next_deadline(), Some(t0 + ms(155)));
	assert!(whichkey.poll_timer_at(t0 + ms(160)));
	assert_eq!(
		presenter.events(),
		vec![Event::Render {
			title: "<leader> f".into(),
			lines: vec!["f  Workbench Action Quick Open".into(), "r  Recent Files".into()],
		}]
	);
}

#[test]
fn executing_a_binding_hides_disclosure_and_arms_repeat() {
	let (mut whichkey, presenter) = setup();
	let t0 = Instant::now();
	let table = common::bindings();
	let quick_fix = table
		.bindings(Mode::Normal)
		.iter()
		.find(|b| b.sequence() == &common::seq("<leader>ca"))
		.expect("fixture has <leader>ca");

	whichkey.handle_signal_at(t0, Mode::Normal, &common::seq("<leader>"), RemapSignal::SequenceStillExtendable);
	whichkey.poll_timer_at(t0 + ms(150));
	whichkey.handle_signal_at(t0 + ms(400), Mode::Normal, &common::seq("<leader>c"), RemapSignal::SequenceStillExtendable);
	let outcome = whichkey.handle_signal_at(
		t0 + ms(450),
		Mode::Normal,
		&common::seq("<leader>ca"),
		RemapSignal::DefiniteMatchExecuted(quick_fix),
	);

	assert_eq!(outcome, SignalOutcome::Resolved);
	assert_eq!(whichkey.state(), &DisclosureState::Idle);
	assert_eq!(presenter.render_count(), 1);
	assert_eq!(presenter.clear_count(), 1);
	assert!(whichkey.repeat_trigger_enabled());
	assert_eq!(whichkey.fetch_repeatable(), Some(&ActionSummary::command("editor.action.quickFix")));

	// The stale timer for `<leader>c` must not resurface.
	assert!(!whichkey.poll_timer_at(t0 + ms(1000)));
	assert_eq!(presenter.render_count(), 1);
}

#[test]
fn dead_end_prefix_resolves_without_rendering() {
	let (mut whichkey, presenter) = setup();
	let t0 = Instant::now();

	let outcome = whichkey.handle_signal_at(t0, Mode::Normal, &common::seq("<leader>q"), RemapSignal::DefiniteNoMatch);

	assert_eq!(outcome, SignalOutcome::Resolved);
	assert_eq!(whichkey.next_deadline(), None);
	assert!(presenter.events().is_empty());
}

#[test]
fn visual_mode_uses_its_own_table() {
	let (mut whichkey, presenter) = setup();
	let t0 = Instant::now();

	whichkey.request_disclosure_at(t0, Mode::Visual, &common::seq("<leader>"));
	whichkey.poll_timer_at(t0 + ms(150));

	assert_eq!(
		presenter.events(),
		vec![Event::Render {
			title: "<leader>".into(),
			lines: vec!["y  Yank Selection".into()],
		}]
	);
}

#[test]
fn redirect_bindings_describe_their_target() {
	let presenter = RecordingPresenter::default();
	let whichkey = WhichKey::new(common::bindings(), presenter, Default::default());

	let entries = whichkey.completions(Mode::Normal, &common::seq("<leader>w"));
	assert_eq!(entries.len(), 1);
	assert_eq!(entries[0].description, "→ <C-w> v");
}

#[test]
fn shutdown_clears_visible_disclosure() {
	let (mut whichkey, presenter) = setup();
	let t0 = Instant::now();

	whichkey.request_disclosure_at(t0, Mode::Normal, &common::seq("<leader>f"));
	whichkey.poll_timer_at(t0 + ms(150));
	whichkey.shutdown();
	whichkey.cancel_disclosure();

	assert_eq!(presenter.clear_count(), 1);
	assert_eq!(whichkey.state(), &DisclosureState::Idle);
}
