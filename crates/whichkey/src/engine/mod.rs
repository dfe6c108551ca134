//! Host-facing which-key facade.
//!
//! [`WhichKey`] owns the configuration, the resolved group table, the
//! disclosure scheduler, and the repeat slot for one host session. The host
//! feeds it the remapping engine's classification of each keystroke through
//! [`WhichKey::handle_signal`] (or calls the individual entry points) and
//! drives the debounce timer from its event loop with
//! [`WhichKey::poll_timer`].

use std::time::Instant;

use keyhint_keymap::{ActionSummary, Binding, BindingSource, KeySeq, Mode};
use tracing::{debug, trace};

use crate::completion::{CompletionBuilder, CompletionEntry};
use crate::config::WhichKeyConfig;
use crate::group::GroupTable;
use crate::presenter::Presenter;
use crate::repeat::RepeatTracker;
use crate::scheduler::{DisclosureScheduler, DisclosureState};


/// The remapping engine's verdict on the keys typed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapSignal<'a> {
	/// The typed keys are a strict prefix of at least one binding.
	SequenceStillExtendable,
	/// The typed keys matched `binding`, which has been executed.
	DefiniteMatchExecuted(&'a Binding),
	/// The remapping engine found nothing for the typed keys.
	DefiniteNoMatch,
}

/// What the host should do with its pending key buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOutcome {
	/// Keep buffering; more keys may complete a binding.
	KeepWaiting,
	/// The sequence is finished; reset the buffer.
	Resolved,
}

/// Completion and disclosure engine for one host session.
#[derive(Debug)]
pub struct WhichKey<S: BindingSource, P: Presenter> {
	source: S,
	config: WhichKeyConfig,
	groups: GroupTable,
	scheduler: DisclosureScheduler<P>,
	repeat: RepeatTracker,
}

impl<S: BindingSource, P: Presenter> WhichKey<S, P> {
	pub fn new(source: S, presenter: P, config: WhichKeyConfig) -> Self {
		let groups = GroupTable::new(&config.group_labels);
		debug!(
			enabled = config.enabled,
			delay = ?config.delay,
			groups = groups.len(),
			"Which-key engine created"
		);
		Self {
			source,
			config,
			groups,
			scheduler: DisclosureScheduler::new(presenter),
			repeat: RepeatTracker::new(),
		}
	}

	pub fn config(&self) -> &WhichKeyConfig {
		&self.config
	}

	/// Replaces the configuration and re-resolves group labels.
	///
	/// A pending timer is kept; whether it may still render is decided by the
	/// new `enabled` flag when it fires.
	pub fn set_config(&mut self, config: WhichKeyConfig) {
		self.groups = GroupTable::new(&config.group_labels);
		debug!(enabled = config.enabled, groups = self.groups.len(), "Which-key configuration replaced");
		self.config = config;
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	pub fn presenter(&self) -> &P {
		self.scheduler.presenter()
	}

	pub fn presenter_mut(&mut self) -> &mut P {
		self.scheduler.presenter_mut()
	}

	pub fn state(&self) -> &DisclosureState {
		self.scheduler.state()
	}

	/// Returns the sorted completion entries for `prefix` in `mode`.
	pub fn completions(&self, mode: Mode, prefix: &KeySeq) -> Vec<CompletionEntry> {
		CompletionBuilder::new(&self.source, &self.groups).build(mode, prefix)
	}

	/// Returns true if some binding could still complete `prefix`.
	///
	/// Lets the host override a definitive "no match" from its own action
	/// resolver while a longer user binding is still reachable.
	pub fn has_pending_completions(&self, mode: Mode, prefix: &KeySeq) -> bool {
		CompletionBuilder::new(&self.source, &self.groups).has_completions(mode, prefix)
	}

	/// Schedules a disclosure for `prefix`, measured from now.
	pub fn request_disclosure(&mut self, mode: Mode, prefix: &KeySeq) {
		self.request_disclosure_at(Instant::now(), mode, prefix);
	}

	/// Schedules a disclosure for `prefix`, measured from `now`.
	///
	/// Does nothing while disabled. Otherwise replaces any pending timer; when
	/// nothing can complete `prefix` the disclosure is retracted instead.
	pub fn request_disclosure_at(&mut self, now: Instant, mode: Mode, prefix: &KeySeq) {
		if !self.config.enabled {
			trace!(%prefix, "Which-key disabled; ignoring disclosure request");
			return;
		}
		let entries = self.completions(mode, prefix);
		self.scheduler.request_at(now, prefix.clone(), entries, self.config.delay);
	}

	/// Cancels any pending timer and clears a visible disclosure. Idempotent.
	pub fn cancel_disclosure(&mut self) {
		self.scheduler.cancel();
	}

	/// Fires the disclosure timer if it is due. Returns true if it rendered.
	pub fn poll_timer(&mut self) -> bool {
		self.poll_timer_at(Instant::now())
	}

	pub fn poll_timer_at(&mut self, now: Instant) -> bool {
		self.scheduler.poll_at(now, self.config.enabled)
	}

	/// Instant at which the host should next call [`poll_timer`](Self::poll_timer).
	pub fn next_deadline(&self) -> Option<Instant> {
		self.scheduler.next_deadline()
	}

	/// Remembers `binding` for the repeat trigger if it is repeatable.
	pub fn record_repeatable(&mut self, binding: &Binding) -> bool {
		self.repeat.record(binding)
	}

	pub fn fetch_repeatable(&self) -> Option<&ActionSummary> {
		self.repeat.fetch()
	}

	/// Whether the host should honor the repeat trigger.
	pub fn repeat_trigger_enabled(&self) -> bool {
		self.config.repeat_trigger_enabled
	}

	/// Routes a remapping-engine signal for the keys typed so far.
	pub fn handle_signal(&mut self, mode: Mode, prefix: &KeySeq, signal: RemapSignal<'_>) -> SignalOutcome {
		self.handle_signal_at(Instant::now(), mode, prefix, signal)
	}

	pub fn handle_signal_at(
		&mut self,
		now: Instant,
		mode: Mode,
		prefix: &KeySeq,
		signal: RemapSignal<'_>,
	) -> SignalOutcome {
		trace!(%mode, %prefix, ?signal, "Remap signal");
		match signal {
			RemapSignal::SequenceStillExtendable => {
				self.request_disclosure_at(now, mode, prefix);
				SignalOutcome::KeepWaiting
			}
			RemapSignal::DefiniteMatchExecuted(binding) => {
				self.record_repeatable(binding);
				self.cancel_disclosure();
				SignalOutcome::Resolved
			}
			RemapSignal::DefiniteNoMatch if self.has_pending_completions(mode, prefix) => {
				self.request_disclosure_at(now, mode, prefix);
				SignalOutcome::KeepWaiting
			}
			RemapSignal::DefiniteNoMatch => {
				self.cancel_disclosure();
				SignalOutcome::Resolved
			}
		}
	}

	/// Cancels the timer and clears the presenter. Idempotent; also runs on drop.
	pub fn shutdown(&mut self) {
		self.scheduler.shutdown();
	}
}
