//! Debounced disclosure scheduling.
//!
//! [`DisclosureScheduler`] decides when a disclosure reaches the
//! [`Presenter`]. Every request cancels the outstanding timer before arming a
//! new one, so at most one timer exists and only the last prefix typed within
//! a delay window is ever rendered.
//!
//! # Timers
//!
//! A timer is a deadline plus a generation id stored in
//! [`DisclosureState::Pending`]. Nothing fires on its own: the host's event
//! loop calls [`DisclosureScheduler::poll_at`] with the current instant, and
//! may use [`DisclosureScheduler::next_deadline`] to decide how long to sleep.
//! Tests drive the same entry points with synthetic instants.
//!
//! # Visibility
//!
//! Surface visibility is tracked apart from the state. A request that narrows
//! an already shown disclosure moves to `Pending` while the old content stays
//! on screen until the new timer fires; a cancel in that window still clears.
//!
//! # Presenter failures
//!
//! Presenter errors are logged and swallowed. A broken surface must never
//! block or fail the keystroke path.

use std::time::{Duration, Instant};

use keyhint_keymap::KeySeq;
use tracing::{debug, trace, warn};

use crate::completion::CompletionEntry;
use crate::presenter::Presenter;


/// Handle of the single outstanding disclosure timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
	/// Generation id, unique per scheduler.
	pub id: u64,
	/// Instant at which the timer fires. `None` if the delay overflows the
	/// clock; such a timer never fires and only a cancel or a new request
	/// releases it.
	pub deadline: Option<Instant>,
}

impl TimerHandle {
	/// Returns true once `now` has reached the deadline.
	pub fn is_due(&self, now: Instant) -> bool {
		self.deadline.is_some_and(|deadline| now >= deadline)
	}
}

/// Disclosure lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisclosureState {
	/// Nothing scheduled.
	#[default]
	Idle,
	/// A timer is armed for `prefix`.
	Pending { prefix: KeySeq, timer: TimerHandle },
	/// The disclosure for `prefix` has been rendered.
	Shown { prefix: KeySeq },
}

/// Debounced show/update/hide state machine over a [`Presenter`].
pub struct DisclosureScheduler<P: Presenter> {
	state: DisclosureState,
	/// Entries rendered when the pending timer fires.
	staged: Vec<CompletionEntry>,
	/// Whether the presenter currently holds content that needs clearing.
	visible: bool,
	next_timer_id: u64,
	presenter: P,
}

impl<P: Presenter> DisclosureScheduler<P> {
	pub fn new(presenter: P) -> Self {
		Self {
			state: DisclosureState::Idle,
			staged: Vec::new(),
			visible: false,
			next_timer_id: 0,
			presenter,
		}
	}

	pub fn state(&self) -> &DisclosureState {
		&self.state
	}

	/// Returns true while the presenter holds a disclosure.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	pub fn presenter(&self) -> &P {
		&self.presenter
	}

	pub fn presenter_mut(&mut self) -> &mut P {
		&mut self.presenter
	}

	/// Deadline of the outstanding timer, if it can ever fire.
	pub fn next_deadline(&self) -> Option<Instant> {
		match &self.state {
			DisclosureState::Pending { timer, .. } => timer.deadline,
			_ => None,
		}
	}

	/// Schedules `entries` for `prefix` to be shown after `delay`.
	///
	/// Cancels any outstanding timer first. With no entries there is nothing
	/// to disclose: the scheduler goes straight to `Idle`, clearing a visible
	/// disclosure, and arms no timer.
	pub fn request_at(&mut self, now: Instant, prefix: KeySeq, entries: Vec<CompletionEntry>, delay: Duration) {
		self.cancel_timer();

		if entries.is_empty() {
			trace!(%prefix, "No completions; retracting disclosure");
			self.retract();
			return;
		}

		let deadline = now.checked_add(delay);
		if deadline.is_none() {
			warn!(%prefix, ?delay, "Disclosure delay overflows the clock; timer will never fire");
		}
		let timer = TimerHandle {
			id: self.next_timer_id,
			deadline,
		};
		self.next_timer_id = self.next_timer_id.wrapping_add(1);

		trace!(%prefix, timer = timer.id, entries = entries.len(), ?delay, "Disclosure timer armed");
		self.staged = entries;
		self.state = DisclosureState::Pending { prefix, timer };
	}

	/// Fires the pending timer if it is due at `now`.
	///
	/// `enabled` is re-validated at fire time; a disabled engine drops the
	/// disclosure silently. Returns true if the presenter was asked to render.
	pub fn poll_at(&mut self, now: Instant, enabled: bool) -> bool {
		let (prefix, timer) = match std::mem::take(&mut self.state) {
			DisclosureState::Pending { prefix, timer } if timer.is_due(now) => (prefix, timer),
			other => {
				self.state = other;
				return false;
			}
		};
		let entries = std::mem::take(&mut self.staged);

		if !enabled {
			debug!(%prefix, timer = timer.id, "Which-key disabled; dropping pending disclosure");
			return false;
		}

		let title = prefix.to_string();
		if let Err(error) = self.presenter.render(&title, &entries) {
			warn!(%prefix, %error, "Which-key render failed");
		}
		// A failed render may have left partial content; the next cancel clears it.
		self.visible = true;
		trace!(%prefix, timer = timer.id, entries = entries.len(), "Disclosure shown");
		self.state = DisclosureState::Shown { prefix };
		true
	}

	/// Cancels any pending timer and clears a visible disclosure.
	///
	/// Always ends in `Idle`. Idempotent.
	pub fn cancel(&mut self) {
		self.cancel_timer();
		self.retract();
	}

	/// Releases the timer and presenter content. Idempotent.
	pub fn shutdown(&mut self) {
		self.cancel();
	}

	fn cancel_timer(&mut self) {
		if let DisclosureState::Pending { timer, .. } = &self.state {
			trace!(timer = timer.id, "Disclosure timer cancelled");
			self.state = DisclosureState::Idle;
			self.staged.clear();
		}
	}

	fn retract(&mut self) {
		if self.visible {
			if let Err(error) = self.presenter.clear() {
				warn!(%error, "Which-key clear failed");
			}
			self.visible = false;
		}
		self.staged.clear();
		self.state = DisclosureState::Idle;
	}
}

impl<P: Presenter> Drop for DisclosureScheduler<P> {
	fn drop(&mut self) {
		self.shutdown();
	}
}

impl<P: Presenter> std::fmt::Debug for DisclosureScheduler<P> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DisclosureScheduler")
			.field("state", &self.state)
			.field("staged", &self.staged.len())
			.field("visible", &self.visible)
			.finish()
	}
}
