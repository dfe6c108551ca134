//! Which-key disclosure engine.
//!
//! After the user types part of a multi-key sequence, keyhint works out which
//! configured bindings could still complete it and, once typing pauses, shows
//! them on a non-focus-stealing surface.
//!
//! * [`CompletionBuilder`]: typed prefix → sorted `next key → description` entries
//! * [`GroupTable`]: user-labelled key prefixes, matched at exactly one key deeper
//! * [`DisclosureScheduler`]: debounced show/update/hide state machine
//! * [`RepeatTracker`]: last repeatable binding, for a "repeat last command" trigger
//! * [`WhichKey`]: the host-facing facade tying these together
//!
//! Time is explicit. The host's event loop polls [`WhichKey::poll_timer`]
//! (optionally sleeping until [`WhichKey::next_deadline`]); every
//! time-dependent call has an `_at` variant taking the current [`Instant`].
//!
//! [`Instant`]: std::time::Instant

pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod presenter;
pub mod repeat;
pub mod scheduler;

pub use completion::{CompletionBuilder, CompletionEntry, describe};
pub use config::{ConfigWarning, WhichKeyConfig};
pub use engine::{RemapSignal, SignalOutcome, WhichKey};
pub use error::{ConfigError, PresenterError};
pub use group::GroupTable;
pub use presenter::{Presenter, format_lines};
pub use repeat::RepeatTracker;
pub use scheduler::{DisclosureScheduler, DisclosureState, TimerHandle};
