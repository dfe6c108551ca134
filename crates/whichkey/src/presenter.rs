//! Output surface contract for disclosures.

use crate::completion::CompletionEntry;
use crate::error::PresenterError;

/// A non-focus-stealing surface that shows completion entries.
///
/// Implementations must never take input focus. Repeated [`render`] calls
/// before a [`clear`] replace the previous content.
///
/// [`render`]: Presenter::render
/// [`clear`]: Presenter::clear
pub trait Presenter {
	/// Shows `entries` under `title` (the typed prefix).
	fn render(&mut self, title: &str, entries: &[CompletionEntry]) -> Result<(), PresenterError>;

	/// Hides the surface.
	fn clear(&mut self) -> Result<(), PresenterError>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
	fn render(&mut self, title: &str, entries: &[CompletionEntry]) -> Result<(), PresenterError> {
		(**self).render(title, entries)
	}

	fn clear(&mut self) -> Result<(), PresenterError> {
		(**self).clear()
	}
}

/// Formats entries as aligned plain-text lines for line-oriented surfaces.
///
/// Labels are padded to the widest label; grouped entries that were not
/// collapsed get their group appended in brackets.
pub fn format_lines(entries: &[CompletionEntry]) -> Vec<String> {
	let width = entries.iter().map(|e| e.label.chars().count()).max().unwrap_or(0);

	entries
		.iter()
		.map(|e| {
			let pad = width - e.label.chars().count();
			let mut line = format!("{}{}  {}", e.label, " ".repeat(pad), e.description);
			if let Some(group) = &e.group
				&& group != &e.description
			{
				line.push_str(&format!(" [{group}]"));
			}
			line
		})
		.collect()
}
