//! Shared helpers for which-key integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use keyhint_keymap::{BindingTable, KeySeq, parse_seq};
use keyhint_whichkey::{CompletionEntry, Presenter, PresenterError, WhichKeyConfig, format_lines};

/// Declarative binding table used across the flow tests.
pub const BINDINGS: &str = r#"
[[bindings]]
mode = "normal"
keys = "<leader>ff"
commands = ["workbench.action.quickOpen"]

[[bindings]]
mode = "normal"
keys = "<leader>fr"
label = "Recent Files"

[[bindings]]
mode = "normal"
keys = "<leader>wv"
keys-to = "<C-w>v"

[[bindings]]
mode = "normal"
keys = "<leader>ca"
commands = ["editor.action.quickFix"]
repeatable = true

[[bindings]]
mode = "visual"
keys = "<leader>y"
label = "Yank Selection"
"#;

pub const CONFIG: &str = r#"
[whichkey]
delay-ms = 150

[whichkey.groups]
"<leader>f" = "Files"
"<leader>w" = "Windows"
"#;

/// What a presenter was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	Render { title: String, lines: Vec<String> },
	Clear,
}

/// Presenter that records every call into a shared log.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
	events: Rc<RefCell<Vec<Event>>>,
}

impl RecordingPresenter {
	pub fn events(&self) -> Vec<Event> {
		self.events.borrow().clone()
	}

	pub fn render_count(&self) -> usize {
		self.events().iter().filter(|e| matches!(e, Event::Render { .. })).count()
	}

	pub fn clear_count(&self) -> usize {
		self.events().iter().filter(|e| matches!(e, Event::Clear)).count()
	}
}

impl Presenter for RecordingPresenter {
	fn render(&mut self, title: &str, entries: &[CompletionEntry]) -> Result<(), PresenterError> {
		self.events.borrow_mut().push(Event::Render {
			title: title.to_string(),
			lines: format_lines(entries),
		});
		Ok(())
	}

	fn clear(&mut self) -> Result<(), PresenterError> {
		self.events.borrow_mut().push(Event::Clear);
		Ok(())
	}
}

pub fn bindings() -> BindingTable {
	BindingTable::from_toml(BINDINGS).expect("fixture bindings parse")
}

pub fn config() -> WhichKeyConfig {
	WhichKeyConfig::parse(CONFIG).expect("fixture config parses")
}

pub fn seq(text: &str) -> KeySeq {
	parse_seq(text).expect("fixture keys parse")
}
