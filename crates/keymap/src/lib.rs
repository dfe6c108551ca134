//! Key mapping primitives for keyhint.
//!
//! Provides the read-only view the which-key engine takes over a host's
//! multi-key bindings:
//! - Key tokens: single characters (`f`) and named keys (`<leader>`, `<C-w>`)
//! - Key sequences parsed from text such as `"<leader>ff"` or `"<leader> f f"`
//! - Editing modes and per-mode [`BindingTable`]s
//! - Declarative binding tables loaded from TOML

pub use binding::{ActionSummary, Binding, BindingSource, BindingTable};
pub use error::{KeymapError, Result};
pub use key::{KeySeq, KeyToken, join};
pub use mode::Mode;
pub use parser::{ParseError, parse_seq, parse_token};

mod binding;
mod error;
mod key;
mod mode;
pub mod parser;
