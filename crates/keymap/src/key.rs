//! Key tokens and key sequences.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::parser::{ParseError, parse_seq};

/// One atomic unit of a key sequence.
///
/// Either a single character (`f`) or a named key in angle brackets
/// (`<leader>`, `<C-w>`). Tokens compare by exact text; there is no case
/// folding or alias normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyToken(Arc<str>);

impl KeyToken {
	/// Creates a token from its textual form.
	pub fn new(text: impl Into<Arc<str>>) -> Self {
		Self(text.into())
	}

	/// Returns the token text.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true for angle-bracketed named keys such as `<leader>`.
	pub fn is_named(&self) -> bool {
		self.0.len() > 2 && self.0.starts_with('<') && self.0.ends_with('>')
	}
}

impl fmt::Display for KeyToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for KeyToken {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<char> for KeyToken {
	fn from(ch: char) -> Self {
		Self::new(ch.to_string())
	}
}

/// An ordered sequence of [`KeyToken`]s.
///
/// Displays as its tokens joined by a single space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySeq(SmallVec<[KeyToken; 4]>);

impl KeySeq {
	/// Creates an empty sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a sequence from text, e.g. `"<leader>ff"`.
	pub fn parse(text: &str) -> Result<Self, ParseError> {
		parse_seq(text)
	}

	/// Returns the tokens of this sequence.
	pub fn tokens(&self) -> &[KeyToken] {
		&self.0
	}

	/// Returns the number of tokens.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the sequence has no tokens.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Appends a token.
	pub fn push(&mut self, token: impl Into<KeyToken>) {
		self.0.push(token.into());
	}

	/// Returns a copy of this sequence extended by one token.
	pub fn with(&self, token: &KeyToken) -> Self {
		let mut seq = self.clone();
		seq.0.push(token.clone());
		seq
	}

	/// Returns the tokens after `prefix` if `prefix` is a strict prefix of
	/// this sequence.
	///
	/// The returned slice is never empty. Tokens are compared element-wise
	/// by exact equality.
	pub fn strip_prefix(&self, prefix: &KeySeq) -> Option<&[KeyToken]> {
		if self.len() <= prefix.len() {
			return None;
		}
		self.0.strip_prefix(prefix.tokens())
	}
}

/// Joins tokens with a single space.
pub fn join(tokens: &[KeyToken]) -> String {
	let mut out = String::new();
	for (idx, token) in tokens.iter().enumerate() {
		if idx > 0 {
			out.push(' ');
		}
		out.push_str(token.as_str());
	}
	out
}

impl fmt::Display for KeySeq {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&join(&self.0))
	}
}

impl FromStr for KeySeq {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse_seq(s)
	}
}

impl FromIterator<KeyToken> for KeySeq {
	fn from_iter<I: IntoIterator<Item = KeyToken>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<'a> FromIterator<&'a str> for KeySeq {
	fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
		Self(iter.into_iter().map(KeyToken::from).collect())
	}
}

impl From<Vec<KeyToken>> for KeySeq {
	fn from(tokens: Vec<KeyToken>) -> Self {
		Self(SmallVec::from_vec(tokens))
	}
}
