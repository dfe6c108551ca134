//! # Parser
//!
//! This module parses plain-text key sequences into [`KeySeq`]s. It accepts
//! Vim-style notation such as `"<leader>ff"`, `"<C-w>v"`, or the spaced form
//! `"<leader> f f"`.
//!
//! ## Supported Syntax
//!
//! ```text
//! sequence = (ws* token)* ws*
//! token    = named | char
//! named    = "<" name ">"
//! name     = (any char except "<", ">" and whitespace)+
//! char     = any non-whitespace char
//! ```
//!
//! A `<` that is not closed by `>` before whitespace or end of input is an
//! ordinary character token.

use crate::key::{KeySeq, KeyToken};


/// Represents an error that occurred during parsing.
#[derive(Debug, PartialEq, Clone, thiserror::Error)]
#[error("Parse error at position {position}: {message}")]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

/// Maintains the parser's state for recursive descent parsing.
struct Parser<'a> {
	/// The input remaining to be parsed.
	input: &'a str,
	/// Current byte position in the original input.
	position: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	/// Peeks at the next character without consuming it.
	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	/// Consumes and returns the next character, advancing the parser.
	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.position += ch.len_utf8();
		self.input = &self.input[ch.len_utf8()..];
		Some(ch)
	}

	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.next();
		}
	}

	/// Attempts to parse with a fallback: restores state if parsing yields nothing.
	fn try_parse<T, F>(&mut self, f: F) -> Result<Option<T>, ParseError>
	where
		F: FnOnce(&mut Parser<'a>) -> Result<Option<T>, ParseError>,
	{
		let snapshot = (self.input, self.position);
		match f(self)? {
			Some(val) => Ok(Some(val)),
			None => {
				self.input = snapshot.0;
				self.position = snapshot.1;
				Ok(None)
			}
		}
	}

	fn error(&self, message: String) -> ParseError {
		ParseError {
			message,
			position: self.position,
		}
	}
}

/// Parses a single key token.
///
/// Accepts strings like `"f"`, `"<leader>"`, or `"<C-w>"`. Surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input holds zero or several tokens, or an
/// empty named key (`<>`).
pub fn parse_token(s: &str) -> Result<KeyToken, ParseError> {
	let mut parser = Parser::new(s);
	parser.skip_whitespace();
	let Some(token) = parse_next(&mut parser)? else {
		return Err(parser.error("expected a key".to_string()));
	};

	parser.skip_whitespace();
	if let Some(ch) = parser.peek() {
		return Err(parser.error(format!("expected end of input, found: {ch}")));
	}

	Ok(token)
}

/// Parses a key sequence into a [`KeySeq`].
///
/// # Errors
///
/// Returns a [`ParseError`] if any token is malformed.
pub fn parse_seq(s: &str) -> Result<KeySeq, ParseError> {
	let mut parser = Parser::new(s);
	let mut seq = KeySeq::new();

	loop {
		parser.skip_whitespace();
		if parser.is_end() {
			return Ok(seq);
		}
		if let Some(token) = parse_next(&mut parser)? {
			seq.push(token);
		}
	}
}

fn parse_next(parser: &mut Parser) -> Result<Option<KeyToken>, ParseError> {
	if let Some(named) = try_parse_named(parser)? {
		return Ok(Some(named));
	}
	Ok(parser.next().map(KeyToken::from))
}

/// Attempts to parse an angle-bracketed named key such as `"<leader>"`.
fn try_parse_named(parser: &mut Parser) -> Result<Option<KeyToken>, ParseError> {
	if parser.peek() != Some('<') {
		return Ok(None);
	}

	let start = parser.position;
	parser.try_parse(|p| {
		p.next();
		let mut name = String::new();
		loop {
			match p.peek() {
				Some('>') if name.is_empty() => {
					return Err(ParseError {
						message: "empty named key".to_string(),
						position: start,
					});
				}
				Some('>') => {
					p.next();
					return Ok(Some(KeyToken::new(format!("<{name}>"))));
				}
				Some(ch) if !ch.is_whitespace() && ch != '<' => {
					name.push(ch);
					p.next();
				}
				_ => return Ok(None),
			}
		}
	})
}
