//! A byte-offset lexer over JSON text.
//!
//! `Lexer` scans its input left to right and hands out one [`Token`] per call to
//! [`next_token`](Lexer::next_token). It keeps no state between calls other than the cursor position.
//! Every token carries the byte range it was read from, so the parser can report exact positions.
//!
//! The lexer is narrow:
//! - the only string escape it understands is `\"`,
//! - numbers are any run of digits, `-`, `.`, `e` and `E`, and a run that is not a valid float
//!   still becomes a number token with the value `0.0`,
//! - unknown characters, unterminated strings and partial keywords become [`TokenKind::Error`].

use std::fmt::{self, Display};

/// The classification of a token, with the decoded payload for strings and numbers.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
	/// `[`
	LeftBracket,
	/// `]`
	RightBracket,
	/// `{`
	LeftBrace,
	/// `}`
	RightBrace,
	/// `,`
	Comma,
	/// `:`
	Colon,
	/// A quoted string, already unescaped for `\"`.
	String(String),
	/// A number literal.
	Number(f64),
	/// `true`
	True,
	/// `false`
	False,
	/// `null`
	Null,
	/// The cursor reached the end of the input.
	End,
	/// Malformed input at this position.
	Error,
}

impl TokenKind {
	/// A short human readable name, used in diagnostics.
	#[must_use]
	pub fn name(&self) -> &'static str {
		use TokenKind::*;
		match self {
			LeftBracket => "'['",
			RightBracket => "']'",
			LeftBrace => "'{'",
			RightBrace => "'}'",
			Comma => "','",
			Colon => "':'",
			String(_) => "string",
			Number(_) => "number",
			True => "'true'",
			False => "'false'",
			Null => "'null'",
			End => "end of input",
			Error => "invalid token",
		}
	}

	/// Whether a value can start with this token: a scalar, `{` or `[`.
	#[must_use]
	pub fn starts_value(&self) -> bool {
		use TokenKind::*;
		matches!(self, String(_) | Number(_) | True | False | Null | LeftBrace | LeftBracket)
	}
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A classified token and the byte range it covers in the source text.
///
/// For strings, `start..end` is the content between the quotes.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub start: usize,
	pub end: usize,
}

impl Token {
	fn new(kind: TokenKind, start: usize, end: usize) -> Self {
		Token { kind, start, end }
	}
}

/// Scans JSON text into tokens.
///
/// A `Lexer` borrows its input and owns nothing but a cursor, so independent lexers can run on
/// separate threads freely. A single instance is not meant to be shared.
pub struct Lexer<'a> {
	input: &'a str,
	bytes: &'a [u8],
	position: usize,
}

impl<'a> Lexer<'a> {
	/// Creates a lexer positioned at the start of `input`.
	#[must_use]
	pub fn new(input: &'a str) -> Self {
		Lexer {
			input,
			bytes: input.as_bytes(),
			position: 0,
		}
	}

	/// The current cursor position as a byte offset.
	#[must_use]
	pub fn position(&self) -> usize {
		self.position
	}

	/// Reads the next token and advances the cursor past it.
	///
	/// Once the input is exhausted every further call returns [`TokenKind::End`]. The cursor does not
	/// move past an [`TokenKind::Error`] token, so repeated calls keep reporting the same error.
	pub fn next_token(&mut self) -> Token {
		self.skip_whitespace();

		let start = self.position;
		let Some(&byte) = self.bytes.get(start) else {
			return Token::new(TokenKind::End, start, start);
		};

		match byte {
			b'[' => self.single(TokenKind::LeftBracket),
			b']' => self.single(TokenKind::RightBracket),
			b'{' => self.single(TokenKind::LeftBrace),
			b'}' => self.single(TokenKind::RightBrace),
			b',' => self.single(TokenKind::Comma),
			b':' => self.single(TokenKind::Colon),
			b'"' => self.lex_string(),
			b't' => self.lex_keyword("true", TokenKind::True),
			b'f' => self.lex_keyword("false", TokenKind::False),
			b'n' => self.lex_keyword("null", TokenKind::Null),
			b'-' | b'.' | b'0'..=b'9' => self.lex_number(),
			_ => self.error_at(start),
		}
	}

	#[inline]
	fn skip_whitespace(&mut self) {
		while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.bytes.get(self.position) {
			self.position += 1;
		}
	}

	#[inline]
	fn single(&mut self, kind: TokenKind) -> Token {
		let start = self.position;
		self.position += 1;
		Token::new(kind, start, self.position)
	}

	/// An error token covering the character at `start`. The cursor stays where it is.
	fn error_at(&self, start: usize) -> Token {
		let width = self.input[start..].chars().next().map_or(1, char::len_utf8);
		Token::new(TokenKind::Error, start, start + width)
	}

	fn lex_string(&mut self) -> Token {
		let quote = self.position;
		let start = quote + 1;

		// A quote directly preceded by a backslash does not close the string.
		let mut end = start;
		while end < self.bytes.len() && (self.bytes[end] != b'"' || self.bytes[end - 1] == b'\\') {
			end += 1;
		}

		if end >= self.bytes.len() {
			return Token::new(TokenKind::Error, quote, self.bytes.len());
		}

		// `start` follows and `end` sits on an ASCII quote, both are char boundaries.
		let text = self.input[start..end].replace("\\\"", "\"");
		self.position = end + 1;
		Token::new(TokenKind::String(text), start, end)
	}

	fn lex_number(&mut self) -> Token {
		let start = self.position;
		let mut end = start;
		while let Some(b'0'..=b'9' | b'-' | b'.' | b'e' | b'E') = self.bytes.get(end) {
			end += 1;
		}
		self.position = end;

		let literal = &self.input[start..end];
		let value = literal.parse::<f64>().unwrap_or_else(|_| {
			log::debug!("malformed number literal '{literal}' at position {start}, using 0");
			0.0
		});
		Token::new(TokenKind::Number(value), start, end)
	}

	fn lex_keyword(&mut self, keyword: &str, kind: TokenKind) -> Token {
		let start = self.position;
		if self.bytes[start..].starts_with(keyword.as_bytes()) {
			self.position += keyword.len();
			Token::new(kind, start, self.position)
		} else {
			self.error_at(start)
		}
	}
}
