//! Diagnostics produced by a failed parse.

use std::fmt::{self, Display};

/// Why a parse failed.
///
/// A `ParseError` is carried by [`JsonValue::Error`](super::JsonValue::Error), which is always the
/// root of the parse result and never nested inside a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
	/// The input text was empty or absent. No token was read.
	EmptyInput,
	/// A token was not admissible in the current grammar state, or the input ended while a value or a
	/// closing delimiter was still expected.
	Syntax {
		/// Name of the offending token, e.g. `"']'"` or `"end of input"`.
		token: &'static str,
		/// Byte offset where the token starts.
		start: usize,
		/// Byte offset where the token ends.
		end: usize,
	},
}

impl ParseError {
	/// Byte range of the offending token, if there was one.
	#[must_use]
	pub fn span(&self) -> Option<(usize, usize)> {
		match self {
			ParseError::EmptyInput => None,
			ParseError::Syntax { start, end, .. } => Some((*start, *end)),
		}
	}
}

impl Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ParseError::EmptyInput => write!(f, "empty string!"),
			ParseError::Syntax { token, start, end } => {
				write!(f, "syntax error: unexpected {token} at position {start}-{end}")
			}
		}
	}
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(ParseError::EmptyInput.to_string(), "empty string!");
		assert_eq!(
			ParseError::Syntax {
				token: "','",
				start: 5,
				end: 6
			}
			.to_string(),
			"syntax error: unexpected ',' at position 5-6"
		);
	}

	#[test]
	fn test_span() {
		assert_eq!(ParseError::EmptyInput.span(), None);
		let error = ParseError::Syntax {
			token: "end of input",
			start: 3,
			end: 3,
		};
		assert_eq!(error.span(), Some((3, 3)));
	}

	#[test]
	fn test_into_anyhow() {
		let error = anyhow::Error::from(ParseError::EmptyInput);
		assert_eq!(error.to_string(), "empty string!");
		assert!(error.downcast_ref::<ParseError>().is_some());
	}
}
