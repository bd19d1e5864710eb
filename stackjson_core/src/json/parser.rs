//! The grammar state machine that turns tokens into a value tree.
//!
//! The parser never recurses. Opening a container pushes the enclosing container and the current
//! [`ParserState`] onto two explicit stacks; closing it pops both back. Nesting depth is therefore
//! limited by heap memory only, and the whole control state can be inspected between tokens through
//! [`Parser::step`], [`Parser::state`] and [`Parser::depth`].
//!
//! Each token goes through three phases:
//! 1. the syntax check: is the token admissible in the current state ([`ParserState::admits`]),
//! 2. the dispatch: open or close a container, read an object key, or build a scalar,
//! 3. the transition: move to the next state and commit the finished value into the open container.
//!
//! The first failed check ends the parse. There is no recovery.

use super::{JsonArray, JsonObject, JsonValue, Lexer, ParseError, Token, TokenKind};

/// What the parser expects next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserState {
	/// Before the root container is opened, and again after it closed.
	None,
	/// Just after `[`.
	StartArray,
	/// Just after a `,` inside an array.
	StartArrayElement,
	/// After an array element.
	StartArrayNextElement,
	/// Just after `{`.
	StartObject,
	/// Just after a `,` inside an object.
	StartObjectElement,
	/// After an object key and its `:`. Only held between dispatch and transition.
	StartObjectKey,
	/// Expecting the value of an object field.
	StartObjectValue,
	/// After an object field.
	StartObjectNextElement,
}

impl ParserState {
	/// Whether a token of this kind may appear next.
	///
	/// The root must be a container. After `[` or `{` the container may close at once, after a `,` it
	/// may not, so trailing commas are rejected. [`TokenKind::End`] and [`TokenKind::Error`] are never
	/// admissible.
	#[must_use]
	pub fn admits(self, kind: &TokenKind) -> bool {
		match self {
			Self::None => matches!(kind, TokenKind::LeftBrace | TokenKind::LeftBracket),
			Self::StartArray => kind.starts_value() || matches!(kind, TokenKind::RightBracket),
			Self::StartArrayElement | Self::StartObjectValue => kind.starts_value(),
			Self::StartArrayNextElement => matches!(kind, TokenKind::Comma | TokenKind::RightBracket),
			Self::StartObject => matches!(kind, TokenKind::String(_) | TokenKind::RightBrace),
			Self::StartObjectElement => matches!(kind, TokenKind::String(_)),
			Self::StartObjectNextElement => matches!(kind, TokenKind::Comma | TokenKind::RightBrace),
			Self::StartObjectKey => false,
		}
	}

	fn expects_key(self) -> bool {
		matches!(self, Self::StartObject | Self::StartObjectElement)
	}
}

/// A container that is still being filled, with its own insertion cursor.
#[derive(Debug)]
enum OpenContainer {
	Array { array: JsonArray, next_index: usize },
	Object { object: JsonObject, key: Option<String> },
}

impl OpenContainer {
	fn array() -> Self {
		OpenContainer::Array {
			array: JsonArray::new(),
			next_index: 0,
		}
	}

	fn object() -> Self {
		OpenContainer::Object {
			object: JsonObject::new(),
			key: None,
		}
	}

	fn into_value(self) -> JsonValue {
		match self {
			OpenContainer::Array { array, .. } => JsonValue::Array(array),
			OpenContainer::Object { object, .. } => JsonValue::Object(object),
		}
	}
}

/// Drives a [`Lexer`] token by token and assembles the value tree.
pub struct Parser<'a> {
	lexer: Lexer<'a>,
	state: ParserState,
	/// The container currently being filled.
	open: Option<OpenContainer>,
	/// Enclosing containers, one entry per level (`None` for the level outside the root).
	containers: Vec<Option<OpenContainer>>,
	/// The state each enclosing level was in when the next container was opened.
	states: Vec<ParserState>,
}

impl<'a> Parser<'a> {
	#[must_use]
	pub fn new(input: &'a str) -> Self {
		Parser {
			lexer: Lexer::new(input),
			state: ParserState::None,
			open: None,
			containers: Vec::new(),
			states: Vec::new(),
		}
	}

	#[must_use]
	pub fn state(&self) -> ParserState {
		self.state
	}

	/// Number of containers currently open.
	#[must_use]
	pub fn depth(&self) -> usize {
		self.states.len()
	}

	/// Run to completion and return the root value, or [`JsonValue::Error`] on the first syntax error.
	///
	/// Input after the root container closes is not read.
	pub fn parse(mut self) -> JsonValue {
		loop {
			match self.step() {
				Ok(Some(root)) => return root,
				Ok(None) => {}
				Err(error) => {
					log::debug!("{error}");
					return JsonValue::Error(error);
				}
			}
		}
	}

	/// Consume one token (two for an object key and its `:`).
	///
	/// Returns `Ok(Some(root))` once the root container closes and `Ok(None)` while the document is
	/// still open. The parser is finished after it returned the root or an error.
	pub fn step(&mut self) -> Result<Option<JsonValue>, ParseError> {
		let Token { kind, start, end } = self.lexer.next_token();
		let error = ParseError::Syntax {
			token: kind.name(),
			start,
			end,
		};
		log::trace!("{kind:?} at {start}-{end} in {:?}", self.state);

		if !self.state.admits(&kind) {
			return Err(error);
		}

		let pending = match kind {
			TokenKind::LeftBracket => {
				self.open(OpenContainer::array(), ParserState::StartArray);
				return Ok(None);
			}
			TokenKind::LeftBrace => {
				self.open(OpenContainer::object(), ParserState::StartObject);
				return Ok(None);
			}
			TokenKind::RightBracket | TokenKind::RightBrace => Some(self.close().ok_or(error)?),
			TokenKind::String(key) if self.state.expects_key() => {
				self.read_key(key)?;
				self.state = ParserState::StartObjectKey;
				None
			}
			TokenKind::String(text) => Some(JsonValue::String(text)),
			TokenKind::Number(number) => Some(JsonValue::Number(number)),
			TokenKind::True => Some(JsonValue::Boolean(true)),
			TokenKind::False => Some(JsonValue::Boolean(false)),
			TokenKind::Null => Some(JsonValue::Null),
			TokenKind::Comma => None,
			TokenKind::Colon | TokenKind::End | TokenKind::Error => return Err(error),
		};

		if self.state == ParserState::None {
			return pending.map(Some).ok_or(error);
		}

		self.state = self.transition(pending).ok_or(error)?;
		Ok(None)
	}

	fn open(&mut self, container: OpenContainer, state: ParserState) {
		self.containers.push(self.open.replace(container));
		self.states.push(self.state);
		self.state = state;
	}

	fn close(&mut self) -> Option<JsonValue> {
		let closed = self.open.take()?;
		self.open = self.containers.pop()?;
		self.state = self.states.pop()?;
		Some(closed.into_value())
	}

	/// Read the `:` that must follow an object key and remember the key for the coming value.
	fn read_key(&mut self, key: String) -> Result<(), ParseError> {
		let Token { kind, start, end } = self.lexer.next_token();
		let error = ParseError::Syntax {
			token: kind.name(),
			start,
			end,
		};
		if !matches!(kind, TokenKind::Colon) {
			return Err(error);
		}
		match self.open.as_mut() {
			Some(OpenContainer::Object { key: slot, .. }) => {
				*slot = Some(key);
				Ok(())
			}
			_ => Err(error),
		}
	}

	fn transition(&mut self, pending: Option<JsonValue>) -> Option<ParserState> {
		use ParserState as S;
		Some(match self.state {
			S::StartArray | S::StartArrayElement => {
				self.commit(pending?)?;
				S::StartArrayNextElement
			}
			S::StartArrayNextElement => S::StartArrayElement,
			S::StartObjectKey => S::StartObjectValue,
			S::StartObjectValue => {
				self.commit(pending?)?;
				S::StartObjectNextElement
			}
			S::StartObjectNextElement => S::StartObjectElement,
			S::None | S::StartObject | S::StartObjectElement => return None,
		})
	}

	/// Store a finished value in the open container: arrays at their own running index, objects under
	/// the key read for this level.
	fn commit(&mut self, value: JsonValue) -> Option<()> {
		match self.open.as_mut()? {
			OpenContainer::Array { array, next_index } => {
				array.set(*next_index, value);
				*next_index += 1;
			}
			OpenContainer::Object { object, key } => {
				object.0.insert(key.take()?, value);
			}
		}
		Some(())
	}
}

/// Parse a JSON text. The root must be an object or an array.
///
/// Never fails with a Rust error: a failed parse returns [`JsonValue::Error`], and empty text returns
/// [`ParseError::EmptyInput`] without lexing anything.
///
/// ```rust
/// use stackjson_core::json::{JsonValue, ParseError, parse};
///
/// assert_eq!(parse("[1, 2]").stringify(), "[1,2]");
/// assert_eq!(parse(""), JsonValue::Error(ParseError::EmptyInput));
/// assert!(parse("42").is_error());
/// ```
pub fn parse(text: &str) -> JsonValue {
	if text.is_empty() {
		return JsonValue::Error(ParseError::EmptyInput);
	}
	Parser::new(text).parse()
}

/// [`parse`] for input that may be absent. `None` is treated like empty text.
pub fn parse_optional(text: Option<&str>) -> JsonValue {
	text.map_or(JsonValue::Error(ParseError::EmptyInput), parse)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn v<T>(input: T) -> JsonValue
	where
		JsonValue: From<T>,
	{
		JsonValue::from(input)
	}

	fn syntax(token: &'static str, start: usize, end: usize) -> JsonValue {
		JsonValue::Error(ParseError::Syntax { token, start, end })
	}

	#[test]
	fn simple() {
		let data = r##"{"users":{"user1":{"city":"Nantes","country":"France"},"user2":{"city":"Bruxelles","country":"Belgium"},"user3":{"city":"Paris","country":"France","age":30}},"countries":["France","Belgium"]}"##;
		assert_eq!(
			parse(data),
			v(vec![
				(
					"users",
					v(vec![
						("user1", v(vec![("city", "Nantes"), ("country", "France")])),
						("user2", v(vec![("city", "Bruxelles"), ("country", "Belgium")])),
						(
							"user3",
							v(vec![("city", v("Paris")), ("country", v("France")), ("age", v(30))])
						)
					])
				),
				("countries", v(vec!["France", "Belgium"]))
			])
		);
	}

	#[test]
	fn test_empty_containers() {
		assert_eq!(parse("{}"), JsonValue::new_object());
		assert_eq!(parse("[]"), JsonValue::new_array());
		assert_eq!(parse(" [ ] "), JsonValue::new_array());
		assert_eq!(parse("[{},[]]"), v(vec![JsonValue::new_object(), JsonValue::new_array()]));
	}

	#[test]
	fn test_scalars() {
		assert_eq!(
			parse(r#"{"integer": 42, "float": -2.5e1, "t": true, "f": false, "n": null, "s": "value"}"#),
			v(vec![
				("integer", v(42)),
				("float", v(-25.0)),
				("t", v(true)),
				("f", v(false)),
				("n", JsonValue::Null),
				("s", v("value")),
			])
		);
	}

	#[test]
	fn test_nested_array() {
		assert_eq!(parse("[1, [2, 3], 4]"), v(vec![v(1.0), v(vec![v(2.0), v(3.0)]), v(4.0)]));
	}

	#[test]
	fn test_nested_object() {
		assert_eq!(
			parse(r#"{"a": {"b": {"c": "d"}}}"#),
			v(vec![("a", v(vec![("b", v(vec![("c", v("d"))]))]))])
		);
	}

	#[test]
	fn test_five_levels_deep() {
		let mut value = parse("[[[[[1]]]]]");
		for _ in 0..4 {
			let array = value.into_array().unwrap();
			assert_eq!(array.len(), 1);
			value = array.into_vec().remove(0);
		}
		assert_eq!(value, v(vec![1]));
	}

	#[test]
	fn test_nested_containers_keep_their_own_index_and_key() {
		let value = parse(r#"{"a":{"b":1},"c":[[1,2],3],"d":[{"e":[4]},5]}"#);
		assert_eq!(value.stringify(), r#"{"a":{"b":1},"c":[[1,2],3],"d":[{"e":[4]},5]}"#);
		assert_eq!(value.get("b"), None);
		assert_eq!(value.get("c").unwrap().as_array().unwrap().len(), 2);
	}

	#[test]
	fn test_last_duplicate_key_wins() {
		let value = parse(r#"{"a":1,"b":0,"a":2}"#);
		assert_eq!(value.get("a"), Some(&v(2)));
		assert_eq!(value.stringify(), r#"{"a":2,"b":0}"#);
	}

	#[test]
	fn test_escaped_quotes_in_keys_and_values() {
		let value = parse(r#"{"say \"hi\"": "\"hello\""}"#);
		assert_eq!(value.get("say \"hi\""), Some(&v("\"hello\"")));
	}

	#[test]
	fn test_malformed_number_is_zero() {
		assert_eq!(parse("[1.2.3, -, 7]"), v(vec![0, 0, 7]));
	}

	#[test]
	fn test_input_after_root_is_not_read() {
		assert_eq!(parse("[1] trailing @"), v(vec![1]));
		assert_eq!(parse("{}}"), JsonValue::new_object());
	}

	#[test]
	fn test_empty_input() {
		assert_eq!(parse(""), JsonValue::Error(ParseError::EmptyInput));
		assert_eq!(parse_optional(None), JsonValue::Error(ParseError::EmptyInput));
		assert_eq!(parse_optional(Some("")), JsonValue::Error(ParseError::EmptyInput));
		assert_eq!(parse_optional(Some("[]")), JsonValue::new_array());
	}

	#[rstest]
	#[case("   ", syntax("end of input", 3, 3))]
	#[case("42", syntax("number", 0, 2))]
	#[case("\"text\"", syntax("string", 1, 5))]
	#[case("true", syntax("'true'", 0, 4))]
	#[case("null", syntax("'null'", 0, 4))]
	#[case("]", syntax("']'", 0, 1))]
	#[case("[", syntax("end of input", 1, 1))]
	#[case("{", syntax("end of input", 1, 1))]
	#[case("[1", syntax("end of input", 2, 2))]
	#[case("[1,", syntax("end of input", 3, 3))]
	#[case(r#"{"a""#, syntax("end of input", 4, 4))]
	#[case(r#"{"a":"#, syntax("end of input", 5, 5))]
	#[case(r#"{"a":1"#, syntax("end of input", 6, 6))]
	#[case(r#"{"a":}"#, syntax("'}'", 5, 6))]
	#[case("[1,2,]", syntax("']'", 5, 6))]
	#[case(r#"{"a":1,}"#, syntax("'}'", 7, 8))]
	#[case(r#"{"a" 1}"#, syntax("number", 5, 6))]
	#[case(r#"{"a"::1}"#, syntax("':'", 5, 6))]
	#[case("{1:2}", syntax("number", 1, 2))]
	#[case("[1 2]", syntax("number", 3, 4))]
	#[case("[1:2]", syntax("':'", 2, 3))]
	#[case("[,1]", syntax("','", 1, 2))]
	#[case("[1,,2]", syntax("','", 3, 4))]
	#[case("{,}", syntax("','", 1, 2))]
	#[case("[}", syntax("'}'", 1, 2))]
	#[case("{]", syntax("']'", 1, 2))]
	#[case("[1}", syntax("'}'", 2, 3))]
	#[case(r#"{"a":1]"#, syntax("']'", 6, 7))]
	#[case(r#"["abc]"#, syntax("invalid token", 1, 6))]
	#[case("[tru]", syntax("invalid token", 1, 2))]
	#[case("[@]", syntax("invalid token", 1, 2))]
	#[case("{\"a\":1 x}", syntax("invalid token", 7, 8))]
	fn test_syntax_errors(#[case] input: &str, #[case] expected: JsonValue) {
		assert_eq!(parse(input), expected);
	}

	#[test]
	fn test_error_message() {
		let error = parse(r#"{"key" "value"}"#);
		assert_eq!(error.to_string(), "syntax error: unexpected string at position 8-13");
	}

	#[test]
	fn test_step_through_states() {
		use ParserState as S;

		let mut parser = Parser::new(r#"{"k":[1,2]}"#);
		let mut trace = vec![(parser.state(), parser.depth())];
		let root = loop {
			if let Some(root) = parser.step().unwrap() {
				break root;
			}
			trace.push((parser.state(), parser.depth()));
		};

		assert_eq!(
			trace,
			vec![
				(S::None, 0),
				(S::StartObject, 1),
				(S::StartObjectValue, 1),
				(S::StartArray, 2),
				(S::StartArrayNextElement, 2),
				(S::StartArrayElement, 2),
				(S::StartArrayNextElement, 2),
				(S::StartObjectNextElement, 1),
			]
		);
		assert_eq!(root, v(vec![("k", v(vec![1, 2]))]));
		assert_eq!(parser.state(), S::None);
		assert_eq!(parser.depth(), 0);
	}

	#[test]
	fn test_admissibility_table() {
		use ParserState as S;
		use TokenKind as T;
		let value_tokens = [
			T::String("s".into()),
			T::Number(1.0),
			T::True,
			T::False,
			T::Null,
			T::LeftBrace,
			T::LeftBracket,
		];

		for kind in &value_tokens {
			assert!(!S::None.admits(kind) || matches!(kind, T::LeftBrace | T::LeftBracket));
			assert!(S::StartArray.admits(kind));
			assert!(S::StartArrayElement.admits(kind));
			assert!(S::StartObjectValue.admits(kind));
			assert!(!S::StartArrayNextElement.admits(kind));
			assert!(!S::StartObjectNextElement.admits(kind));
		}

		assert!(S::StartArray.admits(&T::RightBracket));
		assert!(!S::StartArrayElement.admits(&T::RightBracket));
		assert!(S::StartObject.admits(&T::RightBrace));
		assert!(!S::StartObjectElement.admits(&T::RightBrace));
		assert!(S::StartObjectElement.admits(&T::String("key".into())));
		assert!(!S::StartObjectElement.admits(&T::Number(1.0)));

		for state in [
			S::None,
			S::StartArray,
			S::StartArrayElement,
			S::StartArrayNextElement,
			S::StartObject,
			S::StartObjectElement,
			S::StartObjectKey,
			S::StartObjectValue,
			S::StartObjectNextElement,
		] {
			assert!(!state.admits(&T::End), "{state:?} admits end of input");
			assert!(!state.admits(&T::Error), "{state:?} admits an error token");
			assert!(!state.admits(&T::Colon), "{state:?} admits a bare colon");
		}
	}

	#[test]
	fn test_deep_arrays_do_not_recurse() {
		let depth = 100_000;
		let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
		let value = parse(&text);

		let mut levels = 0;
		let mut current = &value;
		while let JsonValue::Array(array) = current {
			levels += 1;
			match array.get(0) {
				Some(child) => current = child,
				None => break,
			}
		}
		assert_eq!(levels, depth);
	}

	#[test]
	fn test_deep_objects_do_not_recurse() {
		let depth = 100_000;
		let text = format!("{}1{}", r#"{"k":"#.repeat(depth), "}".repeat(depth));
		let value = parse(&text);

		let mut levels = 0;
		let mut current = &value;
		while let JsonValue::Object(object) = current {
			levels += 1;
			current = object.get("k").unwrap();
		}
		assert_eq!(levels, depth);
		assert_eq!(current, &v(1));
	}

	#[test]
	fn test_unclosed_deep_document_fails() {
		let text = "[".repeat(10_000);
		assert_eq!(parse(&text), syntax("end of input", 10_000, 10_000));
	}
}
