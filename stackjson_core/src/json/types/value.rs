//! JSON value enum: the node type of every parsed tree, with introspection and conversions.

use crate::json::*;
use anyhow::{Context, Result, bail};
use std::fmt::{self, Display};

/// Represents any JSON datum: arrays, objects, numbers, strings, booleans and null, plus the terminal
/// [`Error`](JsonValue::Error) marker returned by a failed parse.
///
/// The variant of a value never changes after construction. Containers own their children, so a tree
/// has no sharing and no cycles.
///
/// Parsing, serializing and dropping walk the tree with explicit stacks. The derived `Clone`,
/// `PartialEq` and `Debug` recurse once per nesting level, so on very deep trees they are bounded by
/// the thread stack.
///
/// An error value can only be built explicitly, never through `From`, so it cannot end up inside a
/// container by conversion:
///
/// ```compile_fail
/// use stackjson_core::json::{JsonArray, ParseError};
///
/// JsonArray::new().push(ParseError::EmptyInput);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum JsonValue {
	Array(JsonArray),
	Boolean(bool),
	Null,
	Number(f64),
	Object(JsonObject),
	String(String),
	/// A parse failure. Only ever the root of a result, never nested in a tree.
	Error(ParseError),
}

impl JsonValue {
	/// Parse a JSON text into a `JsonValue`, turning a parse failure into an error.
	///
	/// The error context quotes at most the first 40 characters of the text.
	///
	/// # Errors
	/// Returns an error if the JSON is empty or invalid.
	pub fn parse_str(json: &str) -> Result<JsonValue> {
		parse(json)
			.into_result()
			.with_context(|| format!("while parsing JSON '{}'", preview(json)))
	}

	/// Split a parse result into the tree or its diagnostic.
	///
	/// # Errors
	/// Returns the carried [`ParseError`] if this is an [`Error`](JsonValue::Error) value.
	pub fn into_result(self) -> Result<JsonValue, ParseError> {
		match self {
			JsonValue::Error(error) => Err(error),
			value => Ok(value),
		}
	}

	/// Return the JSON type as a lowercase string (`"array"`, `"object"`, etc.).
	#[must_use]
	pub fn type_as_str(&self) -> &'static str {
		use JsonValue::*;
		match self {
			Array(_) => "array",
			Boolean(_) => "boolean",
			Null => "null",
			Number(_) => "number",
			Object(_) => "object",
			String(_) => "string",
			Error(_) => "error",
		}
	}

	#[must_use]
	pub fn is_error(&self) -> bool {
		matches!(self, JsonValue::Error(_))
	}

	#[must_use]
	pub fn is_container(&self) -> bool {
		matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
	}

	/// Create a new empty JSON array value.
	#[must_use]
	pub fn new_array() -> JsonValue {
		JsonValue::Array(JsonArray::default())
	}

	/// Create a new empty JSON object value.
	#[must_use]
	pub fn new_object() -> JsonValue {
		JsonValue::Object(JsonObject::default())
	}

	/// Read a field of an object. Absent if the key is missing or this is not an object.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		match self {
			JsonValue::Object(object) => object.get(key),
			_ => None,
		}
	}

	/// Serialize to compact, strict JSON.
	#[must_use]
	pub fn stringify(&self) -> String {
		stringify(self)
	}

	/// Serialize for humans: like [`stringify`](Self::stringify), but strings are not escaped and a
	/// top level string is printed without quotes.
	#[must_use]
	pub fn to_display_string(&self) -> String {
		stringify_display(self)
	}

	/// Borrow the `JsonArray` if this value is an array.
	///
	/// # Errors
	/// Returns an error if not an array.
	pub fn as_array(&self) -> Result<&JsonArray> {
		if let JsonValue::Array(array) = self {
			Ok(array)
		} else {
			bail!("expected an array, found a {}", self.type_as_str())
		}
	}

	/// Mutably borrow the `JsonArray` if this value is an array.
	///
	/// # Errors
	/// Returns an error if not an array.
	pub fn as_array_mut(&mut self) -> Result<&mut JsonArray> {
		match self {
			JsonValue::Array(array) => Ok(array),
			_ => bail!("expected an array, found a {}", self.type_as_str()),
		}
	}

	/// Consume the `JsonValue` and extract the `JsonArray` if it is an array.
	///
	/// # Errors
	/// Returns an error if not an array.
	pub fn into_array(self) -> Result<JsonArray> {
		match self {
			JsonValue::Array(array) => Ok(array),
			_ => bail!("expected an array, found a {}", self.type_as_str()),
		}
	}

	/// Borrow the `JsonObject` if this value is an object.
	///
	/// # Errors
	/// Returns an error if not an object.
	pub fn as_object(&self) -> Result<&JsonObject> {
		if let JsonValue::Object(object) = self {
			Ok(object)
		} else {
			bail!("expected an object, found a {}", self.type_as_str())
		}
	}

	/// Mutably borrow the `JsonObject` if this value is an object.
	///
	/// # Errors
	/// Returns an error if not an object.
	pub fn as_object_mut(&mut self) -> Result<&mut JsonObject> {
		match self {
			JsonValue::Object(object) => Ok(object),
			_ => bail!("expected an object, found a {}", self.type_as_str()),
		}
	}

	/// Consume the `JsonValue` and extract the `JsonObject` if it is an object.
	///
	/// # Errors
	/// Returns an error if not an object.
	pub fn into_object(self) -> Result<JsonObject> {
		match self {
			JsonValue::Object(object) => Ok(object),
			_ => bail!("expected an object, found a {}", self.type_as_str()),
		}
	}

	/// Return the string value as `String`, cloning if necessary.
	///
	/// # Errors
	/// Returns an error if the value is not a JSON string.
	pub fn as_string(&self) -> Result<String> {
		self.as_str().map(str::to_owned)
	}

	/// Return a string slice if this value is a JSON string.
	///
	/// # Errors
	/// Returns an error if the value is not a JSON string.
	pub fn as_str(&self) -> Result<&str> {
		match self {
			JsonValue::String(text) => Ok(text),
			_ => bail!("expected a string, found a {}", self.type_as_str()),
		}
	}

	/// Return the number as `f64`.
	///
	/// # Errors
	/// Returns an error if the value is not a JSON number.
	pub fn as_number(&self) -> Result<f64> {
		if let JsonValue::Number(val) = self {
			Ok(*val)
		} else {
			bail!("expected a number, found a {}", self.type_as_str())
		}
	}

	/// Return the number truncated toward zero. Out of range values saturate.
	///
	/// # Errors
	/// Returns an error if the value is not a JSON number.
	pub fn as_integer(&self) -> Result<i64> {
		self.as_number().map(|val| val as i64)
	}

	/// # Errors
	/// Returns an error if the value is not a JSON boolean.
	pub fn as_boolean(&self) -> Result<bool> {
		match self {
			JsonValue::Boolean(val) => Ok(*val),
			_ => bail!("expected a boolean, found a {}", self.type_as_str()),
		}
	}
}

const PREVIEW_CHARS: usize = 40;

fn preview(text: &str) -> String {
	match text.char_indices().nth(PREVIEW_CHARS) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.to_owned(),
	}
}

impl Display for JsonValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_display_string())
	}
}

impl From<&str> for JsonValue {
	fn from(input: &str) -> Self {
		JsonValue::String(input.to_string())
	}
}

impl From<&String> for JsonValue {
	fn from(input: &String) -> Self {
		JsonValue::String(input.to_string())
	}
}

impl From<String> for JsonValue {
	fn from(input: String) -> Self {
		JsonValue::String(input)
	}
}

impl From<bool> for JsonValue {
	fn from(input: bool) -> Self {
		JsonValue::Boolean(input)
	}
}

impl From<&JsonValue> for JsonValue {
	fn from(input: &JsonValue) -> Self {
		input.clone()
	}
}

impl<I> From<I> for JsonValue
where
	JsonArray: From<I>,
{
	fn from(input: I) -> Self {
		JsonValue::Array(input.into())
	}
}

impl From<JsonObject> for JsonValue {
	fn from(input: JsonObject) -> Self {
		JsonValue::Object(input)
	}
}
