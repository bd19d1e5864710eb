//! JSON object type and the defaulting field accessors.
use super::array::dismantle;
use crate::json::stringify::{MultiLine, Style, Writer};
use crate::json::*;
use anyhow::Result;
use indexmap::IndexMap;
use std::fmt::{Debug, Display};

/// A JSON object backed by an `IndexMap<String, JsonValue>`.
///
/// Keys keep the order in which they were first inserted. Setting an existing key replaces its value
/// in place, so for duplicate keys in a document the last one wins.
#[derive(Clone, Default, PartialEq)]
pub struct JsonObject(pub IndexMap<String, JsonValue>);

impl JsonObject {
	/// Create a new, empty `JsonObject`.
	#[must_use]
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Get a reference to the raw `JsonValue` for the specified key, if present.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
		self.0.get_mut(key)
	}

	/// Set the specified key to the given value, converting it into a `JsonValue`.
	pub fn set<T>(&mut self, key: &str, value: T)
	where
		JsonValue: From<T>,
	{
		self.0.insert(key.to_owned(), JsonValue::from(value));
	}

	/// Read a number, or `default` if the key is missing or holds something else.
	pub fn get_float(&self, key: &str, default: f64) -> f64 {
		self.coerce(key, default, JsonValue::as_number)
	}

	/// Read a number truncated toward zero, or `default` if the key is missing or holds something else.
	pub fn get_integer(&self, key: &str, default: i64) -> i64 {
		self.coerce(key, default, JsonValue::as_integer)
	}

	/// Read a boolean, or `default` if the key is missing or holds something else.
	pub fn get_boolean(&self, key: &str, default: bool) -> bool {
		self.coerce(key, default, JsonValue::as_boolean)
	}

	/// Read the display text of a value: the raw content for strings, the serialized form otherwise.
	/// Returns `default` only if the key is missing.
	pub fn get_string(&self, key: &str, default: &str) -> String {
		self
			.get(key)
			.map_or_else(|| default.to_owned(), JsonValue::to_display_string)
	}

	pub fn get_object(&self, key: &str) -> Option<&JsonObject> {
		self.get(key).and_then(|value| value.as_object().ok())
	}

	pub fn get_array(&self, key: &str) -> Option<&JsonArray> {
		self.get(key).and_then(|value| value.as_array().ok())
	}

	fn coerce<T>(&self, key: &str, default: T, read: impl Fn(&JsonValue) -> Result<T>) -> T {
		match self.get(key).map(read) {
			Some(Ok(value)) => value,
			Some(Err(error)) => {
				log::warn!("field '{key}': {error}, using the default");
				default
			}
			None => default,
		}
	}

	/// Return an iterator over key-value pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
		self.0.iter()
	}

	pub fn keys(&self) -> impl Iterator<Item = &String> {
		self.0.keys()
	}

	/// Serialize this `JsonObject` into a compact JSON string without extra whitespace.
	#[must_use]
	pub fn stringify(&self) -> String {
		Writer::new(Style::Strict).write_object(self)
	}

	/// Same layout as [`stringify`](Self::stringify), with keys and strings left unescaped.
	#[must_use]
	pub fn stringify_display(&self) -> String {
		Writer::new(Style::Display).write_object(self)
	}

	/// Serialize this `JsonObject` into a single-line, pretty-printed JSON string with spaces.
	#[must_use]
	pub fn stringify_pretty_single_line(&self) -> String {
		Writer::new(Style::SingleLine).write_object(self)
	}

	/// Serialize this `JsonObject` into a multi-line, pretty-printed JSON string with indentation.
	///
	/// `max_width` controls when to wrap lines, and `depth` sets the base indentation level.
	#[must_use]
	pub fn stringify_pretty_multi_line(&self, max_width: usize, depth: usize) -> String {
		MultiLine::new(max_width).write_object(self, depth)
	}

	/// Parse a JSON string into a `JsonObject`, returning an error on invalid JSON or non-object root.
	pub fn parse_str(json: &str) -> Result<JsonObject> {
		JsonValue::parse_str(json)?.into_object()
	}
}

impl Drop for JsonObject {
	fn drop(&mut self) {
		if self.0.values().any(JsonValue::is_container) {
			dismantle(self.0.drain(..).map(|(_, value)| value).collect());
		}
	}
}

impl Debug for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

/// Prints like the `Display` of a `JsonValue` holding this object.
impl Display for JsonObject {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.stringify_display())
	}
}

/// Convert a `Vec<(&str, T)>` into a `JsonValue::Object` by converting into a `JsonObject`.
impl<T> From<Vec<(&str, T)>> for JsonValue
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		JsonValue::Object(JsonObject::from(input))
	}
}

/// Convert a `Vec<(&str, T)>` into a `JsonObject`, consuming the vector of key-value pairs.
impl<T> From<Vec<(&str, T)>> for JsonObject
where
	JsonValue: From<T>,
{
	fn from(input: Vec<(&str, T)>) -> Self {
		let mut object = JsonObject::new();
		for (key, value) in input {
			object.set(key, value);
		}
		object
	}
}
