//! JSON array type: a dense, 0-indexed sequence of values.
use crate::json::stringify::{MultiLine, Style, Writer};
use crate::json::*;
use anyhow::Result;
use std::{
	fmt::Debug,
	ops::Index,
	slice::Iter,
};

#[derive(Clone, Default, PartialEq)]
/// A JSON array, backed by a `Vec<JsonValue>`.
///
/// Reading with [`get`](JsonArray::get) is checked, indexing with `array[i]` panics when out of range.
/// Writing past the end with [`set`](JsonArray::set) grows the array and fills the gap with `null`.
pub struct JsonArray(pub Vec<JsonValue>);

impl JsonArray {
	#[must_use]
	pub fn new() -> Self {
		Self(Vec::new())
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&JsonValue> {
		self.0.get(index)
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut JsonValue> {
		self.0.get_mut(index)
	}

	pub fn push<T>(&mut self, value: T)
	where
		JsonValue: From<T>,
	{
		self.0.push(JsonValue::from(value));
	}

	/// Assign `value` at `index`.
	///
	/// Writing beyond the current length pads every slot in between with `null` first, so after
	/// `set(3, x)` on an empty array it has length 4 and holds `[null, null, null, x]`.
	pub fn set<T>(&mut self, index: usize, value: T)
	where
		JsonValue: From<T>,
	{
		if index >= self.0.len() {
			self.0.resize(index + 1, JsonValue::Null);
		}
		self.0[index] = JsonValue::from(value);
	}

	pub fn iter(&self) -> Iter<'_, JsonValue> {
		self.0.iter()
	}

	/// Get a reference to the underlying `Vec<JsonValue>`.
	#[must_use]
	pub fn as_vec(&self) -> &Vec<JsonValue> {
		&self.0
	}

	/// Take the elements out of the array.
	#[must_use]
	pub fn into_vec(mut self) -> Vec<JsonValue> {
		std::mem::take(&mut self.0)
	}

	/// Serialize the JSON array to a compact string without extra whitespace.
	///
	/// # Examples
	///
	/// ```rust
	/// use stackjson_core::json::{JsonArray, JsonValue};
	/// let arr = JsonArray(vec![JsonValue::from(1), JsonValue::from("two")]);
	/// assert_eq!(arr.stringify(), r#"[1,"two"]"#);
	/// ```
	#[must_use]
	pub fn stringify(&self) -> String {
		Writer::new(Style::Strict).write_array(self)
	}

	/// Same layout as [`stringify`](Self::stringify), with strings left unescaped.
	#[must_use]
	pub fn stringify_display(&self) -> String {
		Writer::new(Style::Display).write_array(self)
	}

	/// Serialize the array to a single-line, pretty-printed string with spaces.
	///
	/// E.g., `[ 1, 2, 3 ]`.
	#[must_use]
	pub fn stringify_pretty_single_line(&self) -> String {
		Writer::new(Style::SingleLine).write_array(self)
	}

	/// Serialize the array to a multi-line, pretty-printed string.
	///
	/// `max_width` controls when to break lines, and `depth` sets the indentation level.
	#[must_use]
	pub fn stringify_pretty_multi_line(&self, max_width: usize, depth: usize) -> String {
		MultiLine::new(max_width).write_array(self, depth)
	}

	/// Parse a JSON text that must contain an array at the root.
	pub fn parse_str(json: &str) -> Result<JsonArray> {
		JsonValue::parse_str(json)?.into_array()
	}
}

/// Tear a subtree down with an explicit stack instead of recursive drop glue, so that dropping a
/// deeply nested tree does not exhaust the call stack.
pub(super) fn dismantle(mut stack: Vec<JsonValue>) {
	while let Some(value) = stack.pop() {
		match value {
			JsonValue::Array(mut array) => stack.append(&mut array.0),
			JsonValue::Object(mut object) => stack.extend(object.0.drain(..).map(|(_, value)| value)),
			_ => {}
		}
	}
}

impl Drop for JsonArray {
	fn drop(&mut self) {
		if self.0.iter().any(JsonValue::is_container) {
			dismantle(std::mem::take(&mut self.0));
		}
	}
}

impl Index<usize> for JsonArray {
	type Output = JsonValue;

	fn index(&self, index: usize) -> &JsonValue {
		&self.0[index]
	}
}

impl<'a> IntoIterator for &'a JsonArray {
	type Item = &'a JsonValue;
	type IntoIter = Iter<'a, JsonValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl Debug for JsonArray {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0)
	}
}

impl<T> From<Vec<T>> for JsonArray
where
	JsonValue: From<T>,
{
	fn from(input: Vec<T>) -> Self {
		JsonArray(input.into_iter().map(JsonValue::from).collect())
	}
}

impl<T> From<&Vec<T>> for JsonArray
where
	JsonValue: From<T>,
	T: Clone,
{
	fn from(input: &Vec<T>) -> Self {
		JsonArray(input.iter().map(|v| JsonValue::from(v.clone())).collect())
	}
}

impl<T, const N: usize> From<&[T; N]> for JsonArray
where
	JsonValue: From<T>,
	T: Copy,
{
	fn from(input: &[T; N]) -> Self {
		JsonArray(input.iter().map(|v| JsonValue::from(*v)).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stringify() {
		let array = JsonArray(vec![
			JsonValue::from("hello"),
			JsonValue::from(42.0),
			JsonValue::from(true),
		]);

		assert_eq!(array.stringify(), r#"["hello",42,true]"#);
	}

	#[test]
	fn test_set_pads_with_null() {
		let mut array = JsonArray::new();
		array.set(3, "x");

		assert_eq!(array.len(), 4);
		assert_eq!(array[0], JsonValue::Null);
		assert_eq!(array[1], JsonValue::Null);
		assert_eq!(array[2], JsonValue::Null);
		assert_eq!(array[3], JsonValue::from("x"));
	}

	#[test]
	fn test_set_within_bounds_replaces() {
		let mut array = JsonArray::from(vec![1, 2, 3]);
		array.set(1, false);
		assert_eq!(array, JsonArray::from(vec![JsonValue::from(1), JsonValue::from(false), JsonValue::from(3)]));
	}

	#[test]
	fn test_set_at_len_appends() {
		let mut array = JsonArray::from(vec![1]);
		array.set(1, 2);
		assert_eq!(array.stringify(), "[1,2]");
	}

	#[test]
	fn test_get_and_push() {
		let mut array = JsonArray::new();
		assert!(array.is_empty());
		assert_eq!(array.get(0), None);

		array.push(7);
		assert_eq!(array.get(0), Some(&JsonValue::from(7)));
		assert_eq!(array.get(1), None);

		if let Some(value) = array.get_mut(0) {
			*value = JsonValue::Null;
		}
		assert_eq!(array.stringify(), "[null]");
	}

	#[test]
	#[should_panic(expected = "index out of bounds")]
	fn test_index_out_of_range_panics() {
		let array = JsonArray::from(vec![1]);
		let _ = &array[1];
	}

	#[test]
	fn test_debug_impl() {
		let array = JsonArray(vec![JsonValue::from("debug"), JsonValue::from(42.0)]);

		assert_eq!(format!("{array:?}"), r#"[String("debug"), Number(42.0)]"#);
	}

	#[test]
	fn test_stringify_pretty_single_line() {
		let array = JsonArray(vec![JsonValue::from("hello"), JsonValue::from(42.0)]);
		assert_eq!(array.stringify_pretty_single_line(), "[ \"hello\", 42 ]");
	}

	#[test]
	fn test_stringify_pretty_multi_line() {
		let array = JsonArray(vec![JsonValue::from("a"), JsonValue::from("b")]);
		let expected = "[\n  \"a\",\n  \"b\"\n]";
		assert_eq!(array.stringify_pretty_multi_line(80, 0), expected);
	}

	#[test]
	fn test_iter_and_into_vec() {
		let array = JsonArray::from(&[1, 2, 3]);
		let sum: f64 = array.iter().map(|v| v.as_number().unwrap()).sum();
		assert_eq!(sum, 6.0);
		assert_eq!(array.as_vec().len(), 3);
		assert_eq!(array.into_vec(), vec![JsonValue::from(1), JsonValue::from(2), JsonValue::from(3)]);
	}

	#[test]
	fn test_from_ref_vec() {
		let v = vec![1, 2, 3];
		let arr = JsonArray::from(&v);
		assert_eq!(arr.0, vec![JsonValue::from(1), JsonValue::from(2), JsonValue::from(3)]);
	}

	#[test]
	fn test_parse_str() -> Result<()> {
		assert_eq!(JsonArray::parse_str("[1,\"a\"]")?.len(), 2);
		assert_eq!(
			JsonArray::parse_str("{}").unwrap_err().to_string(),
			"expected an array, found a object"
		);
		Ok(())
	}

	#[test]
	fn test_drop_deep_tree() {
		let mut value = JsonValue::new_array();
		for _ in 0..200_000 {
			value = JsonValue::from(JsonArray(vec![value]));
		}
		drop(value);
	}
}
