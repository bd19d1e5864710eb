//! Serialization of value trees back into text.
//!
//! Escaping is limited to `"`, the only escape the lexer decodes. Text produced here reads back into an
//! equal tree unless a string holds a backslash right before a quote or at its very end.
//!
//! All writers walk the tree with an explicit stack of open containers, like the parser, so any tree
//! the parser can build can also be written out.

use super::{JsonArray, JsonObject, JsonValue};
use std::{collections::HashMap, ptr, slice};

/// Serialize to compact, strict JSON.
pub fn stringify(json: &JsonValue) -> String {
	Writer::new(Style::Strict).write_value(json)
}

/// Serialize for display: a root string is printed raw, an error prints its message, nested strings
/// are quoted but not escaped.
pub fn stringify_display(json: &JsonValue) -> String {
	match json {
		JsonValue::String(s) => s.clone(),
		JsonValue::Error(e) => e.to_string(),
		_ => Writer::new(Style::Display).write_value(json),
	}
}

pub fn stringify_pretty_single_line(json: &JsonValue) -> String {
	Writer::new(Style::SingleLine).write_value(json)
}

/// Pretty print with line breaks. A container is kept on one line if it fits into `max_width` after
/// `indention` columns.
pub fn stringify_pretty_multi_line(json: &JsonValue, max_width: usize, depth: usize, indention: usize) -> String {
	let mut layout = MultiLine::new(max_width);
	layout.value(json, depth, indention);
	layout.finish()
}

pub fn escape_json_string(input: &str) -> String {
	input.replace('"', "\\\"")
}

fn stringify_number(n: f64) -> String {
	if n.is_finite() {
		n.to_string()
	} else {
		String::from("null")
	}
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
	/// `[1,"a \"b\""]`
	Strict,
	/// `[1,"a "b""]`
	Display,
	/// `[ 1, "a \"b\"" ]`
	SingleLine,
}

impl Style {
	fn escapes(self) -> bool {
		self != Style::Display
	}

	fn spaced(self) -> bool {
		self == Style::SingleLine
	}
}

/// A container whose children are still being written.
enum Frame<'a> {
	Array {
		items: slice::Iter<'a, JsonValue>,
		first: bool,
	},
	Object {
		fields: indexmap::map::Iter<'a, String, JsonValue>,
		first: bool,
	},
}

impl<'a> Frame<'a> {
	fn array(array: &'a JsonArray) -> Self {
		Frame::Array {
			items: array.iter(),
			first: true,
		}
	}

	fn object(object: &'a JsonObject) -> Self {
		Frame::Object {
			fields: object.0.iter(),
			first: true,
		}
	}

	/// The next child, its key for objects, and whether it is the first one.
	fn next(&mut self) -> Option<(bool, Option<&'a String>, &'a JsonValue)> {
		match self {
			Frame::Array { items, first } => items
				.next()
				.map(|item| (std::mem::replace(first, false), None, item)),
			Frame::Object { fields, first } => fields
				.next()
				.map(|(key, item)| (std::mem::replace(first, false), Some(key), item)),
		}
	}

	fn is_array(&self) -> bool {
		matches!(self, Frame::Array { .. })
	}
}

fn push_quoted(out: &mut String, text: &str, escape: bool) {
	out.push('"');
	if escape {
		out.push_str(&escape_json_string(text));
	} else {
		out.push_str(text);
	}
	out.push('"');
}

/// Writes one tree on a single line.
pub(crate) struct Writer<'a> {
	out: String,
	style: Style,
	stack: Vec<Frame<'a>>,
}

impl<'a> Writer<'a> {
	pub(crate) fn new(style: Style) -> Self {
		Writer {
			out: String::new(),
			style,
			stack: Vec::new(),
		}
	}

	pub(crate) fn write_value(mut self, value: &'a JsonValue) -> String {
		self.value(value);
		self.finish()
	}

	pub(crate) fn write_array(mut self, array: &'a JsonArray) -> String {
		self.open_array(array);
		self.finish()
	}

	pub(crate) fn write_object(mut self, object: &'a JsonObject) -> String {
		self.open_object(object);
		self.finish()
	}

	fn open_array(&mut self, array: &'a JsonArray) {
		self.out.push_str(if self.style.spaced() { "[ " } else { "[" });
		self.stack.push(Frame::array(array));
	}

	fn open_object(&mut self, object: &'a JsonObject) {
		self.out.push_str(if self.style.spaced() { "{ " } else { "{" });
		self.stack.push(Frame::object(object));
	}

	fn value(&mut self, value: &'a JsonValue) {
		match value {
			JsonValue::Array(array) => self.open_array(array),
			JsonValue::Object(object) => self.open_object(object),
			JsonValue::String(text) => push_quoted(&mut self.out, text, self.style.escapes()),
			JsonValue::Number(n) => self.out.push_str(&stringify_number(*n)),
			JsonValue::Boolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
			// an error has no JSON spelling
			JsonValue::Null | JsonValue::Error(_) => self.out.push_str("null"),
		}
	}

	fn finish(mut self) -> String {
		while let Some(frame) = self.stack.last_mut() {
			if let Some((first, key, item)) = frame.next() {
				if !first {
					self.out.push_str(if self.style.spaced() { ", " } else { "," });
				}
				if let Some(key) = key {
					push_quoted(&mut self.out, key, self.style.escapes());
					self.out.push_str(if self.style.spaced() { ": " } else { ":" });
				}
				self.value(item);
			} else {
				let close = match (frame.is_array(), self.style.spaced()) {
					(true, true) => " ]",
					(true, false) => "]",
					(false, true) => " }",
					(false, false) => "}",
				};
				self.out.push_str(close);
				self.stack.pop();
			}
		}
		self.out
	}
}

/// Writes one tree over several lines, collapsing containers that fit into `max_width`.
pub(crate) struct MultiLine<'a> {
	out: String,
	max_width: usize,
	/// Single line width of every container measured so far, keyed by address.
	widths: HashMap<*const JsonValue, usize>,
	/// Open containers and their depth.
	stack: Vec<(Frame<'a>, usize)>,
}

impl<'a> MultiLine<'a> {
	pub(crate) fn new(max_width: usize) -> Self {
		MultiLine {
			out: String::new(),
			max_width,
			widths: HashMap::new(),
			stack: Vec::new(),
		}
	}

	pub(crate) fn write_array(mut self, array: &'a JsonArray, depth: usize) -> String {
		self.open(Frame::array(array), depth);
		self.finish()
	}

	pub(crate) fn write_object(mut self, object: &'a JsonObject, depth: usize) -> String {
		self.open(Frame::object(object), depth);
		self.finish()
	}

	fn open(&mut self, frame: Frame<'a>, depth: usize) {
		self.out.push_str(if frame.is_array() { "[\n" } else { "{\n" });
		self.stack.push((frame, depth));
	}

	fn value(&mut self, value: &'a JsonValue, depth: usize, indention: usize) {
		if value.is_container() && self.width(value) + indention > self.max_width {
			match value {
				JsonValue::Array(array) => self.open(Frame::array(array), depth),
				JsonValue::Object(object) => self.open(Frame::object(object), depth),
				_ => {}
			}
		} else {
			self.out.push_str(&stringify_pretty_single_line(value));
		}
	}

	fn width(&mut self, value: &JsonValue) -> usize {
		let key = ptr::from_ref(value);
		if !self.widths.contains_key(&key) {
			measure(value, &mut self.widths);
		}
		self.widths.get(&key).copied().unwrap_or(0)
	}

	fn finish(mut self) -> String {
		while let Some((frame, depth)) = self.stack.last_mut() {
			let depth = *depth;
			if let Some((first, key, item)) = frame.next() {
				if !first {
					self.out.push_str(",\n");
				}
				let indent = "  ".repeat(depth + 1);
				self.out.push_str(&indent);
				let mut indention = indent.len();
				if let Some(key) = key {
					let key = format!("\"{}\": ", escape_json_string(key));
					indention += key.len();
					self.out.push_str(&key);
				}
				self.value(item, depth + 1, indention);
			} else {
				self.out.push('\n');
				self.out.push_str(&"  ".repeat(depth));
				self.out.push(if frame.is_array() { ']' } else { '}' });
				self.stack.pop();
			}
		}
		self.out
	}
}

/// Record the single line width of `root` and every container below it, children before parents.
fn measure(root: &JsonValue, widths: &mut HashMap<*const JsonValue, usize>) {
	fn item_width(item: &JsonValue, widths: &HashMap<*const JsonValue, usize>) -> usize {
		if item.is_container() {
			widths.get(&ptr::from_ref(item)).copied().unwrap_or(0)
		} else {
			stringify(item).len()
		}
	}

	// "[ " and " ]" around the items, ", " between them
	fn bracketed(items: impl Iterator<Item = usize>) -> usize {
		let (count, sum) = items.fold((0usize, 0), |(count, sum), width| (count + 1, sum + width));
		4 + sum + 2 * count.saturating_sub(1)
	}

	let mut stack = vec![(root, false)];
	while let Some((value, children_measured)) = stack.pop() {
		if !children_measured {
			stack.push((value, true));
			match value {
				JsonValue::Array(array) => stack.extend(array.iter().filter(|c| c.is_container()).map(|c| (c, false))),
				JsonValue::Object(object) => stack.extend(
					object
						.iter()
						.map(|(_, c)| c)
						.filter(|c| c.is_container())
						.map(|c| (c, false)),
				),
				_ => {}
			}
			continue;
		}

		let width = match value {
			JsonValue::Array(array) => bracketed(array.iter().map(|item| item_width(item, widths))),
			JsonValue::Object(object) => bracketed(
				object
					.iter()
					.map(|(key, item)| escape_json_string(key).len() + 4 + item_width(item, widths)),
			),
			_ => continue,
		};
		widths.insert(ptr::from_ref(value), width);
	}
}
