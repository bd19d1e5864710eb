pub mod check;
pub mod format;
pub mod probe;

use anyhow::{Context, Result};
use stackjson_core::json::{JsonValue, parse};
use std::{
	fs,
	io::{self, Read},
};

/// Read a document from a file, or from stdin if `input` is `-`.
pub fn read_input(input: &str) -> Result<String> {
	if input == "-" {
		let mut text = String::new();
		io::stdin()
			.read_to_string(&mut text)
			.context("reading JSON from stdin")?;
		return Ok(text);
	}
	fs::read_to_string(input).with_context(|| format!("reading file '{input}'"))
}

/// Read and parse a document. A failed parse becomes an error naming the input.
pub fn parse_input(input: &str) -> Result<JsonValue> {
	let text = read_input(input)?;
	log::debug!("read {} bytes from '{input}'", text.len());
	parse(&text)
		.into_result()
		.with_context(|| format!("parsing '{input}'"))
}
