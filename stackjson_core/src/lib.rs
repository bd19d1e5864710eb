//! Explicit-stack JSON parsing.
//!
//! The [`json`] module contains a byte-offset lexer, a parser that walks the grammar with two explicit
//! stacks instead of recursion, an insertion-ordered value tree and a serializer.
//!
//! ```rust
//! use stackjson_core::json::{JsonValue, parse};
//!
//! let value = parse(r#"{"name":"stack","depth":[1,[2,[3]]]}"#);
//! assert_eq!(value.type_as_str(), "object");
//! assert_eq!(value.stringify(), r#"{"name":"stack","depth":[1,[2,[3]]]}"#);
//! ```

pub mod json;
