mod error;
mod lexer;
mod parser;
mod stringify;
mod types;

pub use error::ParseError;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{Parser, ParserState, parse, parse_optional};
pub use stringify::*;
pub use types::{JsonArray, JsonObject, JsonValue};
