//! Calendar text decoding: unfolding, field decoders and the block parser.

mod error;
pub mod fields;
pub mod lexer;
mod parser;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::{DecodeOptions, decode, decode_with};
