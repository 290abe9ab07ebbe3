//! Turns a pattern expression into a [TextPattern](crate::TextPattern).
//!
//! ```text
//! pattern  := segment ( '+' segment )*
//! segment  := text | method
//! text     := '"' ( '\"' | any character except '"' )* '"'
//! method   := name '(' argument ')'
//! name     := SEQUENTIAL | RANDOM | ORG_UNIT_CODE | CURRENT_DATE
//! ```
mod lexer;
use lexer::{Lexer, Token};

mod error;
pub use error::{ParseError, PositionedError};

mod parser;
pub use parser::{parse_optional_pattern, parse_pattern};
