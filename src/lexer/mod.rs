//! Lexical analysis
//!
//! Converts source text into a flat list of tokens.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::SExprScanner;
pub use token::{Token, TokenKind};
