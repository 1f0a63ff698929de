//! # arp - A Tiny Parenthesized Scripting Language
//!
//! A minimal interpreter for an S-expression language with arithmetic,
//! integer remainder, a ternary conditional, user-defined functions and
//! string literals.
//!
//! ## Quick Start
//!
//! ```rust
//! use arplang::{Evaluator, Parser, Scanner, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = r#"
//!     (defunc add (a b) (+ a b))
//!     (add 2 3)
//! "#;
//!
//! // Tokenize (scan)
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens()?;
//!
//! // Parse into a tree plus a function table
//! let mut parser = Parser::new(tokens);
//! let program = parser.parse()?;
//! assert!(program.functions.contains_key("add"));
//!
//! // Execute
//! let mut evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Value::Number(5.0));
//! # Ok(())
//! # }
//! ```
//!
//! Or in one step with [`run`]:
//!
//! ```rust
//! use arplang::{run, Value};
//!
//! assert_eq!(run(r#"(if 0 "yes" "no")"#).unwrap(), Value::String("no".to_string()));
//! assert_eq!(run("(- 10 3 2)").unwrap(), Value::Number(5.0));
//! ```
//!
//! ## Language Overview
//!
//! - `(+ a b ...)` sums numbers or concatenates strings (never both)
//! - `(- a b ...)`, `(/ a b ...)` fold left from the first operand
//! - `(* a b ...)` multiplies
//! - `(re a b)` remainder, exactly two operands
//! - `(if cond then else?)` conditional, `else` optional
//! - `(defunc name (params...) body)` defines a function; it can be called
//!   by any form after the definition closes
//!
//! Functions only see their own parameters. A call keeps the definition that
//! was current when the call was parsed, so redefining a function later does
//! not change earlier calls.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → (Tree, Function Table) → Evaluator → Value
//! ```
//!
//! When a program has more than one top-level form (not counting
//! definitions), its result is the text of every form's value joined with
//! newlines.
//!
//! ## Error Handling
//!
//! ```rust
//! use arplang::{run, Error, ErrorCategory};
//!
//! let err = run("(/ 4 0)").unwrap_err();
//! assert_eq!(err, Error::DivisionByZero);
//! assert_eq!(err.category(), ErrorCategory::ArithmeticDomain);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

pub use error::{Error, ErrorCategory, Result};
pub use lexer::{SExprScanner, Token, TokenKind};
pub use parser::{ArithmeticOp, Form, FunctionDef, FunctionTable, Program, SExprParser};
pub use runtime::{Environment, FormEvaluator, Value};

/// Type alias for the S-expression scanner (lexer).
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser.
pub type Parser = SExprParser;

/// Type alias for the tree-walking evaluator.
pub type Evaluator = FormEvaluator;

/// Converts source text into tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Scanner::new(source).scan_tokens()
}

/// Builds the program tree and function table from tokens
pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    Parser::new(tokens).parse()
}

/// Evaluates a parsed program
pub fn evaluate(program: &Program) -> Result<Value> {
    Evaluator::new().execute(program)
}

/// Tokenizes, parses and evaluates source text
pub fn run(source: &str) -> Result<Value> {
    let program = parse(tokenize(source)?)?;
    evaluate(&program)
}
