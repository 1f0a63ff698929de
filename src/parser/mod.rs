//! Parser Module
//!
//! Builds the program tree and the function table from a token list in one
//! left-to-right pass.

mod ast;
mod sexpr_parser;

pub use ast::{ArithmeticOp, Form, FunctionDef, FunctionTable, Program};
pub use sexpr_parser::SExprParser;
