//! Error types for the arp interpreter

use thiserror::Error;

/// Interpreter errors
///
/// Every error is fatal: the run that produced it is aborted and nothing is
/// recovered. Scanner and parser errors carry the 1-indexed position of the
/// offending token; evaluation errors do not.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Scan errors
    /// Character that cannot start any token
    ///
    /// **Example:** `(+ 1 %)`, `(_x)` (identifiers must start with a letter)
    #[error("Unexpected character '{ch}' at line {line}, column {col}")]
    UnexpectedCharacter {
        /// Offending character
        ch: char,
        /// Line number where the character appears
        line: usize,
        /// Column number where the character appears
        col: usize,
    },

    /// String literal with no closing quote
    #[error("Unterminated string starting at line {line}, column {col}")]
    UnterminatedString {
        /// Line of the opening quote
        line: usize,
        /// Column of the opening quote
        col: usize,
    },

    // Parse errors
    /// `)` with no open form to close
    #[error("Unmatched ')' at line {line}, column {col}")]
    UnmatchedParen {
        /// Line of the stray parenthesis
        line: usize,
        /// Column of the stray parenthesis
        col: usize,
    },

    /// Input ended while a form was still open
    #[error("Unclosed '(' opened at line {line}, column {col}")]
    UnclosedForm {
        /// Line of the innermost unclosed parenthesis
        line: usize,
        /// Column of the innermost unclosed parenthesis
        col: usize,
    },

    /// Token in a position no form accepts
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Identifier that is neither an operator, a keyword nor a function
    /// defined earlier in the source
    ///
    /// **Prevention:** close the `(defunc name ...)` form before the first call
    #[error("Undefined identifier '{name}' at line {line}, column {col}: functions must be defined before use")]
    UndefinedIdentifier {
        /// Identifier text
        name: String,
        /// Line number of the identifier
        line: usize,
        /// Column number of the identifier
        col: usize,
    },

    /// `defunc` form with the wrong shape
    ///
    /// **Expected shape:** `(defunc name (param ...) body)`
    #[error("Malformed defunc at line {line}, column {col}: {message}")]
    MalformedDefinition {
        /// Line of the `(` that opened the definition
        line: usize,
        /// Column of the `(` that opened the definition
        col: usize,
        /// What is wrong with it
        message: String,
    },

    // Runtime errors
    /// Reference to a parameter with no bound value
    ///
    /// **Triggered by:** calling a function with fewer arguments than
    /// parameters, or referencing a name the function does not declare
    #[error("Undefined variable: {name}")]
    UndefinedVariable {
        /// Parameter name
        name: String,
    },

    /// Wrong number of operands
    #[error("Arity error: '{form}' expects {expected} operand(s), got {got}")]
    ArityError {
        /// Form name (`re`, `if`, ...)
        form: String,
        /// Human readable expected count
        expected: String,
        /// Actual operand count
        got: usize,
    },

    /// Type mismatch error
    ///
    /// **Example:** `(* 2 "two")`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Invalid operation for given types
    ///
    /// **Example:** `(+ 1 "a")` (mixing numbers and text)
    #[error("Invalid operation: {op} on types {left_type} and {right_type}")]
    InvalidOperation {
        /// Operation name
        op: String,
        /// Left operand type
        left_type: String,
        /// Right operand type
        right_type: String,
    },

    /// Division or remainder by zero
    ///
    /// **Example:** `(/ 4 0)`, `(re 10 0)`
    #[error("Division by zero")]
    DivisionByZero,
}

/// The kind of failure an [`Error`] reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unterminated string, stray or missing parenthesis, misplaced token
    MalformedSource,
    /// Identifier used before anything defines it
    UnresolvedIdentifier,
    /// Wrong operand count
    Arity,
    /// Wrong operand type
    Type,
    /// Division or remainder by zero
    ArithmeticDomain,
}

impl Error {
    /// Create a syntax error at a position
    pub fn syntax(line: usize, col: usize, msg: impl Into<String>) -> Self {
        Error::SyntaxError {
            line,
            col,
            message: msg.into(),
        }
    }

    /// Create an arity error for a form
    pub fn arity(form: impl Into<String>, expected: impl Into<String>, got: usize) -> Self {
        Error::ArityError {
            form: form.into(),
            expected: expected.into(),
            got,
        }
    }

    /// Classify the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnexpectedCharacter { .. }
            | Error::UnterminatedString { .. }
            | Error::UnmatchedParen { .. }
            | Error::UnclosedForm { .. }
            | Error::SyntaxError { .. }
            | Error::MalformedDefinition { .. } => ErrorCategory::MalformedSource,

            Error::UndefinedIdentifier { .. } | Error::UndefinedVariable { .. } => {
                ErrorCategory::UnresolvedIdentifier
            }

            Error::ArityError { .. } => ErrorCategory::Arity,

            Error::TypeError { .. } | Error::InvalidOperation { .. } => ErrorCategory::Type,

            Error::DivisionByZero => ErrorCategory::ArithmeticDomain,
        }
    }
}

/// Result type for interpreter operations
pub type Result<T> = std::result::Result<T, Error>;
