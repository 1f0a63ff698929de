use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::lexer::Token;

/// Parsed program: the executable tree plus the function table built while
/// parsing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Root form. The single top-level form when there is exactly one,
    /// otherwise a [`Form::Sequence`] of all of them.
    pub root: Form,
    /// Every function defined in the source, keyed by name
    pub functions: FunctionTable,
}

/// Function name to its latest definition
pub type FunctionTable = BTreeMap<String, Arc<FunctionDef>>;

/// A closed `(defunc name (params...) body)` form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name
    pub name: String,
    /// Parameter names in declaration order
    pub params: Vec<String>,
    /// Body form, evaluated against the call's argument bindings
    pub body: Form,
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// Sum of numbers or concatenation of strings
    Add,
    /// Left fold subtraction
    Subtract,
    /// Product
    Multiply,
    /// Left fold division
    Divide,
    /// Remainder of exactly two operands
    Remainder,
}

impl ArithmeticOp {
    /// Source spelling of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Remainder => "re",
        }
    }
}

/// Node of the program tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Form {
    /// Number or string token, converted to a value on evaluation
    Primitive(Token),

    /// Parameter reference, resolved against the call's bindings
    Variable(String),

    /// Untyped parenthesized group: `(1 2 3)`, a parameter list, or the
    /// implicit top-level group
    Sequence(Vec<Form>),

    /// `(op operand...)`
    Arithmetic {
        /// Operator
        op: ArithmeticOp,
        /// Operands, evaluated left to right
        operands: Vec<Form>,
    },

    /// `(if condition then else?)`
    Conditional(Vec<Form>),

    /// Call of a user function. The definition is captured when the call is
    /// parsed, so later redefinitions of the same name do not affect it.
    Call {
        /// Snapshot of the callee
        function: Arc<FunctionDef>,
        /// Call-site argument expressions
        args: Vec<Form>,
    },
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn list(f: &mut fmt::Formatter, head: &str, items: &[Form]) -> fmt::Result {
            write!(f, "({}", head)?;
            for item in items {
                write!(f, " {}", item)?;
            }
            write!(f, ")")
        }

        match self {
            Form::Primitive(token) => match token.kind {
                crate::lexer::TokenKind::String => write!(f, "\"{}\"", token.lexeme),
                _ => write!(f, "{}", token.lexeme),
            },
            Form::Variable(name) => write!(f, "{}", name),
            Form::Sequence(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Form::Arithmetic { op, operands } => list(f, op.symbol(), operands),
            Form::Conditional(items) => list(f, "if", items),
            Form::Call { function, args } => list(f, &function.name, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_display_round_trips_shape() {
        let form = Form::Arithmetic {
            op: ArithmeticOp::Add,
            operands: vec![
                Form::Primitive(Token::new(TokenKind::Number, "1", 1, 4)),
                Form::Conditional(vec![
                    Form::Variable("x".to_string()),
                    Form::Primitive(Token::new(TokenKind::String, "yes", 1, 12)),
                ]),
            ],
        };
        assert_eq!(form.to_string(), r#"(+ 1 (if x "yes"))"#);
        assert_eq!(Form::Sequence(vec![]).to_string(), "()");
    }
}
