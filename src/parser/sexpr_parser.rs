use std::sync::Arc;

use super::ast::{ArithmeticOp, Form, FunctionDef, FunctionTable, Program};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// What an open parenthesized form has turned into so far
#[derive(Debug, Clone)]
enum FrameKind {
    /// No head token seen yet. Closes to a [`Form::Sequence`] unless its
    /// first token resolves it to something else.
    Open,
    /// Parameter list directly after a `defunc` name
    Parameters,
    /// `(+ ...)`, `(- ...)`, `(* ...)`, `(/ ...)`, `(re ...)`
    Arithmetic(ArithmeticOp),
    /// `(if ...)`
    Conditional,
    /// `(defunc ...)`, consumed into the function table when closed
    Definition,
    /// Call of a function defined earlier in the source
    Call(Arc<FunctionDef>),
}

/// A form between its `(` and its `)`
#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    children: Vec<Form>,
    /// Position of the opening parenthesis
    line: usize,
    column: usize,
}

impl Frame {
    fn new(kind: FrameKind, open: &Token) -> Self {
        Frame {
            kind,
            children: Vec::new(),
            line: open.line,
            column: open.column,
        }
    }

    fn malformed(&self, message: impl Into<String>) -> Error {
        Error::MalformedDefinition {
            line: self.line,
            col: self.column,
            message: message.into(),
        }
    }
}

/// Where in the innermost open form the next token lands
enum Slot {
    /// Inside a `defunc` parameter list
    Parameter,
    /// First token after `defunc`
    FunctionName,
    /// First token of an unresolved form
    Head,
    /// Anywhere else
    Operand,
}

/// Result of closing a frame
enum Closed {
    Form(Form),
    Definition(FunctionDef),
}

/// Single-pass, stack-based parser
///
/// Every `(` pushes an open frame. The first token inside a frame decides
/// what it becomes: an operator, `if`, `defunc` or the name of an already
/// defined function turns it into the matching typed form, anything else
/// leaves it an untyped sequence. Closing a `defunc` frame stores the
/// definition in the function table instead of attaching it to its parent.
pub struct SExprParser {
    tokens: Vec<Token>,
    /// Open forms, innermost last
    stack: Vec<Frame>,
    /// Completed top-level forms
    top_level: Vec<Form>,
    functions: FunctionTable,
    /// Number of `defunc` frames currently open. While non-zero, unknown
    /// identifiers are parameter references instead of errors.
    definition_depth: usize,
}

impl SExprParser {
    /// Creates a new parser over a complete token list
    pub fn new(tokens: Vec<Token>) -> Self {
        SExprParser {
            tokens,
            stack: Vec::new(),
            top_level: Vec::new(),
            functions: FunctionTable::new(),
            definition_depth: 0,
        }
    }

    /// Parses the tokens into a program tree and its function table
    pub fn parse(&mut self) -> Result<Program> {
        for token in std::mem::take(&mut self.tokens) {
            match token.kind {
                TokenKind::LeftParen => self.open_form(&token)?,
                TokenKind::RightParen => self.close_form(&token)?,
                _ => self.push_token(token)?,
            }
        }

        if let Some(frame) = self.stack.last() {
            return Err(Error::UnclosedForm {
                line: frame.line,
                col: frame.column,
            });
        }

        let mut forms = std::mem::take(&mut self.top_level);
        let root = if forms.len() == 1 {
            forms.remove(0)
        } else {
            Form::Sequence(forms)
        };

        Ok(Program {
            root,
            functions: std::mem::take(&mut self.functions),
        })
    }

    fn open_form(&mut self, token: &Token) -> Result<()> {
        let kind = match self.stack.last() {
            Some(frame) => match frame.kind {
                FrameKind::Parameters => {
                    return Err(frame.malformed("parameter list may only contain identifiers"))
                }
                FrameKind::Definition if frame.children.is_empty() => {
                    return Err(frame.malformed("expected a function name after defunc"))
                }
                FrameKind::Definition if frame.children.len() == 1 => FrameKind::Parameters,
                _ => FrameKind::Open,
            },
            None => FrameKind::Open,
        };

        self.stack.push(Frame::new(kind, token));
        Ok(())
    }

    fn close_form(&mut self, token: &Token) -> Result<()> {
        let frame = self.stack.pop().ok_or(Error::UnmatchedParen {
            line: token.line,
            col: token.column,
        })?;

        match Self::finish(frame)? {
            Closed::Definition(def) => self.define(def),
            Closed::Form(form) => match self.stack.last_mut() {
                Some(parent) => parent.children.push(form),
                None => self.top_level.push(form),
            },
        }

        Ok(())
    }

    fn push_token(&mut self, token: Token) -> Result<()> {
        let in_definition = self.definition_depth > 0;

        let Some(frame) = self.stack.last_mut() else {
            return Err(Error::syntax(
                token.line,
                token.column,
                format!("expected '(' before {} at top level", describe(&token)),
            ));
        };

        let slot = match frame.kind {
            FrameKind::Parameters => Slot::Parameter,
            FrameKind::Definition if frame.children.is_empty() => Slot::FunctionName,
            FrameKind::Open if frame.children.is_empty() => Slot::Head,
            _ => Slot::Operand,
        };

        match slot {
            Slot::Parameter => {
                if token.kind != TokenKind::Identifier {
                    return Err(frame.malformed(format!(
                        "parameter list may only contain identifiers, found {}",
                        describe(&token)
                    )));
                }
                frame.children.push(Form::Variable(token.lexeme));
                return Ok(());
            }
            Slot::FunctionName => {
                if token.kind != TokenKind::Identifier {
                    return Err(frame.malformed(format!(
                        "expected a function name after defunc, found {}",
                        describe(&token)
                    )));
                }
                frame.children.push(Form::Variable(token.lexeme));
                return Ok(());
            }
            Slot::Head => {
                if let Some(kind) = resolve_head(&token, &self.functions) {
                    tracing::trace!(head = %token.lexeme, line = token.line, "resolved form");
                    if matches!(kind, FrameKind::Definition) {
                        self.definition_depth += 1;
                    }
                    frame.kind = kind;
                    return Ok(());
                }
            }
            Slot::Operand => {}
        }

        let form = match token.kind {
            TokenKind::Number | TokenKind::String => Form::Primitive(token),
            TokenKind::Identifier if in_definition => Form::Variable(token.lexeme),
            TokenKind::Identifier if self.functions.contains_key(&token.lexeme) => {
                return Err(Error::syntax(
                    token.line,
                    token.column,
                    format!(
                        "function '{}' can only be called at the head of a form",
                        token.lexeme
                    ),
                ));
            }
            TokenKind::Identifier => {
                return Err(Error::UndefinedIdentifier {
                    name: token.lexeme,
                    line: token.line,
                    col: token.column,
                });
            }
            kind if kind.is_operator() || kind.is_keyword() => {
                return Err(Error::syntax(
                    token.line,
                    token.column,
                    format!("{} can only appear at the head of a form", kind),
                ));
            }
            kind => {
                return Err(Error::syntax(
                    token.line,
                    token.column,
                    format!("unexpected {}", kind),
                ));
            }
        };

        frame.children.push(form);
        Ok(())
    }

    fn finish(frame: Frame) -> Result<Closed> {
        let form = match frame.kind {
            FrameKind::Open | FrameKind::Parameters => Form::Sequence(frame.children),
            FrameKind::Arithmetic(op) => Form::Arithmetic {
                op,
                operands: frame.children,
            },
            FrameKind::Conditional => Form::Conditional(frame.children),
            FrameKind::Call(function) => Form::Call {
                function,
                args: frame.children,
            },
            FrameKind::Definition => {
                return Self::extract_definition(frame).map(Closed::Definition)
            }
        };

        Ok(Closed::Form(form))
    }

    /// Pulls name, parameters and body out of a closed `defunc` frame
    fn extract_definition(frame: Frame) -> Result<FunctionDef> {
        let parts = frame.children.len();
        let [name, params, body]: [Form; 3] = frame.children.try_into().map_err(|_| {
            Error::MalformedDefinition {
                line: frame.line,
                col: frame.column,
                message: format!(
                    "expected (defunc name (params...) body), found {} part(s)",
                    parts
                ),
            }
        })?;
        let malformed = |message: String| Error::MalformedDefinition {
            line: frame.line,
            col: frame.column,
            message,
        };

        let name = match name {
            Form::Variable(name) => name,
            other => return Err(malformed(format!("invalid function name {}", other))),
        };

        let params = match params {
            Form::Sequence(items) => items
                .into_iter()
                .map(|item| match item {
                    Form::Variable(param) => Ok(param),
                    other => Err(malformed(format!("invalid parameter {}", other))),
                })
                .collect::<Result<Vec<_>>>()?,
            other => {
                return Err(malformed(format!(
                    "parameter list must be parenthesized, found {}",
                    other
                )))
            }
        };

        Ok(FunctionDef { name, params, body })
    }

    fn define(&mut self, def: FunctionDef) {
        self.definition_depth = self.definition_depth.saturating_sub(1);

        let name = def.name.clone();
        let params = def.params.len();
        let replaced = self.functions.insert(name.clone(), Arc::new(def));

        tracing::debug!(
            name = %name,
            params,
            replaced = replaced.is_some(),
            "defined function"
        );
    }
}

/// Typed form a head token opens, if any
fn resolve_head(token: &Token, functions: &FunctionTable) -> Option<FrameKind> {
    let kind = match token.kind {
        TokenKind::Plus => FrameKind::Arithmetic(ArithmeticOp::Add),
        TokenKind::Minus => FrameKind::Arithmetic(ArithmeticOp::Subtract),
        TokenKind::Star => FrameKind::Arithmetic(ArithmeticOp::Multiply),
        TokenKind::Slash => FrameKind::Arithmetic(ArithmeticOp::Divide),
        TokenKind::Remainder => FrameKind::Arithmetic(ArithmeticOp::Remainder),
        TokenKind::If => FrameKind::Conditional,
        TokenKind::Defunc => FrameKind::Definition,
        TokenKind::Identifier => FrameKind::Call(Arc::clone(functions.get(&token.lexeme)?)),
        _ => return None,
    };
    Some(kind)
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::String => format!("string \"{}\"", token.lexeme),
        TokenKind::Number | TokenKind::Identifier => format!("{} '{}'", token.kind, token.lexeme),
        _ => token.kind.to_string(),
    }
}
