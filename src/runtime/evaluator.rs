use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};
use crate::parser::{ArithmeticOp, Form, FunctionDef, Program};
use crate::runtime::{Environment, Value};

/// Tree-walking evaluator
///
/// Evaluation is recursive and depth-first. Function calls carry their
/// definition with them, so the evaluator needs no function table; the only
/// state it keeps is the current call depth for tracing.
#[derive(Debug, Default)]
pub struct FormEvaluator {
    depth: usize,
}

impl FormEvaluator {
    /// Creates a new evaluator
    pub fn new() -> Self {
        FormEvaluator { depth: 0 }
    }

    /// Evaluates a parsed program's root with no bindings
    pub fn execute(&mut self, program: &Program) -> Result<Value> {
        self.evaluate(&program.root, &Environment::new())
    }

    /// Evaluates one form against the given argument bindings
    pub fn evaluate(&mut self, form: &Form, env: &Environment) -> Result<Value> {
        match form {
            Form::Primitive(token) => self.eval_primitive(token),
            Form::Variable(name) => env.get(name),
            Form::Sequence(items) => self.eval_sequence(items, env),
            Form::Arithmetic { op, operands } => {
                let values = operands
                    .iter()
                    .map(|operand| self.evaluate(operand, env))
                    .collect::<Result<Vec<_>>>()?;
                apply_arithmetic(*op, values)
            }
            Form::Conditional(items) => self.eval_if(items, env),
            Form::Call { function, args } => self.eval_call(function, args, env),
        }
    }

    fn eval_primitive(&self, token: &Token) -> Result<Value> {
        match token.kind {
            TokenKind::Number => token.lexeme.parse::<f64>().map(Value::Number).map_err(|_| {
                Error::syntax(
                    token.line,
                    token.column,
                    format!("invalid number '{}'", token.lexeme),
                )
            }),
            TokenKind::String => Ok(Value::String(token.lexeme.clone())),
            other => Err(Error::syntax(
                token.line,
                token.column,
                format!("{} is not a literal", other),
            )),
        }
    }

    /// Joins the textual form of every child with newlines
    fn eval_sequence(&mut self, items: &[Form], env: &Environment) -> Result<Value> {
        if items.is_empty() {
            return Ok(Value::Null);
        }

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            lines.push(self.evaluate(item, env)?.to_string());
        }
        Ok(Value::String(lines.join("\n")))
    }

    fn eval_if(&mut self, items: &[Form], env: &Environment) -> Result<Value> {
        if !(2..=3).contains(&items.len()) {
            return Err(Error::arity("if", "2 or 3", items.len()));
        }

        if self.evaluate(&items[0], env)?.is_truthy() {
            self.evaluate(&items[1], env)
        } else if let Some(else_branch) = items.get(2) {
            self.evaluate(else_branch, env)
        } else {
            Ok(Value::Null)
        }
    }

    fn eval_call(
        &mut self,
        function: &FunctionDef,
        args: &[Form],
        env: &Environment,
    ) -> Result<Value> {
        // Arguments are evaluated in the caller's bindings
        let mut values = Vec::with_capacity(args.len());
        self.collect_arguments(args, env, &mut values)?;

        let call_env = Environment::bind_arguments(&function.params, values);

        self.depth += 1;
        tracing::trace!(
            function = %function.name,
            args = call_env.len(),
            depth = self.depth,
            "call"
        );
        let result = self.evaluate(&function.body, &call_env);
        self.depth -= 1;

        result
    }

    /// Evaluates call-site arguments, splicing untyped groups into the list
    fn collect_arguments(
        &mut self,
        args: &[Form],
        env: &Environment,
        out: &mut Vec<Value>,
    ) -> Result<()> {
        for arg in args {
            match arg {
                Form::Sequence(items) => self.collect_arguments(items, env, out)?,
                other => out.push(self.evaluate(other, env)?),
            }
        }
        Ok(())
    }
}

fn apply_arithmetic(op: ArithmeticOp, values: Vec<Value>) -> Result<Value> {
    match op {
        ArithmeticOp::Add => add(values),
        ArithmeticOp::Subtract => {
            let numbers = numeric_operands(&values)?;
            let (first, rest) = numbers
                .split_first()
                .ok_or_else(|| Error::arity(op.symbol(), "at least 1", 0))?;
            Ok(Value::Number(rest.iter().fold(*first, |acc, n| acc - n)))
        }
        ArithmeticOp::Multiply => {
            let numbers = numeric_operands(&values)?;
            Ok(Value::Number(numbers.iter().product::<f64>()))
        }
        ArithmeticOp::Divide => {
            // Each operand is checked in order, so a zero ahead of a
            // non-number reports the division by zero
            let mut numbers = Vec::with_capacity(values.len());
            for value in &values {
                let n = value.as_number()?;
                if n == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                numbers.push(n);
            }
            let (first, rest) = numbers
                .split_first()
                .ok_or_else(|| Error::arity(op.symbol(), "at least 1", 0))?;
            Ok(Value::Number(rest.iter().fold(*first, |acc, n| acc / n)))
        }
        ArithmeticOp::Remainder => {
            if values.len() != 2 {
                return Err(Error::arity(op.symbol(), "exactly 2", values.len()));
            }
            let dividend = values[0].as_number()?;
            let divisor = values[1].as_number()?;
            if divisor == 0.0 {
                return Err(Error::DivisionByZero);
            }
            Ok(Value::Number(dividend % divisor))
        }
    }
}

/// Sums numbers or concatenates strings; mixing the two is an error
fn add(values: Vec<Value>) -> Result<Value> {
    if values.iter().all(|v| matches!(v, Value::Number(_))) {
        let sum: f64 = values.iter().filter_map(number).sum();
        return Ok(Value::Number(sum));
    }

    if values.iter().all(|v| matches!(v, Value::String(_))) {
        let mut text = String::new();
        for value in &values {
            text.push_str(value.as_string()?);
        }
        return Ok(Value::String(text));
    }

    let first = &values[0];
    match values.iter().find(|v| v.type_name() != first.type_name()) {
        Some(other) => Err(Error::InvalidOperation {
            op: "add".to_string(),
            left_type: first.type_name(),
            right_type: other.type_name(),
        }),
        None => Err(Error::TypeError {
            expected: "number or string".to_string(),
            got: first.type_name(),
        }),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        _ => None,
    }
}

fn numeric_operands(values: &[Value]) -> Result<Vec<f64>> {
    values.iter().map(Value::as_number).collect()
}
