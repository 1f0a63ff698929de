use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::runtime::Value;

/// Argument bindings of a single function invocation
///
/// Flat on purpose: there is no parent scope, so a function body only ever
/// sees its own parameters. A fresh environment is built for every call and
/// dropped when the call returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment (the top level has no bindings)
    pub fn new() -> Self {
        Environment {
            variables: HashMap::new(),
        }
    }

    /// Pairs parameter names with argument values by position. Surplus
    /// arguments are dropped; surplus parameters stay unbound.
    pub fn bind_arguments(params: &[String], args: Vec<Value>) -> Self {
        let mut env = Environment::new();
        for (name, value) in params.iter().zip(args) {
            env.define(name.clone(), value);
        }
        env
    }

    /// Binds a name, replacing any earlier binding of it
    pub fn define(&mut self, name: String, value: Value) {
        self.variables.insert(name, value);
    }

    /// Gets the value bound to a name
    pub fn get(&self, name: &str) -> Result<Value> {
        self.variables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Number of bound names
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Number(42.0));
        assert_eq!(env.get("x").unwrap(), Value::Number(42.0));

        env.define("x".to_string(), Value::from("shadow"));
        assert_eq!(env.get("x").unwrap(), Value::from("shadow"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_undefined_variable() {
        let env = Environment::new();
        assert!(env.is_empty());
        assert_eq!(
            env.get("missing").unwrap_err(),
            Error::UndefinedVariable {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_bind_fewer_arguments_than_params() {
        let env = Environment::bind_arguments(&names(&["a", "b"]), vec![Value::Number(1.0)]);
        assert_eq!(env.get("a").unwrap(), Value::Number(1.0));
        assert!(env.get("b").is_err());
    }

    #[test]
    fn test_bind_more_arguments_than_params() {
        let env = Environment::bind_arguments(
            &names(&["a"]),
            vec![Value::Number(1.0), Value::Number(2.0)],
        );
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("a").unwrap(), Value::Number(1.0));
    }
}
