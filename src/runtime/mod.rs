//! Runtime evaluation of parsed programs

mod environment;
mod evaluator;
mod value;

pub use environment::Environment;
pub use evaluator::FormEvaluator;
pub use value::Value;
