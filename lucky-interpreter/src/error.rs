use std::rc::Rc;

use lucky_core::ast::{BinaryOperator, UnaryOperator};
use thiserror::Error;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum RuntimeError {
    #[error("Identifier {0} is not defined")]
    NameError(Rc<str>),
    #[error("Division by zero")]
    ZeroDivision,
    #[error("Illegal operation: {0}")]
    IllegalOperation(IllegalOperation),
    #[error("Function {function} expects {expected} argument(s) but got {actual}")]
    Arity {
        function: Rc<str>,
        expected: usize,
        actual: usize,
    },
    #[error("Cannot return outside of a function")]
    ReturnOutsideFunction,
    #[error("Maximum call depth of {0} exceeded")]
    StackOverflow(usize),
}

/// A value was used in a way its kind does not support.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum IllegalOperation {
    #[error("{left} {operator} {right}")]
    Binary {
        operator: BinaryOperator,
        left: &'static str,
        right: &'static str,
    },
    #[error("{operator}{operand}")]
    Unary {
        operator: UnaryOperator,
        operand: &'static str,
    },
    #[error("condition must be a boolean, got {0}")]
    Condition(&'static str),
    #[error("the given identifier '{0}' is not callable")]
    NotCallable(Rc<str>),
}

impl From<IllegalOperation> for RuntimeError {
    fn from(value: IllegalOperation) -> Self {
        RuntimeError::IllegalOperation(value)
    }
}
