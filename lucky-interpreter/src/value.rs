use std::fmt::Display;
use std::rc::Rc;

use gc::{Finalize, Gc, Trace};
use lucky_core::ast::{BinaryOperator, FunctionDeclaration, Statement, UnaryOperator};

use crate::environment::Environment;
use crate::error::{IllegalOperation, RuntimeError};

#[derive(Debug, Clone, Trace, Finalize)]
pub enum Value {
    Number(f64),
    Boolean(bool),
    Function(Function),
    None,
}

impl Value {
    pub fn function(declaration: &FunctionDeclaration, environment: Environment) -> Value {
        Value::Function(Function(Gc::new(Closure {
            name: declaration.name.as_ref().map(|ident| ident.name.clone()),
            parameters: declaration
                .parameters
                .iter()
                .map(|ident| ident.name.clone())
                .collect(),
            body: declaration.body.clone(),
            environment,
        })))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Function(_) => "function",
            Value::None => "none",
        }
    }

    /// Applies `operator` with `self` on the left. Only numbers support
    /// binary operators.
    pub fn binary_operation(
        &self,
        operator: BinaryOperator,
        right: &Value,
    ) -> Result<Value, RuntimeError> {
        match (self, right) {
            (Value::Number(left), Value::Number(right)) => {
                number_operation(operator, *left, *right)
            }
            _ => Err(IllegalOperation::Binary {
                operator,
                left: self.type_name(),
                right: right.type_name(),
            }
            .into()),
        }
    }

    pub fn unary_operation(&self, operator: UnaryOperator) -> Result<Value, RuntimeError> {
        match (operator, self) {
            (UnaryOperator::Plus, Value::Number(value)) => Ok(Value::Number(*value)),
            (UnaryOperator::Minus, Value::Number(value)) => Ok(Value::Number(-value)),
            _ => Err(IllegalOperation::Unary {
                operator,
                operand: self.type_name(),
            }
            .into()),
        }
    }
}

fn number_operation(operator: BinaryOperator, left: f64, right: f64) -> Result<Value, RuntimeError> {
    use BinaryOperator::*;
    let value = match operator {
        Add => Value::Number(left + right),
        Subtract => Value::Number(left - right),
        Multiply => Value::Number(left * right),
        Divide => {
            if right == 0.0 {
                return Err(RuntimeError::ZeroDivision);
            }
            Value::Number(left / right)
        }
        Power => Value::Number(left.powf(right)),
        LessThan => Value::Boolean(left < right),
        LessEqual => Value::Boolean(left <= right),
        Equal => Value::Boolean(left == right),
        GreaterThan => Value::Boolean(left > right),
        GreaterEqual => Value::Boolean(left >= right),
    };
    Ok(value)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(left), Value::Number(right)) => left == right,
            (Value::Boolean(left), Value::Boolean(right)) => left == right,
            (Value::Function(left), Value::Function(right)) => left == right,
            (Value::None, Value::None) => true,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Function(function) => match function.name() {
                Some(name) => write!(f, "<function {}>", name),
                None => write!(f, "<function>"),
            },
            Value::None => write!(f, "None"),
        }
    }
}

/// A function value: parameters and body plus the environment it was
/// created in. Two values are equal only when they come from the same
/// evaluation of a declaration.
#[derive(Clone, Trace, Finalize)]
pub struct Function(Gc<Closure>);

#[derive(Trace, Finalize)]
pub struct Closure {
    #[unsafe_ignore_trace]
    name: Option<Rc<str>>,
    #[unsafe_ignore_trace]
    parameters: Vec<Rc<str>>,
    #[unsafe_ignore_trace]
    body: Rc<[Statement]>,
    environment: Environment,
}

impl Function {
    pub fn name(&self) -> Option<&Rc<str>> {
        self.0.name.as_ref()
    }

    pub fn parameters(&self) -> &[Rc<str>] {
        &self.0.parameters
    }

    pub fn body(&self) -> &Rc<[Statement]> {
        &self.0.body
    }

    pub fn environment(&self) -> &Environment {
        &self.0.environment
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Gc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.0.name)
            .field("parameters", &self.0.parameters)
            .finish()
    }
}
