use lucky_core::ast::Program;
use lucky_interpreter::{Environment, Interpreter, RuntimeError, Value};

/// Evaluates REPL lines one after another against the same global
/// environment.
pub struct Evaluator {
    environment: Environment,
    max_depth: usize,
}

impl Evaluator {
    pub fn new(max_depth: usize) -> Self {
        Self {
            environment: Environment::new(),
            max_depth,
        }
    }

    pub fn evaluate(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        Interpreter::with_environment(program, self.environment.clone())
            .with_max_depth(self.max_depth)
            .run()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Evaluator;
    use lucky_interpreter::{RuntimeError, Value};

    fn evaluate(evaluator: &mut Evaluator, line: &str) -> Result<Value, RuntimeError> {
        evaluator.evaluate(&lucky_core::parse(line).unwrap())
    }

    #[test]
    fn test_state_survives_between_lines() {
        let mut evaluator = Evaluator::new(100);

        assert_eq!(
            evaluate(&mut evaluator, "function inc(x) { return x + 1 }").map(|v| v.to_string()),
            Ok("<function inc>".to_owned())
        );
        assert_eq!(evaluate(&mut evaluator, "a = inc(1)"), Ok(Value::Number(2.0)));
        assert_eq!(
            evaluate(&mut evaluator, "b"),
            Err(RuntimeError::NameError("b".into()))
        );
        assert_eq!(evaluate(&mut evaluator, "inc(a)"), Ok(Value::Number(3.0)));
    }
}
