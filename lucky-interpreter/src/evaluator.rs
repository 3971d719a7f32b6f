use lucky_core::ast::{self, Expression, Identifier, Statement};
use lucky_core::stack::ensure_sufficient_stack;

use crate::environment::Environment;
use crate::error::{IllegalOperation, RuntimeError};
use crate::value::{Function, Value};

pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// How a statement finished: either normally with a value, or by a
/// `return` that has to unwind to the innermost call.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Normal(Value),
    Return(Value),
}

/// Runs a parsed program against a global environment. The program is
/// only borrowed, so running it again starts over from the same tree.
pub struct Interpreter<'a> {
    program: &'a ast::Program,
    environment: Environment,
    max_depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: &'a ast::Program) -> Self {
        Self::with_environment(program, Environment::new())
    }

    /// Runs against an existing environment, e.g. one kept alive across
    /// REPL lines.
    pub fn with_environment(program: &'a ast::Program, environment: Environment) -> Self {
        Interpreter {
            program,
            environment,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluates every statement in order and yields the value of the
    /// last one, or `None` for an empty program.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = self.program.statements.len()))]
    pub fn run(&mut self) -> Result<Value, RuntimeError> {
        let mut evaluator = Evaluator::new(self.max_depth);
        evaluator.eval_program(self.program, &mut self.environment)
    }
}

pub fn eval_program(
    program: &ast::Program,
    environment: &mut Environment,
) -> Result<Value, RuntimeError> {
    Evaluator::new(DEFAULT_MAX_DEPTH).eval_program(program, environment)
}

pub fn eval_statement(
    statement: &Statement,
    environment: &mut Environment,
) -> Result<Flow, RuntimeError> {
    Evaluator::new(DEFAULT_MAX_DEPTH).eval_statement(statement, environment)
}

struct Evaluator {
    depth: usize,
    max_depth: usize,
}

impl Evaluator {
    fn new(max_depth: usize) -> Self {
        Evaluator {
            depth: 0,
            max_depth,
        }
    }

    fn eval_program(
        &mut self,
        program: &ast::Program,
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        match self.eval_block(&program.statements, environment)? {
            Flow::Normal(value) => Ok(value),
            Flow::Return(_) => Err(RuntimeError::ReturnOutsideFunction),
        }
    }

    /// Statements in order in the given environment; a `return` stops the
    /// sequence.
    fn eval_block(
        &mut self,
        statements: &[Statement],
        environment: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        let mut output = Value::None;
        for statement in statements {
            match self.eval_statement(statement, environment)? {
                Flow::Normal(value) => output = value,
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Normal(output))
    }

    fn eval_statement(
        &mut self,
        statement: &Statement,
        environment: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        match statement {
            Statement::FunctionDeclaration(declaration) => {
                let function = Value::function(declaration, environment.clone());
                if let Some(name) = &declaration.name {
                    environment.assign(name.name.clone(), function.clone());
                }
                Ok(Flow::Normal(function))
            }
            Statement::If(statement) => self.eval_if_statement(statement, environment),
            Statement::Return(statement) => {
                let value = self.eval_expression(&statement.value, environment)?;
                Ok(Flow::Return(value))
            }
            Statement::Block(statements) => self.eval_block(statements, environment),
            Statement::Expression(expression) => {
                Ok(Flow::Normal(self.eval_expression(expression, environment)?))
            }
        }
    }

    // The consequence runs in the surrounding environment: assignments in
    // it stay visible after the `if`.
    fn eval_if_statement(
        &mut self,
        statement: &ast::IfStatement,
        environment: &mut Environment,
    ) -> Result<Flow, RuntimeError> {
        match self.eval_expression(&statement.condition, environment)? {
            Value::Boolean(true) => match self.eval_block(&statement.consequence, environment)? {
                Flow::Normal(_) => Ok(Flow::Normal(Value::None)),
                flow => Ok(flow),
            },
            Value::Boolean(false) => Ok(Flow::Normal(Value::None)),
            other => Err(IllegalOperation::Condition(other.type_name()).into()),
        }
    }

    fn eval_expression(
        &mut self,
        expression: &Expression,
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        ensure_sufficient_stack(|| match expression {
            Expression::NumberLiteral(numeral) => Ok(Value::Number(numeral.value)),
            Expression::VariableAccess(ident) => environment
                .get(&ident.name)
                .ok_or_else(|| RuntimeError::NameError(ident.name.clone())),
            Expression::VariableAssignment { name, value } => {
                let value = self.eval_expression(value, environment)?;
                environment.assign(name.name.clone(), value.clone());
                Ok(value)
            }
            Expression::BinaryOperation(operator, left, right) => {
                let left = self.eval_expression(left, environment)?;
                let right = self.eval_expression(right, environment)?;
                left.binary_operation(*operator, &right)
            }
            Expression::UnaryOperation(operator, child) => {
                self.eval_expression(child, environment)?.unary_operation(*operator)
            }
            Expression::FunctionCall { name, arguments } => {
                self.eval_call_function(name, arguments, environment)
            }
            Expression::Function(declaration) => {
                Ok(Value::function(declaration, environment.clone()))
            }
        })
    }

    fn eval_call_function(
        &mut self,
        name: &Identifier,
        arguments: &[Expression],
        environment: &mut Environment,
    ) -> Result<Value, RuntimeError> {
        let function = match environment.get(&name.name) {
            Some(Value::Function(ref function)) => function.clone(),
            Some(_) => return Err(IllegalOperation::NotCallable(name.name.clone()).into()),
            None => return Err(RuntimeError::NameError(name.name.clone())),
        };

        if function.parameters().len() != arguments.len() {
            return Err(RuntimeError::Arity {
                function: name.name.clone(),
                expected: function.parameters().len(),
                actual: arguments.len(),
            });
        }

        let arguments = arguments
            .iter()
            .map(|argument| self.eval_expression(argument, environment))
            .collect::<Result<Vec<_>, _>>()?;

        self.apply_function(name, &function, arguments)
    }

    fn apply_function(
        &mut self,
        name: &Identifier,
        function: &Function,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        if self.depth >= self.max_depth {
            tracing::debug!(function = %name.name, depth = self.depth, "call depth exceeded");
            return Err(RuntimeError::StackOverflow(self.max_depth));
        }

        let mut call_environment = Environment::new_enclosed(function.environment().clone());
        for (parameter, argument) in function.parameters().iter().zip(arguments) {
            call_environment.define(parameter.clone(), argument);
        }

        self.depth += 1;
        tracing::trace!(function = %name.name, depth = self.depth, "call");
        let result = self.eval_block(function.body(), &mut call_environment);
        self.depth -= 1;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal(_) => Ok(Value::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Flow, Interpreter};
    use crate::environment::Environment;
    use crate::error::{IllegalOperation, RuntimeError};
    use crate::value::Value;
    use lucky_core::ast::{BinaryOperator, UnaryOperator};

    fn evaluate(input: &str) -> Result<Value, RuntimeError> {
        let program = lucky_core::parse(input).unwrap();
        Interpreter::new(&program).run()
    }

    fn test_evaluation(inputs: Vec<(&str, Result<Value, RuntimeError>)>) {
        for (input, output) in inputs {
            assert_eq!(evaluate(input), output, "{input}");
        }
    }

    fn number(value: f64) -> Result<Value, RuntimeError> {
        Ok(Value::Number(value))
    }

    #[test]
    fn test_literals() {
        let inputs = vec![
            ("5", number(5.0)),
            ("1_000.5", number(1000.5)),
            (".25", number(0.25)),
            ("", Ok(Value::None)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_arithmetic() {
        let inputs = vec![
            ("--5", number(5.0)),
            ("+-5", number(-5.0)),
            ("1 + 2 * 3", number(7.0)),
            ("(1 + 2) * 3", number(9.0)),
            ("24 / 3 - 2.5 * 2 ** 3", number(-12.0)),
            ("2 ** 3 ** 2", number(512.0)),
            ("-2 ** 2", number(-4.0)),
            ("(-2) ** 2", number(4.0)),
            ("2 ** -1", number(0.5)),
            ("10 - 4 - 3", number(3.0)),
            ("7 / 2", number(3.5)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_comparisons() {
        let inputs = vec![
            ("1 < 2", Ok(Value::Boolean(true))),
            ("2 <= 1", Ok(Value::Boolean(false))),
            ("1 + 1 == 2", Ok(Value::Boolean(true))),
            ("3 > 2", Ok(Value::Boolean(true))),
            ("2 >= 3", Ok(Value::Boolean(false))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_runtime_errors() {
        let inputs = vec![
            ("2 / 0", Err(RuntimeError::ZeroDivision)),
            ("x", Err(RuntimeError::NameError("x".into()))),
            ("x = y + 1", Err(RuntimeError::NameError("y".into()))),
            ("foo()", Err(RuntimeError::NameError("foo".into()))),
            (
                "(1 < 2) + 1",
                Err(RuntimeError::IllegalOperation(IllegalOperation::Binary {
                    operator: BinaryOperator::Add,
                    left: "boolean",
                    right: "number",
                })),
            ),
            (
                "-(1 == 1)",
                Err(RuntimeError::IllegalOperation(IllegalOperation::Unary {
                    operator: UnaryOperator::Minus,
                    operand: "boolean",
                })),
            ),
            (
                "x = 1\nx()",
                Err(RuntimeError::IllegalOperation(IllegalOperation::NotCallable(
                    "x".into(),
                ))),
            ),
            (
                "if (1) { 2 }",
                Err(RuntimeError::IllegalOperation(IllegalOperation::Condition(
                    "number",
                ))),
            ),
            ("return 1", Err(RuntimeError::ReturnOutsideFunction)),
            ("{ return 1 }", Err(RuntimeError::ReturnOutsideFunction)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_assignments() {
        let inputs = vec![
            ("x = 5\nx", number(5.0)),
            ("x = 5", number(5.0)),
            ("x = y = 2\nx + y", number(4.0)),
            ("x = 1\nx = x + 1\nx", number(2.0)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_if_statement() {
        let inputs = vec![
            ("x = 1\nif (x < 2) { x = 10 }\nx", number(10.0)),
            ("x = 1\nif (x > 2) { x = 10 }\nx", number(1.0)),
            ("if (1 < 2) { 5 }", Ok(Value::None)),
            ("if (1 < 2) { y = 3 }\ny", number(3.0)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_blocks() {
        let inputs = vec![
            ("{ 1; 2 }", number(2.0)),
            ("{}", Ok(Value::None)),
            ("{ a = 4 }\na", number(4.0)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_function_application() {
        let inputs = vec![
            ("function id(x) { return x }\nid(5)", number(5.0)),
            ("function add(a, b) { return a + b }\nadd(2, 3)", number(5.0)),
            ("function f() { 1 }\nf()", Ok(Value::None)),
            ("function f() {}\nf()", Ok(Value::None)),
            ("double = function(x) { return x * 2 }\ndouble(21)", number(42.0)),
            ("function f(x) { return x }\nf(f(f(3)))", number(3.0)),
            (
                "function f(n) { if (n < 0) { return 1 }\n return 2 }\nf(-1) * 10 + f(1)",
                number(12.0),
            ),
            (
                "function first() { { return 1 }\n return 2 }\nfirst()",
                number(1.0),
            ),
            ("x = 1; function f(x) { x = 5; return x }; r = f(2); x", number(1.0)),
            ("x = 1; function f(x) { x = 5; return x }; f(2)", number(5.0)),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_arity_errors() {
        let program = "function foo(a, b) { return a + b }\n";
        for (call, actual) in [("foo()", 0), ("foo(1)", 1), ("foo(1, 2, 3)", 3)] {
            assert_eq!(
                evaluate(&format!("{program}{call}")),
                Err(RuntimeError::Arity {
                    function: "foo".into(),
                    expected: 2,
                    actual,
                }),
                "{call}"
            );
        }
    }

    #[test]
    fn test_declaration_is_a_value() {
        let result = evaluate("function foo() {}").unwrap();
        assert_eq!(result.to_string(), "<function foo>");

        let result = evaluate("function foo() {}\ng = foo\ng == foo");
        assert!(matches!(
            result,
            Err(RuntimeError::IllegalOperation(IllegalOperation::Binary { .. }))
        ));
    }

    #[test]
    fn test_closure() {
        let inputs = vec![
            (
                r#"
function counter() {
    count = 0
    return function() {
        count = count + 1
        return count
    }
}
next = counter()
next()
next()
next()"#,
                number(3.0),
            ),
            (
                r#"
function adder(x) {
    return function(y) { return x + y }
}
addTwo = adder(2)
addTen = adder(10)
addTwo(1) + addTen(1)"#,
                number(14.0),
            ),
            (
                r#"
function outer() {
    function isEven(n) {
        if (n == 0) { return 1 == 1 }
        return isOdd(n - 1)
    }
    function isOdd(n) {
        if (n == 0) { return 1 == 0 }
        return isEven(n - 1)
    }
    return isEven
}
even = outer()
even(7)"#,
                Ok(Value::Boolean(false)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_recursion() {
        let input = r#"
function fib(n) {
    if (n < 2) {
        return n
    }

    return fib(n - 2) + fib(n - 1)
}
fib(15)"#;

        assert_eq!(evaluate(input), number(610.0));
    }

    #[test]
    fn test_call_depth_limit() {
        let program = lucky_core::parse("function f(n) { return f(n + 1) }\nf(0)").unwrap();

        assert_eq!(
            Interpreter::new(&program).with_max_depth(50).run(),
            Err(RuntimeError::StackOverflow(50))
        );

        let program = lucky_core::parse(
            "function down(n) { if (n == 0) { return 0 }\n return down(n - 1) }\ndown(50)",
        )
        .unwrap();
        assert_eq!(
            Interpreter::new(&program).with_max_depth(51).run(),
            number(0.0)
        );
        assert_eq!(
            Interpreter::new(&program).with_max_depth(50).run(),
            Err(RuntimeError::StackOverflow(50))
        );
    }

    #[test]
    fn test_default_depth_limit() {
        let program = lucky_core::parse("function f(n) { return f(n + 1) }\nf(0)").unwrap();

        assert_eq!(
            Interpreter::new(&program).run(),
            Err(RuntimeError::StackOverflow(super::DEFAULT_MAX_DEPTH))
        );
    }

    #[test]
    fn test_depth_resets_after_error() {
        let program = lucky_core::parse(
            "function f(n) { if (n == 0) { return 1 / 0 }\n return f(n - 1) }\nf(3)",
        )
        .unwrap();
        let mut interpreter = Interpreter::new(&program).with_max_depth(4);

        for _ in 0..3 {
            assert_eq!(interpreter.run(), Err(RuntimeError::ZeroDivision));
        }
    }

    #[test]
    fn test_run_twice() {
        let program = lucky_core::parse("x = 2\ny = x ** 3\ny + 1").unwrap();

        let first = Interpreter::new(&program).run();
        let second = Interpreter::new(&program).run();
        assert_eq!(first, number(9.0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_environment() {
        let environment = Environment::new();
        let definition = lucky_core::parse("function sq(x) { return x * x }").unwrap();
        Interpreter::with_environment(&definition, environment.clone())
            .run()
            .unwrap();

        let usage = lucky_core::parse("sq(7)").unwrap();
        let mut interpreter = Interpreter::with_environment(&usage, environment.clone());
        assert_eq!(interpreter.run(), number(49.0));
        assert!(interpreter.environment().ptr_eq(&environment));
    }

    #[test]
    fn test_eval_statement_flow() {
        let program = lucky_core::parse("return 1 + 1").unwrap();
        let flow = super::eval_statement(&program.statements[0], &mut Environment::new());
        assert_eq!(flow, Ok(Flow::Return(Value::Number(2.0))));
    }

    #[test]
    fn test_call_locals_stay_out_of_globals() {
        let program = lucky_core::parse(
            "function make() {\n  x = 5\n  return function() { return x }\n}\nget = make()\nget()",
        )
        .unwrap();
        let mut environment = Environment::new();

        assert_eq!(super::eval_program(&program, &mut environment), number(5.0));
        // only the two globals; `x` lives in the call environment
        assert_eq!(environment.len(), 2);
        assert_eq!(environment.get("x"), None);
    }
}
