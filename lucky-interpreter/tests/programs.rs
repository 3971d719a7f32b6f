use lucky_interpreter::{Environment, Interpreter, RuntimeError, Value};
use pretty_assertions::assert_eq;

fn run(source: &str) -> (Result<Value, RuntimeError>, Environment) {
    let program = lucky_core::parse(source).unwrap();
    let mut interpreter = Interpreter::new(&program);
    let result = interpreter.run();
    (result, interpreter.environment().clone())
}

#[test]
fn nested_functions_share_outer_variables() {
    let source = "a = 1; function foo() { a = 2; b = 1; function bar() { c = 3; return a + b + c }; return bar() }; d = foo()";
    let (result, environment) = run(source);

    assert_eq!(result, Ok(Value::Number(6.0)));
    assert_eq!(environment.get("a"), Some(Value::Number(2.0)));
    assert_eq!(environment.get("d"), Some(Value::Number(6.0)));
    assert_eq!(environment.get("b"), None);
    assert_eq!(environment.get("c"), None);
}

#[test]
fn returned_closure_observes_captured_local() {
    let source = r#"
function makeAccount(balance) {
    return function(amount) {
        balance = balance + amount
        return balance
    }
}

deposit = makeAccount(100)
deposit(10)
deposit(-30)
"#;
    let (result, environment) = run(source);

    assert_eq!(result, Ok(Value::Number(80.0)));
    assert_eq!(environment.get("balance"), None);
}

#[test]
fn precedence_values() {
    let inputs = [
        ("2 * 2 ** 3", 16.0),
        ("-2 ** 3", -8.0),
        ("(-2) ** 4", 16.0),
        ("24 / 3 - 2.5 * 2 ** 3", -12.0),
    ];

    for (source, expected) in inputs {
        assert_eq!(run(source).0, Ok(Value::Number(expected)), "{source}");
    }
}

#[test]
fn fibonacci() {
    let source = r#"
# iterative and recursive versions agree
function fib(n) {
    if (n < 2) {
        return n
    }
    return fib(n - 1) + fib(n - 2)
}

function fibLoop(n) {
    a = 0; b = 1
    function step(i) {
        if (i == n) { return a }
        next = a + b
        a = b
        b = next
        return step(i + 1)
    }
    return step(0)
}

fib(20) == fibLoop(20)
"#;

    assert_eq!(run(source).0, Ok(Value::Boolean(true)));
}

#[test]
fn runaway_recursion_is_reported() {
    let program = lucky_core::parse("function loop() { return loop() }\nloop()").unwrap();
    let result = Interpreter::new(&program).with_max_depth(1_000).run();

    assert_eq!(result, Err(RuntimeError::StackOverflow(1_000)));
}

#[test]
fn same_program_twice() {
    let source = "function sq(x) { return x * x }\nsq(3) + sq(4)";
    let program = lucky_core::parse(source).unwrap();

    let first = Interpreter::new(&program).run();
    let second = Interpreter::new(&program).run();
    assert_eq!(first, Ok(Value::Number(25.0)));
    assert_eq!(first, second);
}

#[test]
fn error_messages() {
    let inputs = [
        ("1 / 0", "Division by zero"),
        ("missing + 1", "Identifier missing is not defined"),
        (
            "function f(a, b) { return a }\nf(1)",
            "Function f expects 2 argument(s) but got 1",
        ),
        ("(1 < 2) * 3", "Illegal operation: boolean * number"),
        ("return 0", "Cannot return outside of a function"),
    ];

    for (source, message) in inputs {
        match run(source).0 {
            Err(error) => assert_eq!(error.to_string(), message),
            Ok(value) => panic!("{source}: expected an error, got {value}"),
        }
    }
}

#[test]
fn deeply_nested_expressions() {
    let source = format!("{}1", "-".repeat(900));
    assert_eq!(run(&source).0, Ok(Value::Number(1.0)));

    let source = format!("{}1", "-".repeat(50_000));
    assert!(matches!(
        lucky_core::parse(&source),
        Err(lucky_core::SyntaxError::NestingTooDeep { .. })
    ));
}
