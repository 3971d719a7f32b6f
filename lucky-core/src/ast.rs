use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    FunctionDeclaration(FunctionDeclaration),
    If(IfStatement),
    Return(ReturnStatement),
    Block(Vec<Statement>),
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequence: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct ReturnStatement {
    pub value: Expression,
}

/// Named declarations appear as statements, anonymous ones as
/// [`Expression::Function`]. The body is shared with every Function value
/// created from the declaration.
#[derive(Debug, PartialEq, Clone)]
pub struct FunctionDeclaration {
    pub name: Option<Identifier>,
    pub parameters: Vec<Identifier>,
    pub body: Rc<[Statement]>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    NumberLiteral(Numeral),
    VariableAccess(Identifier),
    VariableAssignment {
        name: Identifier,
        value: Box<Expression>,
    },
    BinaryOperation(BinaryOperator, Box<Expression>, Box<Expression>),
    UnaryOperation(UnaryOperator, Box<Expression>),
    FunctionCall {
        name: Identifier,
        arguments: Vec<Expression>,
    },
    Function(FunctionDeclaration),
}

/// Number literal as written, together with its value.
#[derive(Debug, PartialEq, Clone)]
pub struct Numeral {
    pub text: Rc<str>,
    pub value: f64,
}

impl Numeral {
    /// Separators carry no meaning; `1_000.5` is `1000.5`.
    pub fn parse(text: Rc<str>) -> Option<Self> {
        let value = text.replace('_', "").parse().ok()?;
        Some(Numeral { text, value })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    LessThan,
    LessEqual,
    Equal,
    GreaterThan,
    GreaterEqual,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

fn write_block(f: &mut std::fmt::Formatter<'_>, statements: &[Statement]) -> std::fmt::Result {
    write!(f, "{{")?;
    for statement in statements {
        write!(f, "{};", statement)?;
    }
    write!(f, "}}")
}

impl Display for FunctionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "function")?;
        if let Some(name) = &self.name {
            write!(f, " {}", name.name)?;
        }
        write!(
            f,
            "({}) ",
            self.parameters
                .iter()
                .map(|id| id.name.as_ref())
                .collect::<Box<[&str]>>()
                .join(", ")
        )?;
        write_block(f, &self.body)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            NumberLiteral(numeral) => write!(f, "{}", numeral.text),
            VariableAccess(ident) => write!(f, "{}", ident.name),
            VariableAssignment { name, value } => write!(f, "({} = {})", name.name, value),
            BinaryOperation(operator, left, right) => {
                write!(f, "({} {} {})", left, operator.to_str(), right)
            }
            UnaryOperation(operator, child) => write!(f, "({}{})", operator.to_str(), child),
            FunctionCall { name, arguments } => write!(
                f,
                "{}({})",
                name.name,
                arguments
                    .iter()
                    .map(|arg| arg.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
            Function(declaration) => write!(f, "{}", declaration),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            FunctionDeclaration(declaration) => write!(f, "{}", declaration),
            If(statement) => {
                write!(f, "if ({}) ", statement.condition)?;
                write_block(f, &statement.consequence)
            }
            Return(statement) => write!(f, "return {}", statement.value),
            Block(statements) => write_block(f, statements),
            Expression(expression) => write!(f, "{}", expression),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{};", statement)?;
        }
        Ok(())
    }
}

impl BinaryOperator {
    pub fn to_str(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Power => "**",
            LessThan => "<",
            LessEqual => "<=",
            Equal => "==",
            GreaterThan => ">",
            GreaterEqual => ">=",
        }
    }
}

impl UnaryOperator {
    pub fn to_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}
