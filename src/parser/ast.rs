use std::fmt;
use std::fmt::{Display, Formatter};

/// One parsed statement. Statements are produced by the parser and
/// consumed by the compiler; they do not survive compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Call {
        context: Expression,
        method: String,
        arguments: Vec<Expression>,
    },
    Assign {
        context: Expression,
        variable: String,
        value: Expression,
    },
}

/// An expression inside a statement.
///
/// `Integer` and `Decimal` carry the literal's raw digit text, underscores
/// included; numeric parsing is deferred to compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    SelfRef,
    Integer(String),
    Decimal(String),
    StringLiteral {
        text: String,
        process_escapes: bool,
    },
    Variable(String),
    MethodRef(String),
    Call {
        context: Box<Expression>,
        method: String,
        arguments: Vec<Expression>,
    },
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Call {
                context,
                method,
                arguments,
            } => write!(f, "call({}, {}, [{}])", context, method, join(arguments)),
            Statement::Assign {
                context,
                variable,
                value,
            } => write!(f, "assign({}, {}, {})", context, variable, value),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::SelfRef => write!(f, "self"),
            Expression::Integer(digits) => write!(f, "{}", digits),
            Expression::Decimal(digits) => write!(f, "{}", digits),
            Expression::StringLiteral {
                text,
                process_escapes,
            } => {
                if *process_escapes {
                    write!(f, "\"{}\"", text)
                } else {
                    write!(f, "'{}'", text)
                }
            }
            Expression::Variable(name) => write!(f, "variable:{}", name),
            Expression::MethodRef(name) => write!(f, "method:{}", name),
            Expression::Call {
                context,
                method,
                arguments,
            } => write!(f, "call({}, {}, [{}])", context, method, join(arguments)),
        }
    }
}

fn join(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
