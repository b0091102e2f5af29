use std::fmt;
use std::fmt::{Display, Formatter};

use pest::error::{Error, InputLocation, LineColLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::debug;

use super::ast::{Expression, Statement};

#[derive(Parser)]
#[grammar = "parser/mirage_grammar.pest"] // relative to src
pub struct MirageParser;

/// A parse failure. Parsing aborts on the first failure; no partial
/// statement list is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    InvalidCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    UnexpectedEndOfInput {
        line: usize,
        column: usize,
    },
    ExpectedAssignmentValue {
        operator: String,
        line: usize,
        column: usize,
    },
    ExpectedExpressionInBrackets {
        line: usize,
        column: usize,
    },
    ExpectedClosingBracket {
        line: usize,
        column: usize,
    },
    UnterminatedString {
        line: usize,
        column: usize,
    },
    UnexpectedRule {
        rule: String,
        line: usize,
        column: usize,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidCharacter {
                character,
                line,
                column,
            } => write!(
                f,
                "invalid character '{}' at line {}, column {}",
                character, line, column
            ),
            ParseError::UnexpectedEndOfInput { line, column } => write!(
                f,
                "unexpected end of input at line {}, column {}",
                line, column
            ),
            ParseError::ExpectedAssignmentValue {
                operator,
                line,
                column,
            } => write!(
                f,
                "expected assignment value after '{}' at line {}, column {}",
                operator, line, column
            ),
            ParseError::ExpectedExpressionInBrackets { line, column } => write!(
                f,
                "expected expression inside brackets at line {}, column {}",
                line, column
            ),
            ParseError::ExpectedClosingBracket { line, column } => write!(
                f,
                "expected closing bracket at line {}, column {}",
                line, column
            ),
            ParseError::UnterminatedString { line, column } => write!(
                f,
                "unterminated string literal starting at line {}, column {}",
                line, column
            ),
            ParseError::UnexpectedRule { rule, line, column } => write!(
                f,
                "unexpected {} at line {}, column {}",
                rule, line, column
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse source text into its ordered statement list.
pub fn parse(source: &str) -> Result<Vec<Statement>, ParseError> {
    let mut pairs = MirageParser::parse(Rule::script, source)
        .map_err(|error| translate_pest_error(error, source))?;
    let script = pairs.next().unwrap();

    let mut statements = Vec::new();
    for pair in script.into_inner() {
        match pair.as_rule() {
            Rule::statement => statements.push(build_statement(pair)?),
            Rule::EOI => {}
            _ => return Err(unexpected_rule(&pair)),
        }
    }
    debug!("parsed {} statements", statements.len());
    Ok(statements)
}

fn build_statement(pair: Pair<Rule>) -> Result<Statement, ParseError> {
    let mut inner = pair.into_inner();
    let identifier = inner.next().unwrap();
    let name = identifier.as_str().to_string();
    let tail = inner.next().unwrap();

    match tail.as_rule() {
        Rule::assign_tail | Rule::deferred_assign_tail => {
            let mut parts = tail.into_inner();
            let operator = parts.next().unwrap();
            let (line, column) = operator.as_span().end_pos().line_col();
            let operator_text = operator.as_str().to_string();
            match parts.next() {
                Some(value) => Ok(Statement::Assign {
                    context: Expression::SelfRef,
                    variable: name,
                    value: build_expression(value)?,
                }),
                None => Err(ParseError::ExpectedAssignmentValue {
                    operator: operator_text,
                    line,
                    column,
                }),
            }
        }
        Rule::arg_tail => {
            let argument = tail.into_inner().next().unwrap();
            Ok(Statement::Call {
                context: Expression::SelfRef,
                method: name,
                arguments: vec![build_expression(argument)?],
            })
        }
        Rule::empty_tail => Ok(Statement::Call {
            context: Expression::SelfRef,
            method: name,
            arguments: Vec::new(),
        }),
        _ => Err(unexpected_rule(&tail)),
    }
}

fn build_expression(pair: Pair<Rule>) -> Result<Expression, ParseError> {
    match pair.as_rule() {
        Rule::bracket_expr => build_bracket_expression(pair),
        Rule::quote_string => build_string(pair, false),
        Rule::speech_string => build_string(pair, true),
        Rule::number => {
            let digits = pair.as_str();
            if digits.contains('.') {
                Ok(Expression::Decimal(digits.to_string()))
            } else {
                Ok(Expression::Integer(digits.to_string()))
            }
        }
        Rule::identifier => Ok(Expression::MethodRef(pair.as_str().to_string())),
        _ => Err(unexpected_rule(&pair)),
    }
}

fn build_bracket_expression(pair: Pair<Rule>) -> Result<Expression, ParseError> {
    let (line, column) = pair.as_span().start_pos().line_col();
    let (end_line, end_column) = pair.as_span().end_pos().line_col();

    let mut expression = None;
    let mut closed = false;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::close_paren => closed = true,
            _ => expression = Some(build_expression(part)?),
        }
    }

    match expression {
        None => Err(ParseError::ExpectedExpressionInBrackets { line, column }),
        Some(_) if !closed => Err(ParseError::ExpectedClosingBracket {
            line: end_line,
            column: end_column,
        }),
        Some(expression) => Ok(expression),
    }
}

fn build_string(pair: Pair<Rule>, process_escapes: bool) -> Result<Expression, ParseError> {
    let outer = pair.as_span();
    let (line, column) = outer.start_pos().line_col();
    let inner = pair.into_inner().next();
    let (text, inner_end) = match &inner {
        Some(part) => (part.as_str().to_string(), part.as_span().end()),
        None => (String::new(), outer.start() + 1),
    };

    // The closing delimiter is optional in the grammar; when it was not
    // consumed the literal's span ends exactly where the inner text does.
    if inner_end == outer.end() {
        return Err(ParseError::UnterminatedString { line, column });
    }
    Ok(Expression::StringLiteral {
        text,
        process_escapes,
    })
}

fn unexpected_rule(pair: &Pair<Rule>) -> ParseError {
    let (line, column) = pair.as_span().start_pos().line_col();
    ParseError::UnexpectedRule {
        rule: format!("{:?}", pair.as_rule()),
        line,
        column,
    }
}

fn translate_pest_error(error: Error<Rule>, source: &str) -> ParseError {
    let (line, column) = match error.line_col {
        LineColLocation::Pos((line, column)) => (line, column),
        LineColLocation::Span((line, column), _) => (line, column),
    };
    let offset = match error.location {
        InputLocation::Pos(position) => position,
        InputLocation::Span((start, _)) => start,
    };

    // A failure directly after an assignment operator means the value was
    // missing, not that the next character was the problem.
    let prefix = source[..offset].trim_end();
    if prefix.ends_with(":=") {
        return ParseError::ExpectedAssignmentValue {
            operator: ":=".to_string(),
            line,
            column,
        };
    }
    if prefix.ends_with('=') {
        return ParseError::ExpectedAssignmentValue {
            operator: "=".to_string(),
            line,
            column,
        };
    }

    match source[offset..].chars().next() {
        Some(character) => ParseError::InvalidCharacter {
            character,
            line,
            column,
        },
        None => ParseError::UnexpectedEndOfInput { line, column },
    }
}
