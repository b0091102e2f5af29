//! AST-to-bytecode compiler.
//!
//! Walks the parsed statements once and emits a flat instruction sequence.
//! Lowering is total over everything the grammar produces; reserved AST
//! surface with no lowering rule is rejected with a named error rather
//! than dropped.

use std::fmt;
use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use tracing::debug;

use crate::parser::ast::{Expression, Statement};

use super::bytecode::{Instruction, Program};

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The expression variant has no lowering rule.
    UnsupportedExpression(&'static str),
    InvalidIntegerLiteral(String),
    InvalidDecimalLiteral(String),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnsupportedExpression(kind) => {
                write!(f, "unsupported construct: {} expression has no lowering", kind)
            }
            CompileError::InvalidIntegerLiteral(digits) => {
                write!(f, "invalid integer literal '{}'", digits)
            }
            CompileError::InvalidDecimalLiteral(digits) => {
                write!(f, "invalid decimal literal '{}'", digits)
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// The bytecode compiler.
pub struct Compiler {
    program: Program,
}

impl Compiler {
    pub fn new() -> Self {
        Compiler {
            program: Program::new(),
        }
    }

    /// Compile a statement list into a program.
    pub fn compile_statements(mut self, statements: &[Statement]) -> Result<Program, CompileError> {
        for statement in statements {
            self.compile_statement(statement)?;
        }
        debug!("compiled {} instructions", self.program.len());
        Ok(self.program)
    }

    fn compile_statement(&mut self, statement: &Statement) -> Result<(), CompileError> {
        match statement {
            Statement::Call {
                context,
                method,
                arguments,
            } => {
                self.compile_expression(context)?;
                for argument in arguments {
                    self.compile_expression(argument)?;
                }
                self.program.emit(Instruction::Call {
                    method: method.clone(),
                    argument_count: arguments.len(),
                });
                // Statement-level calls do not produce a usable result.
                self.program.emit(Instruction::Discard);
            }
            Statement::Assign {
                context,
                variable,
                value,
            } => {
                self.compile_expression(context)?;
                self.compile_expression(value)?;
                self.program.emit(Instruction::Assign {
                    variable: variable.clone(),
                });
            }
        }
        Ok(())
    }

    fn compile_expression(&mut self, expression: &Expression) -> Result<(), CompileError> {
        match expression {
            Expression::SelfRef => {
                self.program.emit(Instruction::PushSelf);
            }
            Expression::Integer(digits) => {
                let value = parse_integer(digits)?;
                self.program.emit(Instruction::PushInteger(value));
            }
            Expression::Decimal(digits) => {
                let value = parse_decimal(digits)?;
                self.program.emit(Instruction::PushDecimal(value));
            }
            Expression::StringLiteral {
                text,
                process_escapes,
            } => {
                self.program.emit(Instruction::PushString {
                    text: text.clone(),
                    process_escapes: *process_escapes,
                });
            }
            // A bare method reference is a zero-argument call on the
            // implicit context; its result is the expression's value.
            Expression::MethodRef(name) => {
                self.program.emit(Instruction::PushSelf);
                self.program.emit(Instruction::Call {
                    method: name.clone(),
                    argument_count: 0,
                });
            }
            Expression::Call {
                context,
                method,
                arguments,
            } => {
                self.compile_expression(context)?;
                for argument in arguments {
                    self.compile_expression(argument)?;
                }
                self.program.emit(Instruction::Call {
                    method: method.clone(),
                    argument_count: arguments.len(),
                });
            }
            Expression::Variable(_) => {
                return Err(CompileError::UnsupportedExpression("variable"));
            }
        }
        Ok(())
    }
}

fn parse_integer(digits: &str) -> Result<BigInt, CompileError> {
    digits
        .replace('_', "")
        .parse::<BigInt>()
        .map_err(|_| CompileError::InvalidIntegerLiteral(digits.to_string()))
}

fn parse_decimal(digits: &str) -> Result<f64, CompileError> {
    digits
        .replace('_', "")
        .parse::<f64>()
        .map_err(|_| CompileError::InvalidDecimalLiteral(digits.to_string()))
}
