//! Execution engine and runtime data structures.
//!
//! The pipeline is:
//!
//! ```text
//! source → parser → statements → compiler → instructions → processor
//! ```
//!
//! executing against a target object inside a realm.

pub mod bytecode;
pub mod compiler;
pub mod ds;
pub mod host;
pub mod vm;

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::parser::ast::Statement;
use crate::parser::{self, ParseError};

use self::bytecode::Program;
use self::compiler::{CompileError, Compiler};
use self::ds::error::RuntimeError;
use self::ds::object::ObjectRef;
use self::ds::realm::Realm;
use self::vm::Processor;

/// Any failure of the one-call pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Parse(ParseError),
    Compile(CompileError),
    Runtime(RuntimeError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Parse(error) => write!(f, "{}", error),
            EngineError::Compile(error) => write!(f, "{}", error),
            EngineError::Runtime(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<ParseError> for EngineError {
    fn from(error: ParseError) -> Self {
        EngineError::Parse(error)
    }
}

impl From<CompileError> for EngineError {
    fn from(error: CompileError) -> Self {
        EngineError::Compile(error)
    }
}

impl From<RuntimeError> for EngineError {
    fn from(error: RuntimeError) -> Self {
        EngineError::Runtime(error)
    }
}

/// Compile parsed statements into a program.
pub fn compile(statements: &[Statement]) -> Result<Program, CompileError> {
    Compiler::new().compile_statements(statements)
}

/// Execute a compiled program against `target`.
pub fn process(realm: &Realm, target: &ObjectRef, program: &Program) -> Result<(), RuntimeError> {
    Processor::new(realm).process(target, program)
}

/// Parse, compile and execute `source` against `target`.
pub fn run(realm: &Realm, target: &ObjectRef, source: &str) -> Result<(), EngineError> {
    let statements = parser::parse(source)?;
    let program = compile(&statements)?;
    process(realm, target, &program)?;
    Ok(())
}
