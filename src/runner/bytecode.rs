//! Instruction set and program container for the stack machine.
//!
//! Defines the flat, position-independent instruction sequence the
//! compiler emits and the processor executes. Control flow is linear: the
//! subset has no jumps, so instructions run once each, in order. A
//! compiled program is immutable and may be executed any number of times.

use std::fmt;
use std::fmt::{Display, Formatter};

use num_bigint::BigInt;

/// One compiled step of the linear bytecode.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push the current execution target.
    PushSelf,
    /// Push a freshly boxed arbitrary-precision integer.
    PushInteger(BigInt),
    /// Push a freshly boxed decimal value.
    PushDecimal(f64),
    /// Push a freshly boxed string. Escape sequences are interpreted at
    /// execution time when `process_escapes` is set.
    PushString { text: String, process_escapes: bool },
    /// Pop `argument_count` arguments and then the call target, invoke the
    /// named method resolved through the target's prototype chain, and
    /// push the result.
    Call {
        method: String,
        argument_count: usize,
    },
    /// Pop a value and then a context object, and set the named variable
    /// on the context.
    Assign { variable: String },
    /// Pop and drop the top of the stack.
    Discard,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::PushSelf => write!(f, "push_self"),
            Instruction::PushInteger(value) => write!(f, "push_int {}", value),
            Instruction::PushDecimal(value) => write!(f, "push_dec {}", value),
            Instruction::PushString {
                text,
                process_escapes,
            } => {
                if *process_escapes {
                    write!(f, "push_str \"{}\"", text)
                } else {
                    write!(f, "push_str '{}'", text)
                }
            }
            Instruction::Call {
                method,
                argument_count,
            } => write!(f, "call {}/{}", method, argument_count),
            Instruction::Assign { variable } => write!(f, "assign {}", variable),
            Instruction::Discard => write!(f, "discard"),
        }
    }
}

/// A compiled instruction sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub code: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Program { code: Vec::new() }
    }

    /// Emit an instruction and return its index.
    pub fn emit(&mut self, instruction: Instruction) -> usize {
        let index = self.code.len();
        self.code.push(instruction);
        index
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Disassemble the program for debugging.
    pub fn disassemble(&self, name: &str) -> String {
        let mut out = format!("== {} ==\n", name);
        for (index, instruction) in self.code.iter().enumerate() {
            out.push_str(&format!("{:04}  {}\n", index, instruction));
        }
        out
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}
