//! Stack-machine processor.
//!
//! Executes a compiled program against a target object using a single
//! operand stack. Execution is synchronous with no suspension points; a
//! host-bound call runs to completion before the loop continues. Any
//! runtime failure ends the whole run - state mutated by earlier
//! instructions is retained, not rolled back.

use tracing::trace;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::realm::Realm;
use crate::runner::host::types::HostValue;

use super::bytecode::{Instruction, Program};

/// The stack machine.
pub struct Processor<'a> {
    realm: &'a Realm,
    stack: Vec<ObjectRef>,
}

impl<'a> Processor<'a> {
    pub fn new(realm: &'a Realm) -> Self {
        Processor {
            realm,
            stack: Vec::with_capacity(16),
        }
    }

    /// Run the program to completion against `target`.
    pub fn process(&mut self, target: &ObjectRef, program: &Program) -> Result<(), RuntimeError> {
        for instruction in &program.code {
            trace!(%instruction, "execute");
            match instruction {
                Instruction::PushSelf => self.stack.push(target.clone()),
                Instruction::PushInteger(value) => {
                    let boxed = self.realm.import(HostValue::Int(value.clone()));
                    self.stack.push(boxed);
                }
                Instruction::PushDecimal(value) => {
                    let boxed = self.realm.import(HostValue::Decimal(*value));
                    self.stack.push(boxed);
                }
                Instruction::PushString {
                    text,
                    process_escapes,
                } => {
                    let text = if *process_escapes {
                        process_escape_sequences(text)
                    } else {
                        text.clone()
                    };
                    self.stack.push(self.realm.import(HostValue::Str(text)));
                }
                Instruction::Call {
                    method,
                    argument_count,
                } => {
                    let mut arguments = Vec::with_capacity(*argument_count);
                    for _ in 0..*argument_count {
                        arguments.push(self.pop(instruction)?);
                    }
                    // Popping yields the arguments in reverse of push
                    // order; callees are handed the original left-to-right
                    // order.
                    arguments.reverse();

                    let call_target = self.pop(instruction)?;
                    let resolved = call_target.method(method).ok_or_else(|| {
                        RuntimeError::MethodNotFound {
                            method: method.clone(),
                            target: call_target.to_string(),
                        }
                    })?;
                    let result = resolved.call(self.realm, &call_target, &arguments)?;
                    self.stack.push(result);
                }
                Instruction::Assign { variable } => {
                    let value = self.pop(instruction)?;
                    let context = self.pop(instruction)?;
                    context.set_variable(variable, value);
                }
                Instruction::Discard => {
                    self.pop(instruction)?;
                }
            }
        }
        Ok(())
    }

    fn pop(&mut self, instruction: &Instruction) -> Result<ObjectRef, RuntimeError> {
        self.stack.pop().ok_or_else(|| RuntimeError::StackUnderflow {
            instruction: instruction.to_string(),
        })
    }
}

/// Interpret the escape sequences of a speech-quoted string literal.
/// Unrecognized sequences are kept verbatim, backslash included.
pub fn process_escape_sequences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
