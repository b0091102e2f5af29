use std::fmt;
use std::fmt::{Display, Formatter};

/// A runtime failure. Any of these ends the enclosing `process` call;
/// state mutated earlier in the same run is retained, not rolled back.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// The method name exhausted the target's entire prototype chain.
    MethodNotFound { method: String, target: String },
    /// An invoked host callable failed; tagged with the method and target.
    HostMethodFailed {
        method: String,
        target: String,
        message: String,
    },
    /// Raised inside a host function.
    HostFailure(String),
    /// No host type with this name is registered.
    UnknownHostType(String),
    /// The operand stack was exhausted mid-instruction. Compiled programs
    /// are balanced; this can only happen with hand-built programs.
    StackUnderflow { instruction: String },
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::MethodNotFound { method, target } => {
                write!(f, "method not found: '{}' on {}", method, target)
            }
            RuntimeError::HostMethodFailed {
                method,
                target,
                message,
            } => write!(f, "method '{}' on {} failed: {}", method, target, message),
            RuntimeError::HostFailure(message) => write!(f, "host failure: {}", message),
            RuntimeError::UnknownHostType(name) => write!(f, "unknown host type '{}'", name),
            RuntimeError::StackUnderflow { instruction } => {
                write!(f, "operand stack underflow while executing {}", instruction)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
