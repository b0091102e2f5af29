//! Registration table for host-exposed functionality.
//!
//! Host types are registered once, at setup time; objects wrapping a host
//! value draw their method namespace from this table instead of any
//! runtime introspection.

use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use super::types::HostType;

/// Error raised while validating the registry at realm construction.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A type names a parent that is not registered.
    UnknownParent(String),
    /// A type's parent chain loops back on itself.
    CyclicParentChain(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownParent(name) => {
                write!(f, "parent type '{}' is not registered", name)
            }
            RegistryError::CyclicParentChain(name) => {
                write!(f, "parent chain of type '{}' is cyclic", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// The registration table.
pub struct HostRegistry {
    types: HashMap<String, HostType>,
}

impl HostRegistry {
    pub fn new() -> Self {
        HostRegistry {
            types: HashMap::new(),
        }
    }

    /// Register a type, replacing any previous definition of the name.
    pub fn register_type(&mut self, host_type: HostType) {
        self.types.insert(host_type.name().to_string(), host_type);
    }

    pub fn get_type(&self, name: &str) -> Option<&HostType> {
        self.types.get(name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(|name| name.as_str()).collect()
    }

    /// Enumerate the callable members of a registered type: each entry is
    /// the adapted method name and its declared parameter count.
    pub fn methods_of(&self, type_name: &str) -> Vec<(&str, usize)> {
        self.types
            .get(type_name)
            .map(|host_type| {
                host_type
                    .methods()
                    .map(|(name, method)| (name, method.arity))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for HostRegistry {
    fn default() -> Self {
        Self::new()
    }
}
