//! Core types of the host-interop boundary.

use std::collections::HashMap;
use std::sync::Arc;

use num_bigint::BigInt;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::realm::Realm;

/// A value crossing the host boundary, in either direction.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(BigInt),
    Decimal(f64),
    Str(String),
    Seq(Vec<HostValue>),
}

macro_rules! host_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HostValue {
                fn from(value: $t) -> Self {
                    HostValue::Int(BigInt::from(value))
                }
            }
        )*
    };
}

host_value_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<f32> for HostValue {
    fn from(value: f32) -> Self {
        HostValue::Decimal(value as f64)
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Decimal(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Str(value.to_string())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Str(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        HostValue::Seq(value)
    }
}

/// An absent value converts to `Null`.
impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => HostValue::Null,
        }
    }
}

/// Signature of a host-registered callable. The argument slice always has
/// exactly the declared parameter count; unsupplied positions hold the
/// realm's Null object.
pub type HostFn =
    fn(realm: &Realm, target: &ObjectRef, arguments: &[ObjectRef]) -> Result<HostValue, RuntimeError>;

/// Callable descriptor: adapted method name, declared parameter count, and
/// the function reference.
pub struct HostMethod {
    pub name: String,
    pub arity: usize,
    pub func: HostFn,
}

/// Registration unit for one external type: its scripted name, an optional
/// parent type, and its callable surface.
pub struct HostType {
    name: String,
    parent: Option<String>,
    methods: HashMap<String, Arc<HostMethod>>,
}

impl HostType {
    /// Create a type with the given scripted name. Names are expected to
    /// already follow the scripting identifier convention.
    pub fn new(name: impl Into<String>) -> Self {
        HostType {
            name: name.into(),
            parent: None,
            methods: HashMap::new(),
        }
    }

    /// Declare a parent type; its prototype becomes the first component of
    /// every object wrapping this type.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a callable member. Accessor-style members register here as
    /// zero-argument methods.
    pub fn add_method(mut self, name: impl Into<String>, arity: usize, func: HostFn) -> Self {
        let name = name.into();
        self.methods
            .insert(name.clone(), Arc::new(HostMethod { name, arity, func }));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn method(&self, name: &str) -> Option<&Arc<HostMethod>> {
        self.methods.get(name)
    }

    /// Enumerate the callable members.
    pub fn methods<'a>(&'a self) -> impl Iterator<Item = (&'a str, &'a Arc<HostMethod>)> + 'a {
        self.methods.iter().map(|(name, method)| (name.as_str(), method))
    }
}
