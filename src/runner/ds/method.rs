use std::sync::Arc;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::realm::Realm;
use crate::runner::host::types::HostMethod;

/// A callable entry in an object's method namespace: either a scripted
/// value or a descriptor for host-registered functionality. Methods are
/// created once and shared immutably.
pub enum Method {
    /// User-assignable scripted value; invocation returns a clone of the
    /// value and ignores arguments.
    Value(ObjectRef),
    /// Externally registered callable with a fixed declared parameter
    /// count.
    Host(Arc<HostMethod>),
}

impl Method {
    pub fn call(
        &self,
        realm: &Realm,
        target: &ObjectRef,
        arguments: &[ObjectRef],
    ) -> Result<ObjectRef, RuntimeError> {
        match self {
            Method::Value(value) => Ok(value.clone()),
            Method::Host(bound) => {
                // Positional slots sized by the declared parameter count.
                // Positions the caller did not supply stay at the Null
                // default; surplus arguments are dropped.
                let mut slots = vec![realm.null().clone(); bound.arity];
                for position in 0..bound.arity.min(arguments.len()) {
                    slots[position] = arguments[position].clone();
                }
                let returned =
                    (bound.func)(realm, target, &slots).map_err(|error| {
                        RuntimeError::HostMethodFailed {
                            method: bound.name.clone(),
                            target: target.to_string(),
                            message: error.to_string(),
                        }
                    })?;
                Ok(realm.import(returned))
            }
        }
    }
}
