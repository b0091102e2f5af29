//! Example host surface: the `globals` type plus accessor methods for the
//! `table` and `string` primitives.

use num_bigint::BigInt;
use tracing::info;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::object::ObjectRef;
use crate::runner::ds::realm::Realm;

use super::registry::HostRegistry;
use super::types::{HostType, HostValue};

/// Register the example host types.
pub fn register_core_types(registry: &mut HostRegistry) {
    registry.register_type(HostType::new("globals").add_method("log", 1, globals_log));
    registry.register_type(HostType::new("table").add_method("count", 0, table_count));
    registry.register_type(HostType::new("string").add_method("length", 0, string_length));
}

fn globals_log(
    _realm: &Realm,
    _target: &ObjectRef,
    arguments: &[ObjectRef],
) -> Result<HostValue, RuntimeError> {
    info!(target: "mirage::script", "{}", render(&arguments[0]));
    Ok(HostValue::Null)
}

fn table_count(
    _realm: &Realm,
    target: &ObjectRef,
    _arguments: &[ObjectRef],
) -> Result<HostValue, RuntimeError> {
    let count = target.table().map(|table| table.lock().len()).unwrap_or(0);
    Ok(HostValue::Int(BigInt::from(count)))
}

fn string_length(
    _realm: &Realm,
    target: &ObjectRef,
    _arguments: &[ObjectRef],
) -> Result<HostValue, RuntimeError> {
    let length = target.as_str().map(str::len).unwrap_or(0);
    Ok(HostValue::Int(BigInt::from(length)))
}

/// Strings render without their quotes; everything else uses the object's
/// display form.
fn render(value: &ObjectRef) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}
