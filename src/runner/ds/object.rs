use std::collections::HashMap;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use num_bigint::BigInt;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::runner::ds::actor::Actor;
use crate::runner::ds::method::Method;
use crate::runner::ds::table::Table;

pub type ObjectRef = Arc<DynamicObject>;

/// Host payload carried by objects that wrap external values.
pub enum HostData {
    Bool(bool),
    Int(BigInt),
    Decimal(f64),
    Str(String),
    Table(Mutex<Table>),
}

/// The runtime value type: scripted state, prototype chain, and an
/// optional wrapped host value.
///
/// The variable and method namespaces are disjoint and independently
/// resolved. The component list is fixed at construction; lookup and lock
/// acquisition follow its order.
pub struct DynamicObject {
    id: Uuid,
    name: Option<String>,
    actor: Arc<Actor>,
    components: Vec<ObjectRef>,
    host: Option<HostData>,
    // Leaf lock: only taken inside the actor guard and never held across a
    // call out of this module.
    state: Mutex<ObjectState>,
}

#[derive(Default)]
struct ObjectState {
    variables: HashMap<String, ObjectRef>,
    methods: HashMap<String, Arc<Method>>,
}

impl DynamicObject {
    pub fn new(actor: Arc<Actor>, components: Vec<ObjectRef>) -> ObjectRef {
        DynamicObject::with_parts(None, None, actor, components)
    }

    pub fn with_parts(
        name: Option<String>,
        host: Option<HostData>,
        actor: Arc<Actor>,
        components: Vec<ObjectRef>,
    ) -> ObjectRef {
        Arc::new(DynamicObject {
            id: Uuid::new_v4(),
            name,
            actor,
            components,
            host,
            state: Mutex::new(ObjectState::default()),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn actor(&self) -> &Arc<Actor> {
        &self.actor
    }

    pub fn components(&self) -> &[ObjectRef] {
        &self.components
    }

    pub fn host(&self) -> Option<&HostData> {
        self.host.as_ref()
    }

    pub fn set_variable(&self, name: &str, value: ObjectRef) {
        let _domain = self.actor.enter();
        self.state.lock().variables.insert(name.to_string(), value);
    }

    pub fn set_method(&self, name: &str, method: Arc<Method>) {
        let _domain = self.actor.enter();
        self.state.lock().methods.insert(name.to_string(), method);
    }

    /// Resolve a variable: own namespace first, then each component in its
    /// fixed order, recursively, depth-first. `None` means unbound, which
    /// is not an error.
    pub fn variable(&self, name: &str) -> Option<ObjectRef> {
        let _domain = self.actor.enter();
        if let Some(value) = self.state.lock().variables.get(name) {
            return Some(value.clone());
        }
        for component in &self.components {
            if let Some(value) = component.variable(name) {
                return Some(value);
            }
        }
        None
    }

    /// Resolve a method through the same own-first, depth-first chain.
    pub fn method(&self, name: &str) -> Option<Arc<Method>> {
        let _domain = self.actor.enter();
        if let Some(method) = self.state.lock().methods.get(name) {
            return Some(method.clone());
        }
        for component in &self.components {
            if let Some(method) = component.method(name) {
                return Some(method);
            }
        }
        None
    }

    /// Snapshot of the own method namespace, shared handles included.
    pub fn own_methods(&self) -> Vec<(String, Arc<Method>)> {
        let _domain = self.actor.enter();
        self.state
            .lock()
            .methods
            .iter()
            .map(|(name, method)| (name.clone(), method.clone()))
            .collect()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.host {
            Some(HostData::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match &self.host {
            Some(HostData::Int(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match &self.host {
            Some(HostData::Decimal(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.host {
            Some(HostData::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&Mutex<Table>> {
        match &self.host {
            Some(HostData::Table(table)) => Some(table),
            _ => None,
        }
    }
}

impl Display for DynamicObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(HostData::Bool(value)) => write!(f, "{}", value),
            Some(HostData::Int(value)) => write!(f, "{}", value),
            Some(HostData::Decimal(value)) => write!(f, "{}", value),
            Some(HostData::Str(value)) => write!(f, "\"{}\"", value),
            Some(HostData::Table(table)) => write!(f, "table[{}]", table.lock().len()),
            None => match &self.name {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "object#{}", &self.id.to_string()[..8]),
            },
        }
    }
}

impl Debug for DynamicObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicObject({})", self)
    }
}
