use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::runner::ds::actor::Actor;
use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::method::Method;
use crate::runner::ds::object::{DynamicObject, HostData, ObjectRef};
use crate::runner::ds::table::Table;
use crate::runner::host::registry::{HostRegistry, RegistryError};
use crate::runner::host::types::HostValue;

/// Owner of the shared runtime singletons: the root object every lookup
/// chain ends on, the shared Null object, the default actor, and one
/// prototype object per registered host type. A realm is constructed once
/// and passed around by explicit handle; there is no ambient global state.
pub struct Realm {
    registry: HostRegistry,
    default_actor: Arc<Actor>,
    root: ObjectRef,
    null: ObjectRef,
    prototypes: HashMap<String, ObjectRef>,
}

impl std::fmt::Debug for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Realm").finish_non_exhaustive()
    }
}

impl Realm {
    /// Build a realm over a populated registry. Each registered type gets
    /// its prototype object here, at setup time; unknown or cyclic parent
    /// chains are rejected.
    pub fn new(registry: HostRegistry) -> Result<Realm, RegistryError> {
        let default_actor = Actor::new();
        let root = DynamicObject::with_parts(
            Some("root".to_string()),
            None,
            default_actor.clone(),
            Vec::new(),
        );
        let null = DynamicObject::with_parts(
            Some("null".to_string()),
            None,
            default_actor.clone(),
            vec![root.clone()],
        );

        let mut prototypes = HashMap::new();
        for name in registry.type_names() {
            build_prototype(
                name,
                &registry,
                &default_actor,
                &root,
                &mut prototypes,
                &mut Vec::new(),
            )?;
        }

        Ok(Realm {
            registry,
            default_actor,
            root,
            null,
            prototypes,
        })
    }

    /// A realm with no host types registered.
    pub fn empty() -> Realm {
        let default_actor = Actor::new();
        let root = DynamicObject::with_parts(
            Some("root".to_string()),
            None,
            default_actor.clone(),
            Vec::new(),
        );
        let null = DynamicObject::with_parts(
            Some("null".to_string()),
            None,
            default_actor.clone(),
            vec![root.clone()],
        );
        Realm {
            registry: HostRegistry::new(),
            default_actor,
            root,
            null,
            prototypes: HashMap::new(),
        }
    }

    /// The memberless top of every prototype chain.
    pub fn root(&self) -> &ObjectRef {
        &self.root
    }

    /// The shared Null object.
    pub fn null(&self) -> &ObjectRef {
        &self.null
    }

    pub fn default_actor(&self) -> &Arc<Actor> {
        &self.default_actor
    }

    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    /// The prototype object built for a registered host type.
    pub fn prototype(&self, type_name: &str) -> Option<&ObjectRef> {
        self.prototypes.get(type_name)
    }

    /// Fresh scripted object on the default actor, with the root as its
    /// only component.
    pub fn create_object(&self) -> ObjectRef {
        self.create_object_on(self.default_actor.clone())
    }

    pub fn create_object_on(&self, actor: Arc<Actor>) -> ObjectRef {
        DynamicObject::new(actor, vec![self.root.clone()])
    }

    /// Wrap a registered host type: the object's own method namespace is
    /// populated from the type's table, its components are
    /// `[parent prototype (if any), root]`.
    pub fn instantiate(&self, type_name: &str) -> Result<ObjectRef, RuntimeError> {
        match self.prototypes.get(type_name) {
            Some(prototype) => Ok(self.from_prototype(type_name, prototype, None)),
            None => Err(RuntimeError::UnknownHostType(type_name.to_string())),
        }
    }

    /// Total conversion from the host value representation into the object
    /// model. `Null` yields the shared Null object; a sequence yields a
    /// table object populated by sequential 1-based insertion of its
    /// recursively imported elements.
    pub fn import(&self, value: HostValue) -> ObjectRef {
        match value {
            HostValue::Null => self.null.clone(),
            HostValue::Bool(v) => self.import_primitive("boolean", HostData::Bool(v)),
            HostValue::Int(v) => self.import_primitive("integer", HostData::Int(v)),
            HostValue::Decimal(v) => self.import_primitive("decimal", HostData::Decimal(v)),
            HostValue::Str(v) => self.import_primitive("string", HostData::Str(v)),
            HostValue::Seq(items) => {
                let mut table = Table::new();
                for item in items {
                    table.push(self.import(item));
                }
                self.import_primitive("table", HostData::Table(Mutex::new(table)))
            }
        }
    }

    fn import_primitive(&self, kind: &str, host: HostData) -> ObjectRef {
        match self.prototypes.get(kind) {
            Some(prototype) => self.from_prototype(kind, prototype, Some(host)),
            None => DynamicObject::with_parts(
                Some(kind.to_string()),
                Some(host),
                self.default_actor.clone(),
                vec![self.root.clone()],
            ),
        }
    }

    fn from_prototype(
        &self,
        name: &str,
        prototype: &ObjectRef,
        host: Option<HostData>,
    ) -> ObjectRef {
        let object = DynamicObject::with_parts(
            Some(name.to_string()),
            host,
            self.default_actor.clone(),
            prototype.components().to_vec(),
        );
        for (method_name, method) in prototype.own_methods() {
            object.set_method(&method_name, method);
        }
        object
    }
}

/// Build (and memoize) the prototype object of one host type, parents
/// first. `in_progress` detects parent-chain cycles.
fn build_prototype(
    name: &str,
    registry: &HostRegistry,
    actor: &Arc<Actor>,
    root: &ObjectRef,
    prototypes: &mut HashMap<String, ObjectRef>,
    in_progress: &mut Vec<String>,
) -> Result<ObjectRef, RegistryError> {
    if let Some(existing) = prototypes.get(name) {
        return Ok(existing.clone());
    }
    if in_progress.iter().any(|n| n == name) {
        return Err(RegistryError::CyclicParentChain(name.to_string()));
    }
    let host_type = registry
        .get_type(name)
        .ok_or_else(|| RegistryError::UnknownParent(name.to_string()))?;

    in_progress.push(name.to_string());
    let mut components = Vec::with_capacity(2);
    if let Some(parent) = host_type.parent() {
        components.push(build_prototype(
            parent,
            registry,
            actor,
            root,
            prototypes,
            in_progress,
        )?);
    }
    in_progress.pop();
    components.push(root.clone());

    let prototype =
        DynamicObject::with_parts(Some(name.to_string()), None, actor.clone(), components);
    for (method_name, descriptor) in host_type.methods() {
        prototype.set_method(method_name, Arc::new(Method::Host(descriptor.clone())));
    }
    prototypes.insert(name.to_string(), prototype.clone());
    Ok(prototype)
}
