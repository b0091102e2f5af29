use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use uuid::Uuid;

/// A mutual-exclusion domain guarding the namespaces of every object that
/// references it. Objects sharing an actor fully serialize their namespace
/// operations; objects on distinct actors proceed in parallel.
///
/// The lock is reentrant: name lookup recurses through an object's
/// components, which may share the actor. Cross-actor acquisition always
/// follows the component-list order, which is fixed at object construction
/// and can only reference objects that already exist, so the acquisition
/// graph stays acyclic.
pub struct Actor {
    id: Uuid,
    lock: ReentrantMutex<()>,
}

pub type ActorGuard<'a> = ReentrantMutexGuard<'a, ()>;

impl Actor {
    pub fn new() -> Arc<Actor> {
        Arc::new(Actor {
            id: Uuid::new_v4(),
            lock: ReentrantMutex::new(()),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Acquire the domain for the duration of one namespace operation.
    pub fn enter(&self) -> ActorGuard<'_> {
        self.lock.lock()
    }
}

impl Debug for Actor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Actor({})", self.id)
    }
}
