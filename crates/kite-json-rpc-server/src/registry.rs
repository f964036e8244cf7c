//! Method registry: the immutable name-to-route mapping built at
//! configuration time and treated as read-only while serving.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::route::{Handler, HandlerRoute, Route};

/// Frozen mapping from method name to its route.
///
/// Built once by [`MethodRegistryBuilder`] and threaded into the dispatcher
/// at construction; there is no way to mutate it afterwards, so sharing one
/// registry across concurrently dispatching threads is sound.
pub struct MethodRegistry {
    routes: HashMap<String, Arc<dyn Route>>,
}

impl MethodRegistry {
    pub fn builder() -> MethodRegistryBuilder {
        MethodRegistryBuilder::new()
    }

    /// Looks up the route registered under `method`.
    pub fn resolve(&self, method: &str) -> Option<&Arc<dyn Route>> {
        self.routes.get(method)
    }

    pub fn contains(&self, method: &str) -> bool {
        self.routes.contains_key(method)
    }

    /// Names of all registered methods, aliases included.
    pub fn method_names(&self) -> Vec<String> {
        self.routes.keys().cloned().collect()
    }
}

/// Configuration-time builder for a [`MethodRegistry`].
#[derive(Default)]
pub struct MethodRegistryBuilder {
    routes: HashMap<String, Arc<dyn Route>>,
}

impl MethodRegistryBuilder {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registers `name` to dispatch through the handler produced by
    /// `factory`, overwriting any existing registration for that name.
    ///
    /// Overwriting affects future lookups of `name` only; aliases already
    /// taken from it keep the route they snapshotted.
    pub fn method<F, H>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: Handler + 'static,
    {
        let name = name.into();
        if self
            .routes
            .insert(name.clone(), Arc::new(HandlerRoute::new(factory)))
            .is_some()
        {
            debug!(method = %name, "overwrote existing route registration");
        }
        self
    }

    /// Registers `new_name` by hard-linking to the route currently held by
    /// `existing`.
    ///
    /// The alias snapshots the route reference: re-registering `existing`
    /// with a different handler afterwards has no effect on the alias.
    ///
    /// # Panics
    ///
    /// Panics when `existing` has no registration; aliasing an unknown
    /// method is a configuration bug and fails during configuration, never
    /// during a request.
    pub fn alias(mut self, new_name: impl Into<String>, existing: &str) -> Self {
        let new_name = new_name.into();
        let route = match self.routes.get(existing) {
            Some(route) => Arc::clone(route),
            None => panic!("cannot alias new `{new_name}` route to unknown `{existing}` route"),
        };
        self.routes.insert(new_name, route);
        self
    }

    /// Freezes the configuration.
    pub fn build(self) -> MethodRegistry {
        MethodRegistry {
            routes: self.routes,
        }
    }
}
