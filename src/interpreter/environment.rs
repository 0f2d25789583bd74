use std::collections::HashMap;

use crate::interpreter::object::ObjRef;

/// A handle to an environment owned by the [`Heap`].
///
/// The handle is non-owning: an environment's lifetime is governed by its
/// reachability from the evaluator's roots, never by the scopes nested
/// inside it.
///
/// [`Heap`]: crate::interpreter::heap::Heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvRef(pub(crate) usize);

/// A mapping from names to runtime values, with an optional link to the
/// enclosing environment.
///
/// Lookup checks the local mapping first and then walks the outer chain;
/// a miss at the root means the identifier is unresolved. One environment
/// exists per function call, enclosing the called function's definition
/// environment.
#[derive(Debug, Default)]
pub struct Environment {
    /// The local bindings.
    pub(crate) store: HashMap<String, ObjRef>,
    /// The enclosing environment, if any.
    pub(crate) outer: Option<EnvRef>,
}

impl Environment {
    /// Creates an environment enclosed by `outer`, or a root environment
    /// when `outer` is `None`.
    #[must_use]
    pub fn new(outer: Option<EnvRef>) -> Self {
        Self { store: HashMap::new(),
               outer }
    }

    /// Looks a name up in the local mapping only.
    ///
    /// Chain lookup lives on the heap, which owns the outer environments.
    #[must_use]
    pub fn get_local(&self, name: &str) -> Option<ObjRef> {
        self.store.get(name).copied()
    }

    /// Binds a name locally, replacing any previous local binding of the
    /// same name.
    pub fn bind(&mut self, name: &str, value: ObjRef) {
        self.store.insert(name.to_string(), value);
    }

    /// The enclosing environment, if any.
    #[must_use]
    pub const fn outer(&self) -> Option<EnvRef> {
        self.outer
    }
}
