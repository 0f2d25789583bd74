use tracing::debug;

use crate::interpreter::{
    environment::{EnvRef, Environment},
    object::{ObjRef, Object},
};

struct ObjectEntry {
    object: Object,
    marked: bool,
    /// Next object in allocation order. Threads the allocation list the
    /// sweep phase walks.
    next:   Option<ObjRef>,
}

struct EnvEntry {
    environment: Environment,
    marked:      bool,
}

/// Owner of every runtime object and environment, and the mark-and-sweep
/// collector over them.
///
/// Objects live in a slot arena addressed by [`ObjRef`]. Every allocation
/// is pushed onto an intrusive singly-linked list threaded through the
/// slots; a collection marks everything reachable from the given roots and
/// then walks that list once, unlinking and freeing whatever stayed
/// unmarked. Environments live in a second arena and are collected by the
/// same pass, which is what lets a closure keep its definition scope alive
/// for exactly as long as the closure itself is reachable.
///
/// The three slots below [`Heap::NULL`], [`Heap::TRUE`] and [`Heap::FALSE`]
/// are allocated once at construction, never linked into the allocation
/// list, and never swept, so those handles are stable for the lifetime of
/// the heap and compare by identity.
pub struct Heap {
    objects:           Vec<Option<ObjectEntry>>,
    free_objects:      Vec<usize>,
    alloc_head:        Option<ObjRef>,
    environments:      Vec<Option<EnvEntry>>,
    free_environments: Vec<usize>,
}

impl Heap {
    /// Handle of the `null` singleton.
    pub const NULL: ObjRef = ObjRef(0);
    /// Handle of the `true` singleton.
    pub const TRUE: ObjRef = ObjRef(1);
    /// Handle of the `false` singleton.
    pub const FALSE: ObjRef = ObjRef(2);
    /// Slots below this index are singletons.
    const SINGLETONS: usize = 3;

    /// Creates a heap holding only the three singletons.
    #[must_use]
    pub fn new() -> Self {
        let singleton = |object| {
            Some(ObjectEntry { object,
                               marked: false,
                               next: None, })
        };
        Self { objects:           vec![singleton(Object::Null),
                                       singleton(Object::Boolean(true)),
                                       singleton(Object::Boolean(false))],
               free_objects:      Vec::new(),
               alloc_head:        None,
               environments:      Vec::new(),
               free_environments: Vec::new(), }
    }

    /// Returns the singleton handle for a boolean value.
    ///
    /// ## Example
    /// ```
    /// use quill::interpreter::heap::Heap;
    ///
    /// assert_eq!(Heap::boolean(true), Heap::TRUE);
    /// assert_eq!(Heap::boolean(false), Heap::FALSE);
    /// ```
    #[must_use]
    pub const fn boolean(value: bool) -> ObjRef {
        if value {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Allocates an object, linking it at the head of the allocation list.
    ///
    /// ## Example
    /// ```
    /// use quill::interpreter::{heap::Heap, object::Object};
    ///
    /// let mut heap = Heap::new();
    /// let value = heap.alloc(Object::Integer(5));
    ///
    /// assert_eq!(heap.inspect(value), "5");
    /// assert_eq!(heap.live_objects(), 1);
    /// ```
    pub fn alloc(&mut self, object: Object) -> ObjRef {
        let entry = ObjectEntry { object,
                                  marked: false,
                                  next: self.alloc_head, };
        let index = match self.free_objects.pop() {
            Some(index) => {
                self.objects[index] = Some(entry);
                index
            },
            None => {
                self.objects.push(Some(entry));
                self.objects.len() - 1
            },
        };
        let reference = ObjRef(index);
        self.alloc_head = Some(reference);
        reference
    }

    /// Returns the object behind a handle.
    ///
    /// # Panics
    /// Panics if the handle refers to a freed slot, which means a root was
    /// missing when the collector last ran.
    #[must_use]
    pub fn get(&self, reference: ObjRef) -> &Object {
        &self.objects[reference.0]
             .as_ref()
             .expect("object handle outlived its slot")
             .object
    }

    /// Allocates an environment enclosed by `outer`.
    pub fn alloc_env(&mut self, outer: Option<EnvRef>) -> EnvRef {
        let entry = EnvEntry { environment: Environment::new(outer),
                               marked:      false, };
        let index = match self.free_environments.pop() {
            Some(index) => {
                self.environments[index] = Some(entry);
                index
            },
            None => {
                self.environments.push(Some(entry));
                self.environments.len() - 1
            },
        };
        EnvRef(index)
    }

    /// Returns the environment behind a handle.
    ///
    /// # Panics
    /// Panics if the handle refers to a freed slot.
    #[must_use]
    pub fn env(&self, reference: EnvRef) -> &Environment {
        &self.environments[reference.0]
             .as_ref()
             .expect("environment handle outlived its slot")
             .environment
    }

    fn env_mut(&mut self, reference: EnvRef) -> &mut Environment {
        &mut self.environments[reference.0]
                 .as_mut()
                 .expect("environment handle outlived its slot")
                 .environment
    }

    /// Resolves a name against an environment chain.
    ///
    /// The local mapping is checked first, then the outer environments in
    /// order. `None` means the identifier is unresolved.
    #[must_use]
    pub fn lookup(&self, env: EnvRef, name: &str) -> Option<ObjRef> {
        let mut current = Some(env);
        while let Some(reference) = current {
            let environment = self.env(reference);
            if let Some(value) = environment.get_local(name) {
                return Some(value);
            }
            current = environment.outer();
        }
        None
    }

    /// Binds a name in the given environment, replacing any previous
    /// binding of that name there.
    pub fn bind(&mut self, env: EnvRef, name: &str, value: ObjRef) {
        self.env_mut(env).bind(name, value);
    }

    /// Marks everything reachable from the given roots, then sweeps the
    /// allocation list and the environment arena, freeing whatever stayed
    /// unmarked and clearing the marks of the survivors.
    ///
    /// Returns the number of objects freed.
    pub fn collect(&mut self, env_roots: &[EnvRef], object_roots: &[ObjRef]) -> usize {
        for &root in env_roots {
            self.mark_env(root);
        }
        for &root in object_roots {
            self.mark_object(root);
        }

        let freed_objects = self.sweep_objects();
        let freed_environments = self.sweep_environments();

        debug!(freed_objects,
               freed_environments,
               live_objects = self.live_objects(),
               "mark-and-sweep finished");

        freed_objects
    }

    /// Marks one object and everything reachable from it. Idempotent:
    /// already-marked objects are not revisited, so reference cycles
    /// terminate.
    fn mark_object(&mut self, reference: ObjRef) {
        if reference.0 < Self::SINGLETONS {
            return;
        }
        let entry = self.objects[reference.0]
                        .as_mut()
                        .expect("object handle outlived its slot");
        if entry.marked {
            return;
        }
        entry.marked = true;

        let mut children = Vec::new();
        let mut captured = None;
        match &entry.object {
            Object::Array(elements) => children.extend_from_slice(elements),
            Object::ReturnValue(inner) => children.push(*inner),
            Object::Function { env, .. } => captured = Some(*env),
            _ => {},
        }

        for child in children {
            self.mark_object(child);
        }
        if let Some(env) = captured {
            self.mark_env(env);
        }
    }

    /// Marks an environment, its bindings, and its outer chain.
    fn mark_env(&mut self, reference: EnvRef) {
        let entry = self.environments[reference.0]
                        .as_mut()
                        .expect("environment handle outlived its slot");
        if entry.marked {
            return;
        }
        entry.marked = true;

        let values: Vec<ObjRef> = entry.environment.store.values().copied().collect();
        let outer = entry.environment.outer();

        for value in values {
            self.mark_object(value);
        }
        if let Some(outer) = outer {
            self.mark_env(outer);
        }
    }

    /// Single pass over the allocation list: unmarked entries are unlinked
    /// and freed, surviving entries have their mark cleared.
    fn sweep_objects(&mut self) -> usize {
        let mut freed = 0;
        let mut previous: Option<ObjRef> = None;
        let mut current = self.alloc_head;

        while let Some(reference) = current {
            let (marked, next) = {
                let entry = self.objects[reference.0]
                                .as_ref()
                                .expect("allocation list references a freed slot");
                (entry.marked, entry.next)
            };

            if marked {
                self.objects[reference.0]
                    .as_mut()
                    .expect("allocation list references a freed slot")
                    .marked = false;
                previous = Some(reference);
            } else {
                match previous {
                    Some(previous) => {
                        self.objects[previous.0]
                            .as_mut()
                            .expect("allocation list references a freed slot")
                            .next = next;
                    },
                    None => self.alloc_head = next,
                }
                self.objects[reference.0] = None;
                self.free_objects.push(reference.0);
                freed += 1;
            }

            current = next;
        }

        freed
    }

    fn sweep_environments(&mut self) -> usize {
        let mut freed = 0;
        for index in 0..self.environments.len() {
            if let Some(entry) = self.environments[index].as_mut() {
                if entry.marked {
                    entry.marked = false;
                } else {
                    self.environments[index] = None;
                    self.free_environments.push(index);
                    freed += 1;
                }
            }
        }
        freed
    }

    /// Counts the objects currently allocated, excluding the singletons.
    #[must_use]
    pub fn live_objects(&self) -> usize {
        self.objects
            .iter()
            .skip(Self::SINGLETONS)
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Renders the textual form of a value, following handles into the
    /// heap for aggregates.
    ///
    /// ## Example
    /// ```
    /// use quill::interpreter::{heap::Heap, object::Object};
    ///
    /// let mut heap = Heap::new();
    /// let one = heap.alloc(Object::Integer(1));
    /// let two = heap.alloc(Object::Integer(2));
    /// let array = heap.alloc(Object::Array(vec![one, two]));
    ///
    /// assert_eq!(heap.inspect(array), "[1, 2]");
    /// assert_eq!(heap.inspect(Heap::NULL), "NULL");
    /// ```
    #[must_use]
    pub fn inspect(&self, reference: ObjRef) -> String {
        match self.get(reference) {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::Str(value) => value.clone(),
            Object::Null => "NULL".to_string(),
            Object::ReturnValue(inner) => self.inspect(*inner),
            Object::Function { parameters, body, .. } => {
                format!("fn({}) {{ {body} }}", parameters.join(", "))
            },
            Object::Array(elements) => {
                let rendered: Vec<String> =
                    elements.iter().map(|element| self.inspect(*element)).collect();
                format!("[{}]", rendered.join(", "))
            },
            Object::Builtin { name, .. } => format!("builtin function {name}"),
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
