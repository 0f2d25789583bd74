use std::rc::Rc;

use crate::{
    ast::BlockStatement,
    interpreter::{
        environment::EnvRef,
        evaluator::core::{EvalResult, Evaluator},
    },
};

/// A handle to a runtime object owned by the [`Heap`].
///
/// Handles are plain indices and are freely copyable; comparing two handles
/// compares object identity, which is the equality rule for non-primitive
/// kinds.
///
/// [`Heap`]: crate::interpreter::heap::Heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjRef(pub(crate) usize);

/// The native implementation of a builtin function.
///
/// A builtin receives the evaluator (for heap access), the evaluated
/// argument handles, and the call's line number.
pub type BuiltinFn = fn(&mut Evaluator, &[ObjRef], usize) -> EvalResult<ObjRef>;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the kinds a value can have at run time. Aggregate
/// kinds reference their contents through [`ObjRef`] handles; function
/// values share their parameter list and body with the AST node they were
/// created from.
#[derive(Debug, Clone)]
pub enum Object {
    /// A 64 bit signed integer.
    Integer(i64),
    /// A boolean. Only the two singleton heap slots ever hold this kind,
    /// so booleans compare by identity.
    Boolean(bool),
    /// An immutable string.
    Str(String),
    /// The absent value. A single heap slot holds it.
    Null,
    /// Wrapper carrying a `return`ed value out through enclosing blocks.
    /// Unwrapped at function-call and program boundaries, so it is never
    /// observable from the language.
    ReturnValue(ObjRef),
    /// A function value: parameters, body, and the environment the literal
    /// was evaluated in. Calls extend that environment, which is what makes
    /// closures work.
    Function {
        /// Parameter names, shared with the originating literal.
        parameters: Rc<Vec<String>>,
        /// The body, shared with the originating literal.
        body:       Rc<BlockStatement>,
        /// The definition environment captured by the literal.
        env:        EnvRef,
    },
    /// An array of object handles.
    Array(Vec<ObjRef>),
    /// A native function installed in the global environment.
    Builtin {
        /// The name the builtin is bound to.
        name: &'static str,
        /// The native implementation.
        func: BuiltinFn,
    },
}

impl Object {
    /// Returns the kind tag of this object, as shown to the user next to a
    /// result.
    ///
    /// ## Example
    /// ```
    /// use quill::interpreter::object::Object;
    ///
    /// assert_eq!(Object::Integer(7).type_name(), "INTEGER");
    /// assert_eq!(Object::Null.type_name(), "NULL");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Boolean(_) => "BOOLEAN",
            Self::Str(_) => "STRING",
            Self::Null => "NULL",
            Self::ReturnValue(_) => "RETURN_VALUE",
            Self::Function { .. } => "FUNCTION",
            Self::Array(_) => "ARRAY",
            Self::Builtin { .. } => "BUILTIN",
        }
    }

    /// Applies the truthiness rule used by conditions and `!`.
    ///
    /// `false`, `null` and integer `0` are falsy; everything else,
    /// including every string, is truthy.
    ///
    /// ## Example
    /// ```
    /// use quill::interpreter::object::Object;
    ///
    /// assert!(!Object::Integer(0).is_truthy());
    /// assert!(Object::Str(String::new()).is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Boolean(false) | Self::Null | Self::Integer(0))
    }

    /// Returns `true` if the object is a [`Self::ReturnValue`] wrapper.
    #[must_use]
    pub const fn is_return_value(&self) -> bool {
        matches!(self, Self::ReturnValue(_))
    }
}
