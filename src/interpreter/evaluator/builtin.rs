use crate::{
    error::RuntimeError,
    interpreter::{
        environment::EnvRef,
        evaluator::core::{EvalResult, Evaluator},
        heap::Heap,
        object::{BuiltinFn, ObjRef, Object},
    },
};

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means any count of `n` or more is accepted.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this constraint.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }

    /// The count reported in an arity error.
    const fn expected(self) -> usize {
        match self {
            Self::Exact(m) | Self::AtLeast(m) => m,
        }
    }
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides a name, an arity specification, and a function
/// pointer implementing the builtin. The macro produces `BuiltinDef`
/// (internal metadata) and `BUILTIN_TABLE` (the static table installed
/// into the global environment and consulted at dispatch).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "len"   => { arity: Arity::Exact(1), func: len },
    "first" => { arity: Arity::Exact(1), func: first },
    "last"  => { arity: Arity::Exact(1), func: last },
    "rest"  => { arity: Arity::Exact(1), func: rest },
    "push"  => { arity: Arity::Exact(2), func: push },
    "puts"  => { arity: Arity::AtLeast(0), func: puts },
}

/// Binds every builtin into the given environment.
///
/// Called once per evaluator, against the global environment. The values
/// stay reachable through that environment, so the collector never frees
/// them.
pub(crate) fn install(evaluator: &mut Evaluator, env: EnvRef) {
    for def in BUILTIN_TABLE {
        let object = evaluator.heap.alloc(Object::Builtin { name: def.name,
                                                            func: def.func, });
        evaluator.heap.bind(env, def.name, object);
    }
}

/// Checks arity against the table and invokes the native implementation.
pub(crate) fn dispatch(evaluator: &mut Evaluator,
                       name: &'static str,
                       func: BuiltinFn,
                       args: &[ObjRef],
                       line: usize)
                       -> EvalResult<ObjRef> {
    if let Some(def) = BUILTIN_TABLE.iter().find(|def| def.name == name) {
        if !def.arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { expected: def.arity.expected(),
                                                             found: args.len(),
                                                             line });
        }
    }
    func(evaluator, args, line)
}

/// `len(value)`: length of a string (in bytes) or an array.
fn len(evaluator: &mut Evaluator, args: &[ObjRef], line: usize) -> EvalResult<ObjRef> {
    let length = match evaluator.heap.get(args[0]) {
        Object::Str(value) => value.len(),
        Object::Array(elements) => elements.len(),
        other => {
            return Err(RuntimeError::WrongArgumentKind { builtin: "len",
                                                         found: other.type_name(),
                                                         line });
        },
    };

    let length = i64::try_from(length).map_err(|_| RuntimeError::IntegerOverflow { line })?;
    Ok(evaluator.heap.alloc(Object::Integer(length)))
}

/// `first(array)`: the first element, or `null` for an empty array.
fn first(evaluator: &mut Evaluator, args: &[ObjRef], line: usize) -> EvalResult<ObjRef> {
    match evaluator.heap.get(args[0]) {
        Object::Array(elements) => Ok(elements.first().copied().unwrap_or(Heap::NULL)),
        other => Err(RuntimeError::WrongArgumentKind { builtin: "first",
                                                      found: other.type_name(),
                                                      line }),
    }
}

/// `last(array)`: the last element, or `null` for an empty array.
fn last(evaluator: &mut Evaluator, args: &[ObjRef], line: usize) -> EvalResult<ObjRef> {
    match evaluator.heap.get(args[0]) {
        Object::Array(elements) => Ok(elements.last().copied().unwrap_or(Heap::NULL)),
        other => Err(RuntimeError::WrongArgumentKind { builtin: "last",
                                                      found: other.type_name(),
                                                      line }),
    }
}

/// `rest(array)`: a new array holding everything but the first element,
/// or `null` for an empty array.
fn rest(evaluator: &mut Evaluator, args: &[ObjRef], line: usize) -> EvalResult<ObjRef> {
    let remainder = match evaluator.heap.get(args[0]) {
        Object::Array(elements) => {
            if elements.is_empty() {
                None
            } else {
                Some(elements[1..].to_vec())
            }
        },
        other => {
            return Err(RuntimeError::WrongArgumentKind { builtin: "rest",
                                                         found: other.type_name(),
                                                         line });
        },
    };

    match remainder {
        Some(elements) => Ok(evaluator.heap.alloc(Object::Array(elements))),
        None => Ok(Heap::NULL),
    }
}

/// `push(array, value)`: a new array with `value` appended; the original
/// array is unchanged.
fn push(evaluator: &mut Evaluator, args: &[ObjRef], line: usize) -> EvalResult<ObjRef> {
    let mut elements = match evaluator.heap.get(args[0]) {
        Object::Array(elements) => elements.clone(),
        other => {
            return Err(RuntimeError::WrongArgumentKind { builtin: "push",
                                                         found: other.type_name(),
                                                         line });
        },
    };

    elements.push(args[1]);
    Ok(evaluator.heap.alloc(Object::Array(elements)))
}

/// `puts(...)`: prints each argument's textual form on its own line and
/// yields `null`.
fn puts(evaluator: &mut Evaluator, args: &[ObjRef], _line: usize) -> EvalResult<ObjRef> {
    for argument in args {
        println!("{}", evaluator.heap.inspect(*argument));
    }
    Ok(Heap::NULL)
}
