use std::rc::Rc;

use crate::{
    ast::{BlockStatement, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::EnvRef,
        evaluator::builtin,
        heap::Heap,
        object::{ObjRef, Object},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// [`RuntimeError`] describing the failure. Propagating the error with `?`
/// at every call site is what aborts the rest of the current evaluation
/// unit, in operand order.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Number of statements evaluated between garbage collections.
pub const GC_THRESHOLD: usize = 100;

/// The tree-walking execution engine.
///
/// Holds the heap and the collector's root bookkeeping: `frames` is the
/// stack of environments with a call in flight (the global environment is
/// frame zero), and `temps` holds mid-expression intermediates that must
/// survive a collection triggered by a nested evaluation. A statement
/// counter triggers a sweep every [`GC_THRESHOLD`] statements.
pub struct Evaluator {
    pub(crate) heap:   Heap,
    pub(crate) frames: Vec<EnvRef>,
    pub(crate) temps:  Vec<ObjRef>,
    statements_since_gc: usize,
}

impl Evaluator {
    /// Creates an evaluator with a fresh heap and a global environment
    /// holding the builtin functions.
    #[must_use]
    pub fn new() -> Self {
        let mut heap = Heap::new();
        let global = heap.alloc_env(None);
        let mut evaluator = Self { heap,
                                   frames: vec![global],
                                   temps: Vec::new(),
                                   statements_since_gc: 0, };
        builtin::install(&mut evaluator, global);
        evaluator
    }

    /// The global environment, created once with the evaluator.
    #[must_use]
    pub fn global(&self) -> EnvRef {
        self.frames[0]
    }

    /// Read access to the heap, for rendering results.
    #[must_use]
    pub const fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Evaluates a whole program against an environment.
    ///
    /// A top-level `return` unwraps to its inner value here; the
    /// `ReturnValue` wrapper never escapes evaluation.
    pub fn eval_program(&mut self, program: &Program, env: EnvRef) -> EvalResult<ObjRef> {
        let result = self.eval_statements(&program.statements, env)?;
        Ok(match self.heap.get(result) {
            Object::ReturnValue(inner) => *inner,
            _ => result,
        })
    }

    /// Evaluates a statement sequence, yielding the last statement's value.
    ///
    /// After every statement the result is checked for the `ReturnValue`
    /// wrapper, which aborts the remaining statements and propagates the
    /// wrapper upward unchanged; runtime errors unwind through `?` the
    /// same way. The statement counter lives here, so a collection can
    /// only trigger between two statements, where `temps` and `frames`
    /// cover everything still in flight.
    pub(crate) fn eval_statements(&mut self,
                                  statements: &[Statement],
                                  env: EnvRef)
                                  -> EvalResult<ObjRef> {
        let mut result = Heap::NULL;
        for statement in statements {
            result = self.eval_statement(statement, env)?;

            self.statements_since_gc += 1;
            if self.statements_since_gc >= GC_THRESHOLD {
                self.collect(env, result);
                self.statements_since_gc = 0;
            }

            if self.heap.get(result).is_return_value() {
                return Ok(result);
            }
        }
        Ok(result)
    }

    /// Evaluates a single statement.
    pub(crate) fn eval_statement(&mut self,
                                 statement: &Statement,
                                 env: EnvRef)
                                 -> EvalResult<ObjRef> {
        match statement {
            Statement::Let { name, value, .. } => {
                let value = self.eval(value, env)?;
                if self.heap.get(value).is_return_value() {
                    return Ok(value);
                }
                self.heap.bind(env, name, value);
                Ok(Heap::NULL)
            },
            Statement::Return { value, .. } => {
                let value = self.eval(value, env)?;
                Ok(self.heap.alloc(Object::ReturnValue(value)))
            },
            Statement::Expression { expr, .. } => self.eval(expr, env),
        }
    }

    /// Evaluates an expression and returns a handle to the resulting
    /// value.
    ///
    /// This is the main dispatch of the interpreter: strict post-order
    /// over the tree, one arm per expression kind.
    pub fn eval(&mut self, expr: &Expr, env: EnvRef) -> EvalResult<ObjRef> {
        match expr {
            Expr::IntegerLiteral { value, .. } => Ok(self.heap.alloc(Object::Integer(*value))),
            Expr::BooleanLiteral { value, .. } => Ok(Heap::boolean(*value)),
            Expr::StringLiteral { value, .. } => Ok(self.heap.alloc(Object::Str(value.clone()))),
            Expr::Identifier { name, line } => {
                self.heap
                    .lookup(env, name)
                    .ok_or_else(|| RuntimeError::UnknownIdentifier { name: name.clone(),
                                                                     line: *line, })
            },
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements, env),
            Expr::FunctionLiteral { parameters, body, .. } => {
                Ok(self.heap.alloc(Object::Function { parameters: Rc::clone(parameters),
                                                      body: Rc::clone(body),
                                                      env }))
            },
            Expr::Prefix { op, right, line } => {
                let operand = self.eval(right, env)?;
                self.eval_prefix(*op, operand, *line)
            },
            Expr::Infix { left, op, right, line } => {
                let left_value = self.eval(left, env)?;
                self.temps.push(left_value);
                let right_value = self.eval(right, env);
                self.temps.pop();

                self.eval_infix(*op, left_value, right_value?, *line)
            },
            Expr::Index { collection, index, line } => {
                let collection_value = self.eval(collection, env)?;
                self.temps.push(collection_value);
                let index_value = self.eval(index, env);
                self.temps.pop();

                self.eval_index(collection_value, index_value?, *line)
            },
            Expr::Call { callee, arguments, line } => {
                self.eval_call(callee, arguments, env, *line)
            },
            Expr::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                let condition = self.eval(condition, env)?;
                if self.heap.get(condition).is_truthy() {
                    self.eval_statements(&consequence.statements, env)
                } else if let Some(alternative) = alternative {
                    self.eval_statements(&alternative.statements, env)
                } else {
                    Ok(Heap::NULL)
                }
            },
            Expr::While { condition, body, .. } => self.eval_while(condition, body, env),
        }
    }

    /// Evaluates a pre-test loop.
    ///
    /// The condition is re-evaluated before every iteration; the loop
    /// itself yields `null`. A `return` inside the body propagates out
    /// through the wrapper check.
    fn eval_while(&mut self,
                  condition: &Expr,
                  body: &BlockStatement,
                  env: EnvRef)
                  -> EvalResult<ObjRef> {
        loop {
            let decided = self.eval(condition, env)?;
            if !self.heap.get(decided).is_truthy() {
                return Ok(Heap::NULL);
            }

            let result = self.eval_statements(&body.statements, env)?;
            if self.heap.get(result).is_return_value() {
                return Ok(result);
            }
        }
    }

    /// Evaluates array elements left to right into a fresh array value.
    ///
    /// Elements already evaluated are rooted in `temps` while the
    /// remaining elements run, since any of them may trigger a
    /// collection.
    fn eval_array_literal(&mut self, elements: &[Expr], env: EnvRef) -> EvalResult<ObjRef> {
        let mark = self.temps.len();
        let mut values = Vec::with_capacity(elements.len());

        for element in elements {
            match self.eval(element, env) {
                Ok(value) => {
                    self.temps.push(value);
                    values.push(value);
                },
                Err(error) => {
                    self.temps.truncate(mark);
                    return Err(error);
                },
            }
        }

        self.temps.truncate(mark);
        Ok(self.heap.alloc(Object::Array(values)))
    }

    /// Runs a collection rooted at the in-flight frames, the temporary
    /// roots, the currently executing environment, and the pending
    /// statement result.
    fn collect(&mut self, env: EnvRef, pending: ObjRef) {
        let mut env_roots = self.frames.clone();
        env_roots.push(env);

        let mut object_roots = self.temps.clone();
        object_roots.push(pending);

        self.heap.collect(&env_roots, &object_roots);
    }

    /// Runs a collection rooted at the frame stack alone.
    ///
    /// Meant for quiescent moments between evaluation units, e.g. between
    /// REPL lines.
    pub fn collect_now(&mut self) -> usize {
        let env_roots = self.frames.clone();
        let object_roots = self.temps.clone();
        self.heap.collect(&env_roots, &object_roots)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
