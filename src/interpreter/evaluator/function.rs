use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::EnvRef,
        evaluator::{
            builtin,
            core::{EvalResult, Evaluator},
        },
        object::{ObjRef, Object},
    },
};

impl Evaluator {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first; if it fails, no argument is
    /// evaluated. Arguments run strictly left to right, each one rooted
    /// in `temps` as soon as it exists, since a later argument or the
    /// body itself may trigger a collection. The roots are released once
    /// the call completes.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            env: EnvRef,
                            line: usize)
                            -> EvalResult<ObjRef> {
        let callee_value = self.eval(callee, env)?;

        let mark = self.temps.len();
        self.temps.push(callee_value);

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            match self.eval(argument, env) {
                Ok(value) => {
                    self.temps.push(value);
                    args.push(value);
                },
                Err(error) => {
                    self.temps.truncate(mark);
                    return Err(error);
                },
            }
        }

        let result = self.apply(callee_value, &args, line);
        self.temps.truncate(mark);
        result
    }

    /// Applies a callable value to already evaluated arguments.
    ///
    /// A `Function` requires the argument count to equal its parameter
    /// count; the body then runs in a fresh environment enclosing the
    /// function's *definition* environment, with one binding per
    /// parameter. A `ReturnValue` produced by the body is unwrapped here,
    /// so `return` never leaks past the call. A `Builtin` dispatches to
    /// its native implementation. Anything else is not callable.
    pub(crate) fn apply(&mut self,
                        callee: ObjRef,
                        args: &[ObjRef],
                        line: usize)
                        -> EvalResult<ObjRef> {
        match self.heap.get(callee).clone() {
            Object::Function { parameters, body, env } => {
                if parameters.len() != args.len() {
                    return Err(RuntimeError::ArgumentCountMismatch { expected:
                                                                         parameters.len(),
                                                                     found: args.len(),
                                                                     line });
                }

                let call_env = self.heap.alloc_env(Some(env));
                for (parameter, argument) in parameters.iter().zip(args) {
                    self.heap.bind(call_env, parameter, *argument);
                }

                self.frames.push(call_env);
                let result = self.eval_statements(&body.statements, call_env);
                self.frames.pop();

                let result = result?;
                Ok(match self.heap.get(result) {
                    Object::ReturnValue(inner) => *inner,
                    _ => result,
                })
            },

            Object::Builtin { name, func } => builtin::dispatch(self, name, func, args, line),

            other => Err(RuntimeError::NotCallable { kind: other.type_name(),
                                                     line }),
        }
    }
}
