use crate::{
    ast::PrefixOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        heap::Heap,
        object::{ObjRef, Object},
    },
};

impl Evaluator {
    /// Applies a prefix operator to an already evaluated operand.
    ///
    /// `!` maps the operand through the truthiness rule and negates it,
    /// so it is defined for every kind. `-` is defined for integers only
    /// and uses checked negation; any other operand kind is an unknown
    /// operator error.
    pub(crate) fn eval_prefix(&mut self,
                              op: PrefixOperator,
                              operand: ObjRef,
                              line: usize)
                              -> EvalResult<ObjRef> {
        match op {
            PrefixOperator::Not => Ok(Heap::boolean(!self.heap.get(operand).is_truthy())),
            PrefixOperator::Negate => {
                if let Object::Integer(value) = self.heap.get(operand) {
                    let negated = value.checked_neg()
                                       .ok_or(RuntimeError::IntegerOverflow { line })?;
                    Ok(self.heap.alloc(Object::Integer(negated)))
                } else {
                    Err(RuntimeError::UnknownPrefixOperator {
                        op,
                        operand: self.heap.get(operand).type_name(),
                        line,
                    })
                }
            },
        }
    }
}
