use crate::{
    ast::InfixOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        heap::Heap,
        object::{ObjRef, Object},
    },
};

impl Evaluator {
    /// Applies an infix operator to two already evaluated operands.
    ///
    /// Dispatch order matters and follows the language rules:
    /// 1. two integers use integer arithmetic and ordering;
    /// 2. two strings support `+` (concatenation) only;
    /// 3. `null` on either side yields `null`;
    /// 4. operands of different kinds are a type mismatch;
    /// 5. remaining same-kind operands support `==`/`!=` by identity.
    pub(crate) fn eval_infix(&mut self,
                             op: InfixOperator,
                             left: ObjRef,
                             right: ObjRef,
                             line: usize)
                             -> EvalResult<ObjRef> {
        if let (Object::Integer(a), Object::Integer(b)) =
            (self.heap.get(left), self.heap.get(right))
        {
            let (a, b) = (*a, *b);
            return self.eval_integer_infix(op, a, b, line);
        }

        if let (Object::Str(a), Object::Str(b)) = (self.heap.get(left), self.heap.get(right)) {
            if op == InfixOperator::Add {
                let combined = format!("{a}{b}");
                return Ok(self.heap.alloc(Object::Str(combined)));
            }
            return Err(RuntimeError::UnknownInfixOperator { left: "STRING",
                                                            op,
                                                            right: "STRING",
                                                            line });
        }

        if matches!(self.heap.get(left), Object::Null)
           || matches!(self.heap.get(right), Object::Null)
        {
            return Ok(Heap::NULL);
        }

        let left_kind = self.heap.get(left).type_name();
        let right_kind = self.heap.get(right).type_name();
        if left_kind != right_kind {
            return Err(RuntimeError::TypeMismatch { left: left_kind,
                                                    op,
                                                    right: right_kind,
                                                    line });
        }

        match op {
            InfixOperator::Eq => Ok(Heap::boolean(left == right)),
            InfixOperator::NotEq => Ok(Heap::boolean(left != right)),
            _ => Err(RuntimeError::UnknownInfixOperator { left: left_kind,
                                                          op,
                                                          right: right_kind,
                                                          line }),
        }
    }

    /// Integer arithmetic and comparison.
    ///
    /// Arithmetic is checked; overflow and division or remainder by zero
    /// are runtime errors, not process traps.
    fn eval_integer_infix(&mut self,
                          op: InfixOperator,
                          a: i64,
                          b: i64,
                          line: usize)
                          -> EvalResult<ObjRef> {
        use InfixOperator::{
            Add, Div, Eq, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEq, Sub,
        };

        let value = match op {
            Add => a.checked_add(b).ok_or(RuntimeError::IntegerOverflow { line })?,
            Sub => a.checked_sub(b).ok_or(RuntimeError::IntegerOverflow { line })?,
            Mul => a.checked_mul(b).ok_or(RuntimeError::IntegerOverflow { line })?,
            Div => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                a.checked_div(b).ok_or(RuntimeError::IntegerOverflow { line })?
            },
            Mod => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                a.checked_rem(b).ok_or(RuntimeError::IntegerOverflow { line })?
            },
            Eq => return Ok(Heap::boolean(a == b)),
            NotEq => return Ok(Heap::boolean(a != b)),
            Less => return Ok(Heap::boolean(a < b)),
            Greater => return Ok(Heap::boolean(a > b)),
            LessEqual => return Ok(Heap::boolean(a <= b)),
            GreaterEqual => return Ok(Heap::boolean(a >= b)),
        };

        Ok(self.heap.alloc(Object::Integer(value)))
    }

    /// Applies the index operator to already evaluated operands.
    ///
    /// Arrays indexed by integers yield the element, or `null` when the
    /// index is negative or past the end. Every other operand pairing is
    /// an error.
    pub(crate) fn eval_index(&mut self,
                             collection: ObjRef,
                             index: ObjRef,
                             line: usize)
                             -> EvalResult<ObjRef> {
        if let (Object::Array(elements), Object::Integer(i)) =
            (self.heap.get(collection), self.heap.get(index))
        {
            let element = usize::try_from(*i).ok()
                                             .and_then(|at| elements.get(at).copied());
            return Ok(element.unwrap_or(Heap::NULL));
        }

        Err(RuntimeError::IndexNotSupported { collection: self.heap
                                                              .get(collection)
                                                              .type_name(),
                                              index: self.heap.get(index).type_name(),
                                              line })
    }
}
