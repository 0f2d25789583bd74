use crate::ast::{InfixOperator, PrefixOperator};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can be raised during evaluation.
pub enum RuntimeError {
    /// Tried to use a name with no binding in scope.
    UnknownIdentifier {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An infix operator was applied to operands of different kinds.
    TypeMismatch {
        /// Kind tag of the left operand.
        left:  &'static str,
        /// The operator.
        op:    InfixOperator,
        /// Kind tag of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An infix operator is not defined for these operand kinds.
    UnknownInfixOperator {
        /// Kind tag of the left operand.
        left:  &'static str,
        /// The operator.
        op:    InfixOperator,
        /// Kind tag of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A prefix operator is not defined for this operand kind.
    UnknownPrefixOperator {
        /// The operator.
        op:      PrefixOperator,
        /// Kind tag of the operand.
        operand: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division or remainder by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    IntegerOverflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to call a value that is not a function.
    NotCallable {
        /// Kind tag of the value that was called.
        kind: &'static str,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a call.
    ArgumentCountMismatch {
        /// The number of parameters the callee declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The index operator was applied to unsupported operand kinds.
    IndexNotSupported {
        /// Kind tag of the indexed value.
        collection: &'static str,
        /// Kind tag of the index value.
        index:      &'static str,
        /// The source line where the error occurred.
        line:       usize,
    },
    /// A builtin function received an argument of the wrong kind.
    WrongArgumentKind {
        /// Name of the builtin.
        builtin: &'static str,
        /// Kind tag of the offending argument.
        found:   &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIdentifier { name, line } => {
                write!(f, "Error on line {line}: identifier not found: {name}.")
            },

            Self::TypeMismatch { left, op, right, line } => {
                write!(f, "Error on line {line}: type mismatch: {left} {op} {right}.")
            },

            Self::UnknownInfixOperator { left, op, right, line } => {
                write!(f, "Error on line {line}: unknown operator: {left} {op} {right}.")
            },

            Self::UnknownPrefixOperator { op, operand, line } => {
                write!(f, "Error on line {line}: unknown operator: {op}{operand}.")
            },

            Self::DivisionByZero { line } => write!(f, "Error on line {line}: division by zero."),

            Self::IntegerOverflow { line } => {
                write!(f, "Error on line {line}: integer overflow while computing result.")
            },

            Self::NotCallable { kind, line } => {
                write!(f, "Error on line {line}: not a function: {kind}.")
            },

            Self::ArgumentCountMismatch { expected, found, line } => write!(f,
                "Error on line {line}: argument length ({found}) not equal to parameter length ({expected})."),

            Self::IndexNotSupported { collection, index, line } => write!(f,
                "Error on line {line}: index operator not supported: {collection}[{index}]."),

            Self::WrongArgumentKind { builtin, found, line } => write!(f,
                "Error on line {line}: argument to '{builtin}' not supported, got {found}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
