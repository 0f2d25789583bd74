/// Parsing errors.
///
/// Defines all error types that can occur while turning source text into a
/// syntax tree. Parse errors include unexpected tokens, missing structural
/// tokens, and expressions with no applicable parse rule. The parser
/// accumulates them in a list so one pass can surface several independent
/// mistakes.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a program:
/// unresolved identifiers, operator and type errors, division by zero,
/// overflow, and call errors.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
