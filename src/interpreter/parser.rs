/// Core parser state and the precedence-climbing loop.
///
/// Contains the `Parser` with its two-token window, the `Precedence`
/// ordering, and error accumulation.
pub mod core;

/// Infix parse rules.
///
/// Binary operators, call argument lists, and index expressions, together
/// with the token-to-precedence and token-to-operator maps.
pub mod infix;

/// Prefix parse rules.
///
/// Literals, identifiers, prefix operators, grouping, array literals,
/// conditionals, loops and function literals.
pub mod prefix;

/// Statement parsing.
///
/// `let`, `return`, expression statements, and brace-delimited blocks.
pub mod statement;

/// Shared list grammar.
///
/// The comma-separated list parser reused by call arguments, array
/// literals and parameter lists.
pub mod utils;
