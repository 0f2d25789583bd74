//! # quill
//!
//! quill is a small, dynamically typed scripting language implemented as a
//! tree-walking interpreter. Source text is lexed into tokens, parsed with
//! a Pratt (precedence-climbing) parser into a syntax tree, and evaluated
//! directly against chained environments. Runtime values live on an
//! explicit heap reclaimed by a mark-and-sweep garbage collector.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    environment::EnvRef,
    evaluator::core::Evaluator,
    lexer::{Lexer, Token},
    parser::core::Parser,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The
/// AST is built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Renders the canonical, fully parenthesized form of each node.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing,
/// parsing, or evaluating code. Parse errors and runtime errors are
/// separate channels and are never conflated: a non-empty parse error
/// list means the program is not evaluated at all.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the runtime
/// value representation, environments, and the garbage-collected heap to
/// provide a complete runtime for source code evaluation.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, heap.
/// - Provides entry points for interpreting expressions or programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

use crate::{
    ast::Program,
    error::{ParseError, RuntimeError},
};

/// A failure at the script boundary: either the parse errors accumulated
/// over one pass, or the runtime error that ended evaluation.
#[derive(Debug)]
pub enum ScriptError {
    /// The source did not parse; the program was not evaluated.
    Parse(Vec<ParseError>),
    /// Evaluation ended with a runtime error.
    Runtime(RuntimeError),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(errors) => {
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            },
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ScriptError {}

/// The result of evaluating one program or REPL line: the kind tag of the
/// final value and its textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Kind tag of the result (e.g. `INTEGER`).
    pub kind:  &'static str,
    /// Textual form of the result (e.g. `15`).
    pub value: String,
}

/// Parses a complete source text into a [`Program`].
///
/// The parser does not stop at the first mistake; all errors from the
/// pass are returned together, and a non-empty list means the tree must
/// not be evaluated.
///
/// # Examples
/// ```
/// let program = quill::parse("-a * b").unwrap();
/// assert_eq!(program.to_string(), "((-a) * b)");
///
/// assert!(quill::parse("let = 5;").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, Vec<ParseError>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    let errors = parser.into_errors();

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

/// Lexes one piece of text into `(kind, literal)` pairs.
///
/// The sequence ends with the first end-of-input token, which is
/// included. This is the entry point behind the token-dump mode of the
/// command line.
///
/// # Examples
/// ```
/// let tokens = quill::lex_tokens("let x = 5");
///
/// assert_eq!(tokens[0], ("LET".to_string(), "let".to_string()));
/// assert_eq!(tokens[1], ("IDENT".to_string(), "x".to_string()));
/// assert_eq!(tokens.last().unwrap().0, "END");
/// ```
#[must_use]
pub fn lex_tokens(source: &str) -> Vec<(String, String)> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let (token, _) = lexer.next_token();
        let done = token == Token::Eof;
        tokens.push((token.kind_name().to_string(), token.to_string()));
        if done {
            break;
        }
    }

    tokens
}

/// A persistent interpreter instance: one heap and one global environment
/// with the builtin functions installed.
///
/// Bindings made by one evaluated line are visible to later lines, which
/// is exactly the REPL contract. Independent sessions share nothing.
///
/// # Examples
/// ```
/// use quill::Session;
///
/// let mut session = Session::new();
/// session.eval_source("let newAdder = fn(x) { fn(y) { x + y } };").unwrap();
/// session.eval_source("let addTwo = newAdder(2);").unwrap();
///
/// let result = session.eval_source("addTwo(3);").unwrap();
/// assert_eq!(result.kind, "INTEGER");
/// assert_eq!(result.value, "5");
/// ```
pub struct Session {
    evaluator: Evaluator,
    global:    EnvRef,
}

impl Session {
    /// Creates a session with an empty global environment (apart from the
    /// builtins).
    #[must_use]
    pub fn new() -> Self {
        let evaluator = Evaluator::new();
        let global = evaluator.global();
        Self { evaluator, global }
    }

    /// Parses and evaluates one piece of source against the session
    /// state.
    ///
    /// Parse errors mean nothing was evaluated. A runtime error ends this
    /// evaluation unit but leaves the session usable: bindings made by
    /// earlier statements of the same source stay in place, and later
    /// calls see a consistent heap.
    pub fn eval_source(&mut self, source: &str) -> Result<Evaluation, ScriptError> {
        let program = parse(source).map_err(ScriptError::Parse)?;
        let result = self.evaluator
                         .eval_program(&program, self.global)
                         .map_err(ScriptError::Runtime)?;

        Ok(Evaluation { kind:  self.evaluator.heap().get(result).type_name(),
                        value: self.evaluator.heap().inspect(result), })
    }

    /// Forces a mark-and-sweep pass, returning the number of objects
    /// freed.
    ///
    /// Evaluation triggers collections on its own every
    /// [`GC_THRESHOLD`](crate::interpreter::evaluator::core::GC_THRESHOLD)
    /// statements; this entry point exists for quiescent moments between
    /// evaluation units.
    pub fn collect_garbage(&mut self) -> usize {
        self.evaluator.collect_now()
    }

    /// Number of objects currently on the heap, excluding the singletons.
    #[must_use]
    pub fn live_objects(&self) -> usize {
        self.evaluator.heap().live_objects()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses and evaluates a complete program in a fresh session.
///
/// Returns the kind tag and textual form of the final value, or the
/// errors that stopped it.
///
/// # Errors
/// Returns [`ScriptError::Parse`] when the source does not parse (the
/// program is not evaluated), and [`ScriptError::Runtime`] when
/// evaluation fails.
///
/// # Examples
/// ```
/// use quill::run_program;
///
/// let result = run_program("5 + 5 * 2 - 10 / 2").unwrap();
/// assert_eq!(result.kind, "INTEGER");
/// assert_eq!(result.value, "15");
///
/// // Runtime errors surface as the program's outcome, not a crash.
/// assert!(run_program("5 / 0").is_err());
/// ```
pub fn run_program(source: &str) -> Result<Evaluation, ScriptError> {
    Session::new().eval_source(source)
}
