use pretty_assertions::assert_eq;
use quill::{lex_tokens, parse, run_program, ScriptError, Session};

/// Runs a program and returns `(kind, value)` of its result.
fn eval(src: &str) -> (String, String) {
    match run_program(src) {
        Ok(result) => (result.kind.to_string(), result.value),
        Err(error) => panic!("Script failed: {error}\nSource: {src}"),
    }
}

fn assert_integer(src: &str, expected: i64) {
    assert_eq!(eval(src), ("INTEGER".to_string(), expected.to_string()), "Source: {src}");
}

fn assert_boolean(src: &str, expected: bool) {
    assert_eq!(eval(src), ("BOOLEAN".to_string(), expected.to_string()), "Source: {src}");
}

fn assert_string(src: &str, expected: &str) {
    assert_eq!(eval(src), ("STRING".to_string(), expected.to_string()), "Source: {src}");
}

fn assert_null(src: &str) {
    assert_eq!(eval(src), ("NULL".to_string(), "NULL".to_string()), "Source: {src}");
}

fn assert_runtime_error(src: &str) {
    match run_program(src) {
        Err(ScriptError::Runtime(_)) => {},
        Err(ScriptError::Parse(errors)) => {
            panic!("Expected a runtime error but parsing failed: {errors:?}\nSource: {src}")
        },
        Ok(result) => {
            panic!("Expected a runtime error but got {result:?}\nSource: {src}")
        },
    }
}

fn assert_canonical(src: &str, expected: &str) {
    let program = parse(src).unwrap_or_else(|errors| panic!("Parse failed: {errors:?}"));
    assert_eq!(program.to_string(), expected, "Source: {src}");
}

#[test]
fn lexing_is_whitespace_insensitive() {
    let source = "let five = 5; five + 10 <= 20 != true // trailing comment";
    let first_pass = lex_tokens(source);

    // Re-lexing the concatenated literals reproduces the kind sequence.
    let literals: Vec<String> = first_pass.iter()
                                          .map(|(_, literal)| literal.clone())
                                          .collect();
    let second_pass = lex_tokens(&literals.join(" "));

    let kinds = |tokens: &[(String, String)]| {
        tokens.iter().map(|(kind, _)| kind.clone()).collect::<Vec<_>>()
    };
    assert_eq!(kinds(&first_pass), kinds(&second_pass));
}

#[test]
fn lexing_two_character_operators() {
    let kinds: Vec<String> = lex_tokens("a == b != c <= d >= e").into_iter()
                                                                .map(|(kind, _)| kind)
                                                                .collect();
    assert_eq!(kinds, vec!["IDENT", "==", "IDENT", "!=", "IDENT", "<=", "IDENT", ">=", "IDENT",
                           "END"]);
}

#[test]
fn unterminated_string_lexes_to_end_of_input() {
    let tokens = lex_tokens("\"never closed");

    assert_eq!(tokens[0], ("STRING".to_string(), "never closed".to_string()));
    assert_eq!(tokens.last().unwrap().0, "END");
}

#[test]
fn unknown_characters_become_illegal_tokens() {
    let tokens = lex_tokens("1 @ 2");

    assert_eq!(tokens[1], ("ILLEGAL".to_string(), "@".to_string()));
    // The stream keeps going after the bad character.
    assert_eq!(tokens[2], ("INT".to_string(), "2".to_string()));
}

#[test]
fn operator_precedence_grouping() {
    assert_canonical("a + b * c", "(a + (b * c))");
    assert_canonical("-a * b", "((-a) * b)");
    assert_canonical("a + b + c", "((a + b) + c)");
    assert_canonical("a + b / c", "(a + (b / c))");
    assert_canonical("(a + b) * c", "((a + b) * c)");
    assert_canonical("!-a", "(!(-a))");
    assert_canonical("a + b % c", "(a + (b % c))");
    assert_canonical("3 < 5 == true", "((3 < 5) == true)");
    assert_canonical("a <= b >= c", "((a <= b) >= c)");
}

#[test]
fn call_and_index_bind_tightest() {
    assert_canonical("add(a, b * c)", "add(a, (b * c))");
    assert_canonical("a + add(b, c) + d", "((a + add(b, c)) + d)");
    assert_canonical("a * items[0]", "(a * (items[0]))");
    assert_canonical("-items[0]", "(-(items[0]))");
}

#[test]
fn parser_accumulates_errors_and_does_not_evaluate() {
    let errors = parse("let = 5;").unwrap_err();
    assert!(errors.len() >= 2, "expected several errors, got {errors:?}");

    assert!(parse("1 + ;").is_err());

    match run_program("let = 5;") {
        Err(ScriptError::Parse(_)) => {},
        other => panic!("expected parse errors, got {other:?}"),
    }
}

#[test]
fn integer_arithmetic() {
    assert_integer("5 + 5 * 2 - 10 / 2", 15);
    assert_integer("10 % 3", 1);
    assert_integer("(2 + 3) * 4", 20);
    assert_integer("-5 + 10", 5);
    assert_integer("2 * -3", -6);
}

#[test]
fn arithmetic_errors() {
    assert_runtime_error("5 / 0");
    assert_runtime_error("5 % 0");
    assert_runtime_error("9223372036854775807 + 1");
    assert_runtime_error("-true");
}

#[test]
fn comparisons_and_logic() {
    assert_boolean("2 < 3", true);
    assert_boolean("3 > 2", true);
    assert_boolean("2 <= 2", true);
    assert_boolean("3 >= 4", false);
    assert_boolean("1 == 1", true);
    assert_boolean("1 != 1", false);
    assert_boolean("true == true", true);
    assert_boolean("true != false", true);
    assert_boolean("!true", false);
    assert_boolean("!0", true);
    assert_boolean("!5", false);
    assert_boolean("!!5", true);
}

#[test]
fn truthiness_selects_branches() {
    assert_integer("if (0) { 1 } else { 2 }", 2);
    assert_integer("if (1) { 10 }", 10);
    assert_integer("if (true) { 10 } else { 20 }", 10);
    assert_integer("if (\"\") { 1 } else { 2 }", 1); // every string is truthy
    assert_null("if (false) { 10 }");
}

#[test]
fn strings() {
    assert_string("\"foo\" + \"bar\"", "foobar");
    assert_string("let greeting = \"hello\"; greeting + \" \" + \"world\"", "hello world");
    assert_runtime_error("\"a\" - \"b\"");
    assert_runtime_error("\"a\" == \"b\"");
}

#[test]
fn let_bindings_and_identifiers() {
    assert_integer("let a = 5; a;", 5);
    assert_integer("let a = 5; let b = a; b;", 5);
    assert_integer("let a = 1; let a = a + 1; a", 2);
    assert_runtime_error("foobar");
}

#[test]
fn null_absorbs_infix_operands() {
    assert_null("if (false) { 1 } + 2");
}

#[test]
fn mismatched_operand_kinds_are_errors() {
    assert_runtime_error("5 + true");
    assert_runtime_error("5 == true");
}

#[test]
fn functions_and_calls() {
    assert_integer("let identity = fn(x) { x; }; identity(5);", 5);
    assert_integer("let double = fn(x) { x * 2; }; double(5);", 10);
    assert_integer("let add = fn(a, b) { a + b; }; add(3, add(4, 5));", 12);
    assert_integer("fn(x) { x }(5)", 5);
}

#[test]
fn call_errors() {
    assert_runtime_error("let f = fn(x) { x }; f(1, 2)");
    assert_runtime_error("let f = fn(x) { x }; f()");
    assert_runtime_error("5(1)");
    // An erroring argument stops the call before it happens.
    assert_runtime_error("let f = fn(x) { x }; f(1 / 0)");
}

#[test]
fn early_return_unwinds_nested_blocks() {
    assert_integer("let f = fn() { return 10; 20; }; f()", 10);
    assert_integer("let f = fn(x) { if (x) { return 1; } return 2; }; f(1)", 1);
    assert_integer("let f = fn(x) { if (x) { return 1; } return 2; }; f(0)", 2);
    assert_integer("let f = fn() { if (true) { if (true) { return 3; } } return 4; }; f()", 3);
    assert_integer("return 7; 8", 7);
}

#[test]
fn closures_capture_their_definition_environment() {
    assert_integer("let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);",
                   5);
    // The captured scope outlives the call that created it.
    assert_integer("let make = fn() { let x = 7; fn() { x } }; let g = make(); g()", 7);
}

#[test]
fn recursion() {
    assert_integer("let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } }; fact(10)",
                   3_628_800);
}

#[test]
fn while_loops() {
    assert_integer("let i = 0; let total = 0; while (i < 5) { let total = total + i; let i = i + 1; }; total",
                   10);
    assert_null("while (false) { 1 }");
    assert_integer("let f = fn() { while (true) { return 42; } }; f()", 42);
}

#[test]
fn arrays_and_indexing() {
    assert_eq!(eval("[1, 2 * 2, 3 + 3]"), ("ARRAY".to_string(), "[1, 4, 6]".to_string()));
    assert_integer("let a = [1, 2, 3]; a[0] + a[1] + a[2]", 6);
    assert_integer("[1, 2][1]", 2);
    assert_null("[1][5]");
    assert_null("[1][-1]");
    assert_runtime_error("5[0]");
    // An erroring element stops the literal.
    assert_runtime_error("[1, 2 / 0, 3]");
}

#[test]
fn array_builtins() {
    assert_integer("len(\"hello\")", 5);
    assert_integer("len([1, 2, 3])", 3);
    assert_integer("first([5, 6])", 5);
    assert_integer("last([5, 6])", 6);
    assert_null("first([])");
    assert_eq!(eval("rest([1, 2, 3])"), ("ARRAY".to_string(), "[2, 3]".to_string()));
    assert_eq!(eval("push([1], 2)"), ("ARRAY".to_string(), "[1, 2]".to_string()));
    // push is persistent; the original array is untouched.
    assert_integer("let a = [1]; let b = push(a, 2); len(a)", 1);
    assert_runtime_error("len(5)");
    assert_runtime_error("len()");
    assert_runtime_error("first(\"abc\")");
}

#[test]
fn garbage_collection_reclaims_dead_intermediates() {
    let mut session = Session::new();
    session.eval_source("let i = 0; let total = 0; while (i < 150) { let total = total + i; let i = i + 1; }")
           .expect("loop evaluates");

    // Several hundred statements allocated a value or two each; sweeps at
    // the statement threshold keep the heap near the bound names.
    let live_after_run = session.live_objects();
    assert!(live_after_run < 60,
            "expected dead intermediates to be reclaimed, {live_after_run} objects live");

    session.collect_garbage();
    // Six builtins plus the bindings `i` and `total`.
    assert!(session.live_objects() <= 10,
            "expected only reachable objects to survive, {} live",
            session.live_objects());

    // The survivors are intact after all that sweeping.
    let result = session.eval_source("total").expect("binding survives");
    assert_eq!(result.value, "11175");
}

#[test]
fn closures_survive_collection() {
    let mut session = Session::new();
    session.eval_source("let make = fn() { let secret = 99; fn() { secret } }; let get = make();")
           .expect("definition evaluates");

    session.collect_garbage();

    let result = session.eval_source("get()").expect("captured scope survives");
    assert_eq!(result.value, "99");
}

#[test]
fn repl_state_persists_across_lines() {
    let mut session = Session::new();
    session.eval_source("let x = 2").expect("binding");

    let result = session.eval_source("x * 3").expect("later line sees earlier binding");
    assert_eq!(result.value, "6");

    // A runtime error ends the line but not the session.
    assert!(session.eval_source("missing").is_err());
    let result = session.eval_source("x").expect("session still usable");
    assert_eq!(result.value, "2");
}

#[test]
fn evaluation_is_idempotent_across_sessions() {
    let source = "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(3);";

    let first = run_program(source).expect("first run");
    let second = run_program(source).expect("second run");

    assert_eq!(first.kind, second.kind);
    assert_eq!(first.value, second.value);
}

#[test]
fn result_rendering() {
    assert_eq!(eval("5").0, "INTEGER");
    assert_eq!(eval("true").0, "BOOLEAN");
    assert_eq!(eval("\"s\"").0, "STRING");
    assert_eq!(eval("fn(x) { x }").0, "FUNCTION");
    assert_eq!(eval("len").0, "BUILTIN");
    assert_null("let a = 1;");
}
