use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use quill::Session;
use tracing_subscriber::EnvFilter;

/// quill is a small, dynamically typed scripting language with first-class
/// functions, closures, and a garbage-collected runtime.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells quill to read the program from a file instead of the command
    /// line.
    #[arg(short, long)]
    file: bool,

    /// Prints the token stream instead of evaluating.
    #[arg(short, long)]
    tokens: bool,

    /// Prints the parsed syntax tree instead of evaluating.
    #[arg(short, long)]
    ast: bool,

    /// Program text, or a path when --file is given. Omit to start the
    /// interactive prompt.
    contents: Option<String>,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env())
                             .init();

    let args = Args::parse();

    let Some(contents) = args.contents else {
        repl();
        return;
    };

    let source = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
            std::process::exit(1);
        })
    } else {
        contents
    };

    if args.tokens {
        for (kind, literal) in quill::lex_tokens(&source) {
            println!("Type: {kind}, Literal: {literal}");
        }
        return;
    }

    if args.ast {
        match quill::parse(&source) {
            Ok(program) => println!("{program}"),
            Err(errors) => {
                for error in errors {
                    eprintln!("{error}");
                }
                std::process::exit(1);
            },
        }
        return;
    }

    match quill::run_program(&source) {
        Ok(result) => {
            println!("type:  {}", result.kind);
            println!("value: {}", result.value);
        },
        Err(error) => eprintln!("{error}"),
    }
}

/// Reads lines from standard input against one persistent session until
/// the stream closes.
fn repl() {
    const PROMPT: &str = ">> ";

    let mut session = Session::new();
    let stdin = io::stdin();

    loop {
        print!("{PROMPT}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        match session.eval_source(&line) {
            Ok(result) => {
                println!("type: {}", result.kind);
                println!("{}", result.value);
            },
            Err(error) => println!("{error}"),
        }
    }
}
