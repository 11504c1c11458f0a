// teko - A dynamically scoped symbolic-expression language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use teko_core::{Env, eval_source, interpret, register_builtins, set_max_eval_depth};
use teko_parser::Parser;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line options.
struct Options {
    max_depth: Option<usize>,
    files: Vec<String>,
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --version flag
    if args.len() == 1 && (args[0] == "--version" || args[0] == "-v") {
        println!("Teko v{}", VERSION);
        return;
    }

    let options = match parse_args(args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Usage: teko [--max-depth <n>] [file...]");
            process::exit(2);
        }
    };

    if let Some(depth) = options.max_depth {
        let _ = set_max_eval_depth(depth);
    }

    let env = Env::new();
    if let Err(e) = register_builtins(&env) {
        eprintln!("Failed to register builtins: {}", e);
        process::exit(1);
    }

    // If files provided, evaluate them; otherwise start REPL
    if options.files.is_empty() {
        run_repl(&env);
    } else {
        run_files(&options.files, &env);
    }
}

/// Install a `tracing` subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn parse_args(args: Vec<String>) -> Result<Options, String> {
    let mut options = Options {
        max_depth: None,
        files: Vec::new(),
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--max-depth" {
            let value = args
                .next()
                .ok_or_else(|| "--max-depth requires a value".to_string())?;
            let depth = value
                .parse()
                .map_err(|_| format!("invalid --max-depth value '{}'", value))?;
            options.max_depth = Some(depth);
        } else {
            options.files.push(arg);
        }
    }
    Ok(options)
}

/// Evaluate source files in order against one environment
fn run_files(files: &[String], env: &Env) {
    for file_path in files {
        let source = match fs::read_to_string(file_path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error reading '{}': {}", file_path, e);
                process::exit(1);
            }
        };
        if let Err(e) = eval_source(&source, env) {
            eprintln!("Error in '{}': {}", file_path, e);
            process::exit(1);
        }
    }
}

/// Run the interactive REPL.
///
/// Lines are collected until every opening parenthesis is closed, then the
/// collected forms are evaluated and the last value printed.
fn run_repl(env: &Env) {
    println!("Teko v{}", VERSION);

    let mut pending = String::new();
    loop {
        print!("{}", if pending.is_empty() { "teko> " } else { "  ... " });
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => pending.push_str(&line),
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }

        let program = match Parser::parse_all_str(&pending) {
            Ok(program) => program,
            Err(e) if e.message.starts_with("Unmatched opening") => continue,
            Err(e) => {
                eprintln!("Parse error: {}", e);
                pending.clear();
                continue;
            }
        };
        pending.clear();
        if program.is_empty() {
            continue;
        }

        match interpret(&program, env) {
            Ok(value) => println!("{}", value),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
