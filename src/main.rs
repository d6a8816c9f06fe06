// mal - A small Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use mal_core::{Env, MalVal, Symbol, eval, new_session, rep, set_max_eval_depth};

#[derive(Parser)]
#[command(name = "mal", version, about = "mal: a small Lisp with macros and tail calls")]
struct Cli {
    /// Script to run; starts a REPL when omitted
    file: Option<PathBuf>,

    /// Arguments bound to *ARGV* as strings
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,

    /// Evaluate an expression, print the result and exit
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Maximum nesting depth of non-tail evaluation
    #[arg(long, default_value_t = 10_000)]
    max_depth: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    run(cli)
}

fn run(cli: Cli) -> ExitCode {
    set_max_eval_depth(cli.max_depth);

    let env = match new_session() {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: failed to start session: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(expr) = &cli.eval {
        return match rep(expr, &env) {
            Ok(Some(output)) => {
                println!("{output}");
                ExitCode::SUCCESS
            }
            Ok(None) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if let Some(file) = &cli.file {
        return run_file(file, &cli.args, &env);
    }

    run_repl(&env);
    ExitCode::SUCCESS
}

/// Bind `*ARGV*` and evaluate `(load-file FILE)`.
fn run_file(file: &Path, args: &[String], env: &Env) -> ExitCode {
    let argv = MalVal::list(args.iter().map(MalVal::string));
    env.define(Symbol::new("*ARGV*"), argv);

    let path = file.to_string_lossy();
    debug!("load-file {}", path);
    let form = MalVal::list([MalVal::symbol("load-file"), MalVal::string(&path)]);
    match eval(&form, env) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error in {path}: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_repl(env: &Env) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Error: could not initialise line editor: {e}");
            return;
        }
    };

    loop {
        match rl.readline("user> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match rep(&line, env) {
                    Ok(Some(output)) => println!("{output}"),
                    Ok(None) => {}
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }
}
