// Tarn - A tree-walking interpreter for the Tarn scripting language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Tarn Interpreter CLI
//!
//! Runs Tarn scripts, an interactive session, or a watch loop.

use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tarn::error::{print_report, print_runtime_report};
use tarn::runner::SourceWatcher;
use tarn::{ExprId, Interpreter};

/// Exit code for command line usage errors.
const EXIT_USAGE: u8 = 64;

/// Exit code for source text that fails to compile.
const EXIT_COMPILE_ERROR: u8 = 65;

/// Exit code for scripts that fail at runtime.
const EXIT_RUNTIME_ERROR: u8 = 70;

/// Exit code for unreadable input.
const EXIT_IO_ERROR: u8 = 74;

/// Source name shown in diagnostics for interactive input.
const REPL_SOURCE_NAME: &str = "<repl>";

/// Tarn - A tree-walking interpreter for the Tarn scripting language
#[derive(Parser, Debug)]
#[command(name = "tarn")]
#[command(author = "Tarn Team")]
#[command(version)]
#[command(about = "A tree-walking interpreter for the Tarn scripting language")]
#[command(long_about = r#"
Tarn runs scripts written in a small dynamically typed language with
first-class functions, closures, and classes with single inheritance.

Example usage:
  tarn hello.tarn

Start an interactive session:
  tarn

Watch mode, rerunning the script on every save:
  tarn game.tarn --watch
  tarn game.tarn -w
"#)]
struct Cli {
    /// Tarn script to run (.tarn). Starts an interactive session when omitted.
    script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Watch the script and rerun it on changes
    #[arg(short, long)]
    watch: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let code = match &cli.script {
        Some(script) => run_script(&cli, script),
        None if cli.watch => {
            eprintln!("Error: --watch requires a script file");
            EXIT_USAGE
        }
        None => run_repl(&cli),
    };

    ExitCode::from(code)
}

/// Run a script file, or keep rerunning it in watch mode.
fn run_script(cli: &Cli, script: &Path) -> u8 {
    if cli.verbose {
        println!("Tarn v{}", tarn::VERSION);
        println!("Script: {}", script.display());
        println!();
    }

    if cli.watch {
        return run_watch_loop(cli, script);
    }

    let source = match std::fs::read_to_string(script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", script.display(), e);
            return EXIT_IO_ERROR;
        }
    };

    let mut interpreter = Interpreter::new();
    execute(&mut interpreter, &source, &source_name(script), cli.verbose)
}

/// Compile and run one source text, printing every diagnostic.
fn execute(interpreter: &mut Interpreter, source: &str, name: &str, verbose: bool) -> u8 {
    // Tokenize, parse and resolve
    let program = match tarn::compile(source, interpreter.locals_mut()) {
        Ok(program) => program,
        Err(errors) => {
            for error in &errors {
                let _ = print_report(error, source, name);
            }
            return EXIT_COMPILE_ERROR;
        }
    };

    if verbose {
        println!("Resolved {} local references", interpreter.locals().len());
    }

    // Execute
    match interpreter.run(&program) {
        Ok(()) => 0,
        Err(e) => {
            let _ = print_runtime_report(&e, source, name);
            EXIT_RUNTIME_ERROR
        }
    }
}

/// Filename shown in diagnostics.
fn source_name(script: &Path) -> String {
    script
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<script>")
        .to_string()
}

/// Run the watch loop, rerunning the script after every save.
fn run_watch_loop(cli: &Cli, script: &Path) -> u8 {
    // First run before waiting for changes
    run_watched_script(cli, script);

    // Create file watcher
    let paths = vec![script.to_path_buf()];
    let watcher = match SourceWatcher::new(&paths) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: Failed to create file watcher: {}", e);
            return EXIT_IO_ERROR;
        }
    };

    println!();
    println!("Watching for changes... (Press Ctrl+C to stop)");

    // Watch loop
    loop {
        // Wait for file change
        if let Err(e) = watcher.wait_for_change() {
            eprintln!("Watch error: {}", e);
            continue;
        }

        println!();
        if cli.verbose {
            println!("Change detected, rerunning...");
        } else {
            println!("Rerunning...");
        }

        run_watched_script(cli, script);
        println!("Watching for changes...");
    }
}

/// One watch mode execution with a fresh interpreter.
fn run_watched_script(cli: &Cli, script: &Path) {
    let source = match std::fs::read_to_string(script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read {}: {}", script.display(), e);
            println!("Fix errors and save to retry.");
            return;
        }
    };

    let mut interpreter = Interpreter::new();
    if execute(&mut interpreter, &source, &source_name(script), cli.verbose) != 0 {
        println!("Fix errors and save to retry.");
    }
}

/// Read-eval-print loop on standard input.
///
/// Every line shares one interpreter, so variables, functions, and
/// classes persist between lines.
fn run_repl(cli: &Cli) -> u8 {
    println!("Tarn v{} interactive session", tarn::VERSION);
    println!("Press Ctrl+D to exit.");

    let mut interpreter = Interpreter::new();
    let mut next_id = ExprId::new(0);
    let mut line = String::new();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return EXIT_IO_ERROR;
        }

        line.clear();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                println!();
                return 0;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: Cannot read input: {}", e);
                return EXIT_IO_ERROR;
            }
        }

        let source = line.trim();
        if source.is_empty() {
            continue;
        }

        next_id = run_line(&mut interpreter, source, next_id, cli.verbose);
    }
}

/// Run one interactive line and hand back the next free expression id.
///
/// Diagnostics are printed and the session continues. Ids consumed by a
/// failed line are not handed out again: a partially resolved line may
/// already have recorded distances under them.
fn run_line(interpreter: &mut Interpreter, source: &str, first_id: ExprId, verbose: bool) -> ExprId {
    // Tokenize
    let tokens = match tarn::lexer::tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => {
            let _ = print_report(&e, source, REPL_SOURCE_NAME);
            return first_id;
        }
    };

    // Parse, keeping expression ids unique across lines
    let mut parser = tarn::parser::Parser::with_first_id(&tokens, first_id);
    let result = parser.parse();
    let next_id = parser.next_id();

    let program = match result {
        Ok(program) => program,
        Err(e) => {
            let _ = print_report(&e, source, REPL_SOURCE_NAME);
            return next_id;
        }
    };

    // Resolve into the shared distance table
    if let Err(errors) = tarn::resolver::resolve(&program, interpreter.locals_mut()) {
        for error in &errors {
            let _ = print_report(error, source, REPL_SOURCE_NAME);
        }
        return next_id;
    }

    if verbose {
        println!("Resolved {} local references", interpreter.locals().len());
    }

    // Execute
    if let Err(e) = interpreter.run(&program) {
        let _ = print_runtime_report(&e, source, REPL_SOURCE_NAME);
    }

    next_id
}
