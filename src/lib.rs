//! Lox is a tree-walk interpreter for the Lox scripting language. It is a dynamically typed
//! language with lexical scoping and first-class functions, classes and closures.
//!
//! ## Scanning
//! The first step in the interpreter is scanning, which converts a string of characters into a
//! list of tokens. The scanner is implemented in the [`scanner`](scanner) module as a one-shot
//! consumer of the source text. It reports syntax errors as a [`ScanError`](error::ScanError) and
//! continues scanning afterward, so a single run can surface more than one mistake.
//!
//! ## Parsing
//! The second step converts the token list into an abstract syntax tree. The parser is
//! implemented in the [`parser`](parser) module as a recursive descent parser producing
//! [`Expressions`](expr::Expr) (code that produces an [`Object`](object::Object)) and
//! [`Statements`](stmt::Stmt) (code that performs a side effect). The parser reports
//! [`ParseError`](error::ParseError)s and synchronizes to the next statement boundary so it, too,
//! can report more than one error per run.
//!
//! ## Resolving
//! The third step statically determines the scope of every variable reference ahead of
//! evaluation. The resolver is implemented in the [`resolver`](resolver) module as a tree-walk
//! over the already-built AST, reporting [`ResolveError`](error::ResolveError)s for mistakes that
//! are syntactically valid but semantically wrong, such as a class inheriting from itself.
//!
//! ## Interpreting
//! The final step evaluates the AST. The interpreter is implemented in the
//! [`interpreter`](interpreter) module and reports [`RuntimeError`](error::RuntimeError)s for
//! mistakes that can only be caught while running, such as adding a string and a class instance.
//! It manages the active [`Environment`](environment::Environment) chain and the call stack
//! implicitly, via Rust's own stack.

use std::fs;
use std::io::{self, Write};
use std::process;
use std::rc::Rc;

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

const HISTORY_FILE: &str = ".lox_history";

/// Owns one [`Interpreter`] across a file run or a REPL's lifetime, driving the
/// scan → parse → resolve → interpret pipeline and mapping its outcome to a process exit code.
pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new(output: Box<dyn Write>) -> Self {
        Session { interpreter: Interpreter::new(output) }
    }

    /// Reads `path`, runs it once, and exits the process: `65` on a static (scan/parse/resolve)
    /// error, `70` on a runtime error, `0` otherwise.
    pub fn run_file(&mut self, path: &str) {
        let contents = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Could not read file '{path}': {e}");
            process::exit(74);
        });

        self.run(&contents);

        if error::did_error() {
            process::exit(65);
        }
        if error::did_runtime_error() {
            process::exit(70);
        }
    }

    /// Drives an interactive REPL: each line is run against the same persistent interpreter and
    /// its result printed unless it is `Nil`. `exit`/`q` end the loop. History is best-effort and
    /// never a correctness requirement.
    pub fn run_prompt(&mut self) {
        let mut editor = rustyline::DefaultEditor::new().expect("terminal line editor to initialize");

        let history_path = home::home_dir().map(|home| home.join(HISTORY_FILE));
        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            let line = match editor.readline("> ") {
                Ok(line) => line,
                Err(_) => break,
            };

            let trimmed = line.trim();
            if trimmed == "exit" || trimmed == "q" {
                break;
            }

            let _ = editor.add_history_entry(&line);
            error::reset_error();

            let result = self.run(&line);
            if !error::had_any_error() && result != object::Object::from(literal::Literal::Nil) {
                println!("{result}");
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    /// Runs `source` as if it were the contents of a file: like `run_file`, but takes the
    /// program text directly instead of a path. Used by in-process integration tests.
    pub fn run_file_source(&mut self, source: &str) -> object::Object {
        self.run(source)
    }

    /// Runs one chunk of source through the full pipeline, short-circuiting on the first stage
    /// that reports an error. Returns the value of the last statement executed.
    fn run(&mut self, source: &str) -> object::Object {
        let tokens = Scanner::new(source).scan_tokens();
        if error::did_error() {
            return object::Object::from(literal::Literal::Nil);
        }

        let statements = Parser::new(tokens).parse();
        if error::did_error() {
            return object::Object::from(literal::Literal::Nil);
        }

        Resolver::new(&mut self.interpreter).resolve(&statements);
        if error::did_error() {
            return object::Object::from(literal::Literal::Nil);
        }

        self.interpreter.interpret(&statements)
    }

    /// Installs the test-only `log` builtin, appending every argument it is called with to `sink`.
    pub fn install_log(&mut self, sink: Rc<std::cell::RefCell<Vec<object::Object>>>) {
        self.interpreter.install_log(sink);
    }

    pub fn remove_log(&mut self) {
        self.interpreter.remove_log();
    }
}

/// Convenience for tests: a `Session` writing to an in-memory buffer instead of stdout.
pub fn new(output: Box<dyn Write>) -> Session {
    Session::new(output)
}

pub fn run_file(path: &str) {
    Session::new(Box::new(io::stdout())).run_file(path);
}

pub fn run_prompt() {
    Session::new(Box::new(io::stdout())).run_prompt();
}
