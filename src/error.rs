use crate::object::Object;
use crate::token::{Token, Type};

static mut HAD_ERROR: bool = false;
static mut HAD_RUNTIME_ERROR: bool = false;

/// Checks if a static (scan, parse or resolve) error occurred.
pub fn did_error() -> bool {
    unsafe { HAD_ERROR }
}

/// Checks if a runtime error occurred.
pub fn did_runtime_error() -> bool {
    unsafe { HAD_RUNTIME_ERROR }
}

/// Checks if any error occurred.
pub fn had_any_error() -> bool {
    unsafe { HAD_ERROR || HAD_RUNTIME_ERROR }
}

/// Resets both error flags. Used by the REPL before running each line.
pub fn reset_error() {
    unsafe {
        HAD_ERROR = false;
        HAD_RUNTIME_ERROR = false;
    }
}

/// Returns the `<WHERE>` clause of the `[line N] Error<WHERE>: <MESSAGE>` wire format.
fn where_clause(token: &Token) -> String {
    if token.r#type == Type::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

fn report(line: usize, where_clause: &str, message: &str) {
    eprintln!("[line {line}] Error{where_clause}: {message}");
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message and sets the appropriate error flag.
    fn throw(&self);
}

/// Raised while scanning: an unexpected character or an unterminated string/comment.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self) {
        report(self.line, "", &self.message);
        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// Raised while parsing: unexpected token, missing delimiter, invalid assignment target, etc.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self) {
        report(self.token.location.line, &where_clause(&self.token), &self.message);
        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// Raised while resolving: static scoping errors that the scanner/parser cannot catch.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self) {
        report(self.token.location.line, &where_clause(&self.token), &self.message);
        unsafe {
            HAD_ERROR = true;
        }
    }
}

/// Raised while interpreting: type mismatches, undefined names, bad calls, etc.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        report(self.token.location.line, &where_clause(&self.token), &self.message);
        unsafe {
            HAD_RUNTIME_ERROR = true;
        }
    }
}

/// The single non-local exit channel used by statement execution: a `return` unwinds through
/// `Unwind::Return` until the enclosing function-call frame catches it; a runtime error unwinds
/// through `Unwind::Error` until the top-level interpreter call site catches it. The two must
/// never be confused: only `Function::call` catches `Return`, only the top-level interpret loop
/// catches `Error`.
#[derive(Debug, Clone)]
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}
