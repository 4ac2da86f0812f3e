use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use substring::Substring;

use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::Token;

/// A user-declared function or method. `closure` is the environment captured at
/// the point of declaration (or, for a bound method, a fresh environment wrapping
/// that closure with `this` defined) — not always the global environment.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(
        name: Token,
        params: Vec<Token>,
        body: Rc<Vec<Stmt>>,
        closure: Rc<RefCell<Environment>>,
        is_initializer: bool,
    ) -> Self {
        Function { name, params, body, closure, is_initializer }
    }

    /// Produces a copy of this function whose closure additionally binds `this`
    /// to `instance`. Used when a method is retrieved off an instance or via
    /// `super`.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    fn bound_this(&self) -> Result<Object, RuntimeError> {
        self.closure.borrow().get_at(0, &Token::from("this"))
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, argument) in self.params.iter().zip(arguments.into_iter()) {
            environment.define(&param.lexeme, argument);
        }

        let result = interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment)));

        match result {
            Ok(_) if self.is_initializer => self.bound_this(),
            Ok(_) => Ok(Object::from(Literal::Nil)),
            Err(Unwind::Return(_)) if self.is_initializer => self.bound_this(),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// A built-in, implemented as a (possibly closure-capturing) Rust function
/// rather than a bare function pointer, so that test instrumentation (`log`) can
/// close over state.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    arity: usize,
    function: Rc<dyn Fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>>,
}

impl NativeFunction {
    pub fn new(
        name: &str,
        arity: usize,
        function: Rc<dyn Fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>>,
    ) -> Self {
        NativeFunction { name: name.to_string(), arity, function }
    }

    /// The fixed built-ins every interpreter installs into the global
    /// environment: `clock`, `readString`, `subString`.
    pub fn globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction::new("clock", 0, Rc::new(|_, _| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("system clock before the epoch")
                    .as_millis();
                Ok(Object::from(now as f64))
            })),
            NativeFunction::new("readString", 0, Rc::new(|_, _| {
                use std::io::Read;

                let mut stdin = std::io::stdin().lock();
                let mut byte = [0u8; 1];
                let mut token = String::new();

                // Skip leading whitespace, then collect until the next whitespace or EOF.
                loop {
                    match stdin.read(&mut byte) {
                        Ok(0) => break,
                        Ok(_) if (byte[0] as char).is_whitespace() => {
                            if !token.is_empty() {
                                break;
                            }
                        }
                        Ok(_) => token.push(byte[0] as char),
                        Err(_) => break,
                    }
                }

                Ok(Object::from(token))
            })),
            NativeFunction::new("subString", 3, Rc::new(|_, arguments| {
                let Object::Literal(Literal::String(s)) = &arguments[0] else {
                    return Err(RuntimeError {
                        token: Token::from("subString"),
                        message: "First argument to subString must be a string.".to_string(),
                    });
                };
                let Object::Literal(Literal::Number(offset)) = &arguments[1] else {
                    return Err(RuntimeError {
                        token: Token::from("subString"),
                        message: "Second argument to subString must be a number.".to_string(),
                    });
                };
                let Object::Literal(Literal::Number(count)) = &arguments[2] else {
                    return Err(RuntimeError {
                        token: Token::from("subString"),
                        message: "Third argument to subString must be a number.".to_string(),
                    });
                };

                let offset = *offset as usize;
                let end = offset + (*count as usize);
                Ok(Object::from(s.substring(offset, end).to_string()))
            })),
        ]
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
