use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::{Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Walks a resolved AST, executing statements and evaluating expressions
/// against a current `Environment`. Output goes through an injectable sink
/// rather than directly to `stdout`, so the same interpreter can back both the
/// CLI and in-process tests.
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
    output: Box<dyn Write>,
}

fn nil() -> Object {
    Object::from(Literal::Nil)
}

fn operand_must_be_number(operator: &Token) -> RuntimeError {
    RuntimeError { token: operator.clone(), message: "Operand must be a number.".to_string() }
}

impl Interpreter {
    pub fn new(output: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        for native in NativeFunction::globals() {
            let name = native.name.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter { environment: Rc::clone(&globals), globals, locals: HashMap::new(), output }
    }

    /// Records that `name` (a specific `Variable`/`Assign`/`This`/`Super`
    /// occurrence) resolves `depth` environments above wherever it is
    /// evaluated. Called by the resolver, never by the interpreter itself.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    /// Installs a one-argument native `log` builtin that appends its argument
    /// to `sink` and returns `Nil`. Test-only instrumentation; never installed
    /// by the CLI driver.
    pub fn install_log(&mut self, sink: Rc<RefCell<Vec<Object>>>) {
        let native = NativeFunction::new("log", 1, Rc::new(move |_, mut arguments| {
            sink.borrow_mut().push(arguments.remove(0));
            Ok(nil())
        }));
        self.globals.borrow_mut().define("log", Object::from(native));
    }

    pub fn remove_log(&mut self) {
        self.globals.borrow_mut().undefine("log");
    }

    /// Runs a whole program, short-circuiting on the first runtime error (which
    /// is reported through the error channel, not returned). Yields the value
    /// of the last statement executed, per the REPL/top-level result contract.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Object {
        let mut result = nil();

        for statement in statements {
            match self.execute(statement) {
                Ok(value) => result = value,
                Err(Unwind::Error(error)) => {
                    error.throw();
                    break;
                }
                Err(Unwind::Return(value)) => {
                    // Only reachable if a prior stage failed to reject a
                    // top-level `return`; treat it as ending the program.
                    result = value;
                    break;
                }
            }
        }

        result
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    /// Executes `statements` against `environment`, restoring the previous
    /// environment afterward regardless of how execution ended. Shared by
    /// block statements and function/method invocation.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<Object, Unwind> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(nil());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn lookup_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(name) {
            Some(&depth) => self.environment.borrow().get_at(depth, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn check_arity(&self, expected: usize, got: usize, paren: &Token) -> Result<(), RuntimeError> {
        if expected == got {
            Ok(())
        } else {
            Err(RuntimeError {
                token: paren.clone(),
                message: format!("Expected {expected} arguments but got {got}."),
            })
        }
    }
}

impl ExprVisitor<Result<Object, RuntimeError>> for Interpreter {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Literal(literal) = expr else { unreachable!() };
        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Grouping(data) = expr else { unreachable!() };
        self.evaluate(&data.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Unary(data) = expr else { unreachable!() };
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| operand_must_be_number(&data.operator)),
            Type::Bang => Ok(Object::from(Literal::Bool(!right.truthy()))),
            _ => unreachable!("parser only emits Minus/Bang as unary operators"),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Binary(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let operator = &data.operator;

        match operator.r#type {
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }),
            Type::Minus => (left - right).ok_or_else(|| operand_must_be_number(operator)),
            Type::Star => (left * right).ok_or_else(|| operand_must_be_number(operator)),
            Type::Slash => (left / right).ok_or_else(|| operand_must_be_number(operator)),
            Type::Greater => compare(&left, &right, operator, |o| o.is_gt()),
            Type::GreaterEqual => compare(&left, &right, operator, |o| o.is_ge()),
            Type::Less => compare(&left, &right, operator, |o| o.is_lt()),
            Type::LessEqual => compare(&left, &right, operator, |o| o.is_le()),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!("parser only emits comparison/arithmetic/equality operators as binary"),
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Logical(data) = expr else { unreachable!() };
        let left = self.evaluate(&data.left)?;

        match data.operator.r#type {
            Type::Or if left.truthy() => Ok(left),
            Type::And if !left.truthy() => Ok(left),
            Type::Or | Type::And => self.evaluate(&data.right),
            _ => unreachable!("parser only emits Or/And as logical operators"),
        }
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Variable(data) = expr else { unreachable!() };
        self.lookup_variable(&data.name)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Assign(data) = expr else { unreachable!() };
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.name) {
            Some(&depth) => self.environment.borrow_mut().assign_at(depth, &data.name, value.clone())?,
            None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Call(data) = expr else { unreachable!() };
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        match &callee {
            Object::Function(function) => {
                self.check_arity(function.arity(), arguments.len(), &data.paren)?;
                function.call(self, arguments)
            }
            Object::NativeFunction(function) => {
                self.check_arity(function.arity(), arguments.len(), &data.paren)?;
                function.call(self, arguments)
            }
            Object::Class(class) => {
                let arity = class.borrow().arity();
                self.check_arity(arity, arguments.len(), &data.paren)?;
                Class::instantiate(class, self, arguments)
            }
            _ => Err(RuntimeError {
                token: data.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        }
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Get(data) = expr else { unreachable!() };
        let object = self.evaluate(&data.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&data.name, &object),
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Set(data) = expr else { unreachable!() };
        let object = self.evaluate(&data.object)?;

        let Object::Instance(instance) = &object else {
            return Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };

        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::This(data) = expr else { unreachable!() };
        self.lookup_variable(&data.keyword)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Super(data) = expr else { unreachable!() };

        let distance = *self
            .locals
            .get(&data.keyword)
            .expect("resolver always records a depth for 'super'");

        let superclass = self.environment.borrow().get_at(distance, &data.keyword)?;
        let Object::Class(superclass) = superclass else {
            unreachable!("resolver guarantees 'super' always binds to a Class")
        };

        // `this` is defined one scope nearer than `super` (see resolver::visit_class_stmt).
        let this_token = Token::from("this");
        let instance = self.environment.borrow().get_at(distance - 1, &this_token)?;

        let method = superclass.borrow().find_method(&data.method.lexeme).ok_or_else(|| RuntimeError {
            token: data.method.clone(),
            message: format!("Undefined property '{}'.", data.method.lexeme),
        })?;

        Ok(Object::Function(Rc::new(method.bind(instance))))
    }
}

fn compare(
    left: &Object,
    right: &Object,
    operator: &Token,
    holds: impl Fn(std::cmp::Ordering) -> bool,
) -> Result<Object, RuntimeError> {
    left.partial_cmp(right).map(holds).map(Object::from).ok_or_else(|| operand_must_be_number(operator))
}

impl StmtVisitor<Result<Object, Unwind>> for Interpreter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::Expression(data) = stmt else { unreachable!() };
        Ok(self.evaluate(&data.expr)?)
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::Print(data) = stmt else { unreachable!() };
        let value = self.evaluate(&data.expr)?;
        let _ = writeln!(self.output, "{value}");
        Ok(nil())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => nil(),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(nil())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::Block(data) = stmt else { unreachable!() };
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(nil())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::While(data) = stmt else { unreachable!() };

        let mut result = nil();
        while self.evaluate(&data.condition)?.truthy() {
            result = self.execute(&data.body)?;
        }
        Ok(result)
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(
            data.name.clone(),
            data.params.clone(),
            Rc::new(data.body.clone()),
            Rc::clone(&self.environment),
            false,
        );

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(nil())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => nil(),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Result<Object, Unwind> {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(superclass_expr) => {
                let value = self.evaluate(superclass_expr)?;
                let Object::Class(class) = value else {
                    let Expr::Variable(variable) = superclass_expr else { unreachable!() };
                    return Err(Unwind::Error(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    }));
                };
                Some(class)
            }
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, nil());

        let enclosing_environment = superclass.as_ref().map(|superclass| {
            let mut scope = Environment::new(Some(Rc::clone(&self.environment)));
            scope.define("super", Object::Class(Rc::clone(superclass)));
            std::mem::replace(&mut self.environment, Rc::new(RefCell::new(scope)))
        });

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function_data) = method else { unreachable!() };
            let is_initializer = function_data.name.lexeme == "init";

            let function = Function::new(
                function_data.name.clone(),
                function_data.params.clone(),
                Rc::new(function_data.body.clone()),
                Rc::clone(&self.environment),
                is_initializer,
            );
            methods.insert(function_data.name.lexeme.clone(), Rc::new(function));
        }

        let class = Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods)));

        if let Some(previous) = enclosing_environment {
            self.environment = previous;
        }

        self.environment.borrow_mut().assign(&data.name, Object::Class(class))?;
        Ok(nil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn run(source: &str) -> Object {
        let tokens = Scanner::new(source).scan_tokens();
        let statements = Parser::new(tokens).parse();

        let mut interpreter = Interpreter::new(Box::new(Vec::new()));
        Resolver::new(&mut interpreter).resolve(&statements);
        interpreter.interpret(&statements)
    }

    #[test]
    fn empty_source_yields_nil() {
        assert_eq!(run(""), Object::from(Literal::Nil));
    }

    #[test]
    fn last_statement_value_is_the_program_result() {
        assert_eq!(run("5.0;4.0;3.0;"), Object::from(3.0));
    }

    #[test]
    fn assignment_yields_assigned_value() {
        assert_eq!(run("var v; v = true; v;"), Object::from(true));
    }

    #[test]
    fn recursive_fibonacci() {
        let source = "fun fib(n){ if(n==0) return 0; else if(n==1) return 1; \
                       return fib(n-2)+fib(n-1); } fib(10);";
        assert_eq!(run(source), Object::from(55.0));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let source = "var a=\"global\"; var r; { fun g(){ return a; } var a=\"local\"; r=g(); } r;";
        assert_eq!(run(source), Object::from("global"));
    }

    #[test]
    fn fields_are_created_on_first_assignment() {
        assert_eq!(run("class T{} var t=T(); t.p=3; t.p;"), Object::from(3.0));
    }

    #[test]
    fn initializer_runs_on_instantiation() {
        let source = "class T{ init(n){ this.n=n; } get(){ return this.n; } } T(5).get();";
        assert_eq!(run(source), Object::from(5.0));
    }

    #[test]
    fn super_calls_the_overridden_method() {
        let source = "class Super{ m(){return 10;} } class Sub<Super{ m(){return super.m()-10;} } Sub().m();";
        assert_eq!(run(source), Object::from(0.0));
    }

    #[test]
    fn division_by_zero_yields_infinity_not_an_error() {
        assert_eq!(run("1/0;"), Object::from(f64::INFINITY));
    }

    #[test]
    fn string_concatenation_stringifies_a_number_operand() {
        assert_eq!(run("\"a\" + 1;"), Object::from("a1.0"));
    }

    #[test]
    fn zero_and_negative_zero_are_equal() {
        assert_eq!(run("0 == -0;"), Object::from(true));
    }

    #[test]
    fn a_method_retrieved_as_a_value_keeps_its_binding() {
        let source = "class C{ greet(){ return this.name; } } var c=C(); c.name=\"x\"; \
                       var m=c.greet; m();";
        assert_eq!(run(source), Object::from("x"));
    }
}
