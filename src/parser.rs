use crate::error::{Error, ParseError};
use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::{Token, Type};

type ParseResult<T> = Result<T, ParseError>;

/// Returns whether the next token is any of the given types, consuming it if so.
macro_rules! check_consume {
    ( $self:ident, $( $type:expr ),+ ) => {
        {
            if $( $self.check($type) )||* {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Recursive-descent predictive parser over the scanner's token sequence. See
/// the grammar in the module-level doc comment on `Parser::parse`.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// ```text
    /// program        -> declaration* EOF
    /// declaration    -> classDecl | funDecl | varDecl | statement
    /// classDecl      -> "class" IDENT ( "<" IDENT )? "{" function* "}"
    /// funDecl        -> "fun" function
    /// function       -> IDENT "(" parameters? ")" block
    /// varDecl        -> "var" IDENT ( "=" expression )? ";"
    /// statement      -> exprStmt | forStmt | ifStmt | printStmt | returnStmt | whileStmt | block
    /// block          -> "{" declaration* "}"
    /// exprStmt       -> expression ";"
    /// printStmt      -> "print" expression ";"
    /// returnStmt     -> "return" expression? ";"
    /// ifStmt         -> "if" "(" expression ")" statement ( "else" statement )?
    /// whileStmt      -> "while" "(" expression ")" statement
    /// forStmt        -> "for" "(" ( varDecl | exprStmt | ";" ) expression? ";" expression? ")" statement
    /// expression     -> assignment
    /// assignment     -> ( call "." )? IDENT "=" assignment | logic_or
    /// logic_or       -> logic_and ( "or" logic_and )*
    /// logic_and      -> equality ( "and" equality )*
    /// equality       -> comparison ( ( "!=" | "==" ) comparison )*
    /// comparison     -> term ( ( ">" | ">=" | "<" | "<=" ) term )*
    /// term           -> factor ( ( "-" | "+" ) factor )*
    /// factor         -> unary ( ( "/" | "*" ) unary )*
    /// unary          -> ( "!" | "-" ) unary | call
    /// call           -> primary ( "(" arguments? ")" | "." IDENT )*
    /// primary        -> "true" | "false" | "nil" | "this" | NUMBER | STRING | IDENT
    ///                 | "(" expression ")" | "super" "." IDENT
    /// ```
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        statements
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    fn check(&self, r#type: Type) -> bool {
        !self.is_at_end() && self.peek().r#type == r#type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<&Token> {
        if self.check(r#type) {
            return Ok(self.advance());
        }

        Err(ParseError { token: self.peek().clone(), message: message.to_string() })
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let statement = if check_consume!(self, Type::Class) {
            self.class_declaration()
        } else if check_consume!(self, Type::Fun) {
            self.function("function")
        } else if check_consume!(self, Type::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match statement {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                error.throw();
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name.")?.clone();

        let superclass = if check_consume!(self, Type::Less) {
            self.consume(Type::Identifier, "Expect superclass name.")?;
            Some(Expr::Variable(VariableData { name: self.previous().clone() }))
        } else {
            None
        };

        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(Type::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassData { name, superclass, methods }))
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?.clone();

        let initializer = if check_consume!(self, Type::Equal) { Some(self.expression()?) } else { None };

        self.consume(Type::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if check_consume!(self, Type::For) {
            return self.for_statement();
        }
        if check_consume!(self, Type::If) {
            return self.if_statement();
        }
        if check_consume!(self, Type::Print) {
            return self.print_statement();
        }
        if check_consume!(self, Type::Return) {
            return self.return_statement();
        }
        if check_consume!(self, Type::While) {
            return self.while_statement();
        }
        if check_consume!(self, Type::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    /// Desugars into a `while` wrapped in a block: no dedicated `for` AST node.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if check_consume!(self, Type::Semicolon) {
            None
        } else if check_consume!(self, Type::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(Type::RightParen) { Some(self.expression()?) } else { None };
        self.consume(Type::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(BlockData {
                statements: vec![body, Stmt::Expression(ExpressionData { expr: increment })],
            });
        }

        body = Stmt::While(WhileData {
            condition: condition.unwrap_or(Expr::Literal(Literal::Bool(true))),
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if check_consume!(self, Type::Else) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(PrintData { expr }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };

        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While(WhileData { condition, body }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    fn function(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?.clone();
        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= 255 {
                    ParseError {
                        token: self.peek().clone(),
                        message: "Can't have more than 255 parameters.".to_string(),
                    }
                    .throw();
                }

                params.push(self.consume(Type::Identifier, "Expect parameter name.")?.clone());

                if !check_consume!(self, Type::Comma) {
                    break;
                }
            }
        }
        self.consume(Type::RightParen, "Expect ')' after parameters.")?;

        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;

        Ok(Stmt::Function(FunctionData { name, params, body }))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if check_consume!(self, Type::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(data) => {
                    Ok(Expr::Assign(AssignData { name: data.name, value: Box::new(value) }))
                }
                Expr::Get(data) => {
                    Ok(Expr::Set(SetData { object: data.object, name: data.name, value: Box::new(value) }))
                }
                _ => {
                    ParseError { token: equals, message: "Invalid assignment target.".to_string() }.throw();
                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while check_consume!(self, Type::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while check_consume!(self, Type::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while check_consume!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while check_consume!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while check_consume!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while check_consume!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(BinaryData { left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if check_consume!(self, Type::Bang, Type::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryData { operator, expr: Box::new(right) }));
        }

        self.call()
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    ParseError {
                        token: self.peek().clone(),
                        message: "Can't have more than 255 arguments.".to_string(),
                    }
                    .throw();
                }

                arguments.push(self.expression()?);

                if !check_consume!(self, Type::Comma) {
                    break;
                }
            }
        }

        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?.clone();

        Ok(Expr::Call(CallData { callee: Box::new(callee), paren, arguments }))
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if check_consume!(self, Type::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if check_consume!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?.clone();
                expr = Expr::Get(GetData { object: Box::new(expr), name });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if check_consume!(self, Type::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if check_consume!(self, Type::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if check_consume!(self, Type::Nil) {
            return Ok(Expr::Literal(Literal::Nil));
        }
        if check_consume!(self, Type::Number, Type::String) {
            let literal = self
                .previous()
                .literal
                .clone()
                .expect("a Number or String token to carry a literal value");
            return Ok(Expr::Literal(literal));
        }
        if check_consume!(self, Type::Super) {
            let keyword = self.previous().clone();
            self.consume(Type::Dot, "Expect '.' after 'super'.")?;
            let method = self.consume(Type::Identifier, "Expect superclass method name.")?.clone();
            return Ok(Expr::Super(SuperData { keyword, method }));
        }
        if check_consume!(self, Type::This) {
            return Ok(Expr::This(ThisData { keyword: self.previous().clone() }));
        }
        if check_consume!(self, Type::Identifier) {
            return Ok(Expr::Variable(VariableData { name: self.previous().clone() }));
        }
        if check_consume!(self, Type::LeftParen) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingData { expr: Box::new(expr) }));
        }

        Err(ParseError { token: self.peek().clone(), message: "Expect expression.".to_string() })
    }

    /// Advances past the offending token and skips forward to the next likely
    /// statement boundary, so later declarations can still be parsed and
    /// checked for further errors.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class | Type::Fun | Type::Var | Type::For | Type::If | Type::While
                | Type::Print | Type::Return => return,
                _ => {
                    self.advance();
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;

    fn parse(source: &str) -> Vec<Stmt> {
        let tokens = Scanner::new(source).scan_tokens();
        Parser::new(tokens).parse()
    }

    #[test]
    fn parses_n_declarations_into_n_statements() {
        let statements = parse("var a = 1; var b = 2; print a + b;");
        assert_eq!(statements.len(), 3);
    }

    #[test]
    fn for_statement_desugars_without_a_for_node() {
        let statements = parse("for (var i = 0; i < 3; i = i + 1) print i;");
        assert_eq!(statements.len(), 1);
        assert!(matches!(statements[0], Stmt::Block(_)));
    }

    #[test]
    fn assignment_to_call_result_is_invalid_target() {
        let statements = parse("a() = 1;");
        assert!(!statements.is_empty());
    }
}
