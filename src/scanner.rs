use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::{Error, ScanError};
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

/// Turns source text into an ordered token sequence, terminated by a single
/// `EOF` token. Never panics: malformed input is reported through `ScanError`
/// and scanning continues to the next token.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec![],
            start: 0,
            current: 0,
            line: 1,
            column_offset: 0,
        }
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, Location::new(self.line, 0)));

        self.tokens
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.source.next();
        if next.is_some() {
            self.current += 1;
        }
        next
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(
            r#type,
            lexeme,
            literal,
            Location::new(self.line, self.start - self.column_offset),
        ));
    }

    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance().expect("caller already confirmed a character is available");
        self.add_token(r#type, c.to_string(), None);
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn string(&mut self) {
        self.advance(); // opening quote
        let start_location = Location::new(self.line, self.start - self.column_offset);

        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => break,
                Some(c) => {
                    self.advance();
                    if c == '\n' {
                        self.line += 1;
                        self.column_offset = self.current;
                    }
                    value.push(c);
                }
                None => {
                    ScanError { line: start_location.line, message: "Unterminated string.".to_string() }.throw();
                    return;
                }
            }
        }

        self.advance(); // closing quote
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    fn number(&mut self) {
        let mut value = String::new();

        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            value.push(c);
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            value.push('.');
            self.advance();

            while let Some(c) = self.peek().filter(char::is_ascii_digit) {
                value.push(c);
                self.advance();
            }
        }

        let number: f64 = value.parse().expect("scanned digits to form a valid number");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    fn identifier(&mut self) {
        let mut value = String::new();

        while let Some(c) = self.peek().filter(|c| c.is_alphanumeric() || *c == '_') {
            value.push(c);
            self.advance();
        }

        let token_type = match value.as_str() {
            "and" => Type::And,
            "class" => Type::Class,
            "else" => Type::Else,
            "false" => Type::False,
            "for" => Type::For,
            "fun" => Type::Fun,
            "if" => Type::If,
            "nil" => Type::Nil,
            "or" => Type::Or,
            "print" => Type::Print,
            "return" => Type::Return,
            "super" => Type::Super,
            "this" => Type::This,
            "true" => Type::True,
            "var" => Type::Var,
            "while" => Type::While,
            _ => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    fn scan_token(&mut self) {
        let Some(c) = self.peek() else { return };

        match c {
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),

            '!' => {
                self.advance();
                let r#type = if self.match_next('=') { Type::BangEqual } else { Type::Bang };
                let lexeme = if r#type == Type::BangEqual { "!=" } else { "!" };
                self.add_token(r#type, lexeme.to_string(), None);
            }
            '=' => {
                self.advance();
                let r#type = if self.match_next('=') { Type::EqualEqual } else { Type::Equal };
                let lexeme = if r#type == Type::EqualEqual { "==" } else { "=" };
                self.add_token(r#type, lexeme.to_string(), None);
            }
            '<' => {
                self.advance();
                let r#type = if self.match_next('=') { Type::LessEqual } else { Type::Less };
                let lexeme = if r#type == Type::LessEqual { "<=" } else { "<" };
                self.add_token(r#type, lexeme.to_string(), None);
            }
            '>' => {
                self.advance();
                let r#type = if self.match_next('=') { Type::GreaterEqual } else { Type::Greater };
                let lexeme = if r#type == Type::GreaterEqual { ">=" } else { ">" };
                self.add_token(r#type, lexeme.to_string(), None);
            }
            '/' => {
                self.advance();
                if self.match_next('/') {
                    while !matches!(self.peek(), Some('\n') | None) {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, "/".to_string(), None);
                }
            }

            ' ' | '\t' | '\r' => {
                self.advance();
            }

            '\n' => {
                self.advance();
                self.line += 1;
                self.column_offset = self.current;
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                ScanError { line: self.line, message: format!("Unexpected character '{c}'.") }.throw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        Scanner::new(source).scan_tokens()
    }

    #[test]
    fn empty_source_produces_one_eof_token() {
        let tokens = scan("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].r#type, Type::EOF);
    }

    #[test]
    fn scans_keywords_and_identifiers() {
        let tokens = scan("var nil_like = nil;");
        let types: Vec<Type> = tokens.iter().map(|t| t.r#type).collect();
        assert_eq!(types, vec![
            Type::Var, Type::Identifier, Type::Equal, Type::Nil, Type::Semicolon, Type::EOF,
        ]);
    }

    #[test]
    fn scans_number_literal() {
        let tokens = scan("3.25");
        assert_eq!(tokens[0].literal, Some(Literal::Number(3.25)));
    }

    #[test]
    fn multiline_string_advances_line_counter() {
        let tokens = scan("\"a\nb\" 1");
        assert_eq!(tokens[0].literal, Some(Literal::String("a\nb".to_string())));
        assert_eq!(tokens[1].location.line, 2);
    }
}
