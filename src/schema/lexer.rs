//! Tokenizer for `.dto` schema files
//!
//! Keywords are not distinguished here; the parser treats them as
//! contextual identifiers.

use crate::error::{UidlError, UidlResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Comma,
    Semi,
    Dot,
    Eq,
    Star,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => write!(f, "identifier '{}'", s),
            Self::Str(s) => write!(f, "string \"{}\"", s),
            Self::Int(n) => write!(f, "number {}", n),
            Self::Float(n) => write!(f, "number {}", n),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBracket => write!(f, "'['"),
            Self::RBracket => write!(f, "']'"),
            Self::Lt => write!(f, "'<'"),
            Self::Gt => write!(f, "'>'"),
            Self::Comma => write!(f, "','"),
            Self::Semi => write!(f, "';'"),
            Self::Dot => write!(f, "'.'"),
            Self::Eq => write!(f, "'='"),
            Self::Star => write!(f, "'*'"),
            Self::Eof => write!(f, "end of file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    file: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

/// Split a schema source into tokens, ending with a single `Eof`
pub fn tokenize(file: &str, source: &str) -> UidlResult<Vec<Token>> {
    let mut lexer = Lexer {
        file,
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
        column: 1,
    };

    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> UidlError {
        UidlError::parse(self.file, line, column, message)
    }

    fn skip_trivia(&mut self) -> UidlResult<()> {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_next()) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => {
                                return Err(self.error(line, column, "unterminated block comment"))
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn next_token(&mut self) -> UidlResult<Token> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);
        let token = |kind| Token { kind, line, column };

        let Some(c) = self.peek() else {
            return Ok(token(TokenKind::Eof));
        };

        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            '.' => TokenKind::Dot,
            '=' => TokenKind::Eq,
            '*' => TokenKind::Star,
            '"' => return self.string(line, column).map(token),
            c if c.is_ascii_digit() => return self.number(line, column).map(token),
            '-' if self.peek_next().is_some_and(|n| n.is_ascii_digit()) => {
                return self.number(line, column).map(token)
            }
            c if c.is_alphabetic() || c == '_' => return Ok(token(self.ident())),
            other => return Err(self.error(line, column, format!("unexpected character '{}'", other))),
        };
        self.bump();
        Ok(token(kind))
    }

    fn ident(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        TokenKind::Ident(text)
    }

    fn number(&mut self, line: usize, column: usize) -> UidlResult<TokenKind> {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else if c == '.' && !is_float && self.peek_next().is_some_and(|n| n.is_ascii_digit()) {
                is_float = true;
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if is_float {
            text.parse()
                .map(TokenKind::Float)
                .map_err(|_| self.error(line, column, format!("invalid number '{}'", text)))
        } else {
            text.parse()
                .map(TokenKind::Int)
                .map_err(|_| self.error(line, column, format!("integer out of range '{}'", text)))
        }
    }

    fn string(&mut self, line: usize, column: usize) -> UidlResult<TokenKind> {
        self.bump(); // opening quote
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(TokenKind::Str(text)),
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(other) => {
                        return Err(self.error(
                            self.line,
                            self.column - 1,
                            format!("unknown escape '\\{}'", other),
                        ))
                    }
                    None => break,
                },
                Some('\n') | None => break,
                Some(c) => text.push(c),
            }
        }
        Err(self.error(line, column, "unterminated string literal"))
    }
}
