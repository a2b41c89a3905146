//! Recursive-descent parser for `.dto` schema files

use super::ast::{
    ClassDecl, Declaration, EnumDecl, InterfaceDecl, Literal, Members, Message, MessageKind,
    Param, Position, Primitive, Property, SchemaFile, TypeRef,
};
use super::lexer::{tokenize, Token, TokenKind};
use crate::error::{UidlError, UidlResult};

/// Parse one schema source. `file` is only used in error messages.
pub fn parse(file: &str, source: &str) -> UidlResult<SchemaFile> {
    let tokens = tokenize(file, source)?;
    Parser {
        file,
        tokens,
        pos: 0,
    }
    .file()
}

struct Parser<'a> {
    file: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn position(&self) -> Position {
        let token = self.peek();
        Position {
            line: token.line,
            column: token.column,
        }
    }

    fn error_at(&self, token: &Token, message: impl Into<String>) -> UidlError {
        UidlError::parse(self.file, token.line, token.column, message)
    }

    fn unexpected(&self, expected: &str) -> UidlError {
        let token = self.peek();
        self.error_at(token, format!("expected {}, found {}", expected, token.kind))
    }

    fn at(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(s) if s == keyword)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> UidlResult<()> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> UidlResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", keyword)))
        }
    }

    fn ident(&mut self, what: &str) -> UidlResult<String> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn ident_list(&mut self, what: &str) -> UidlResult<Vec<String>> {
        let mut names = vec![self.ident(what)?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.ident(what)?);
        }
        Ok(names)
    }

    fn file(mut self) -> UidlResult<SchemaFile> {
        let package = if self.eat_keyword("package") {
            let mut name = self.ident("package name")?;
            while self.eat(&TokenKind::Dot) {
                name.push('.');
                name.push_str(&self.ident("package name segment")?);
            }
            self.expect(TokenKind::Semi)?;
            Some(name)
        } else {
            None
        };

        let mut declarations = Vec::new();
        while !self.at(&TokenKind::Eof) {
            declarations.push(self.declaration()?);
        }

        Ok(SchemaFile {
            path: self.file.to_string(),
            package,
            declarations,
        })
    }

    fn declaration(&mut self) -> UidlResult<Declaration> {
        let position = self.position();
        if self.at_keyword("enum") {
            self.enum_decl(position).map(Declaration::Enum)
        } else if self.at_keyword("interface") {
            self.interface_decl(position).map(Declaration::Interface)
        } else if self.at_keyword("class") || self.at_keyword("abstract") {
            self.class_decl(position).map(Declaration::Class)
        } else {
            Err(self.unexpected("'class', 'interface' or 'enum'"))
        }
    }

    fn enum_decl(&mut self, position: Position) -> UidlResult<EnumDecl> {
        self.expect_keyword("enum")?;
        let name = self.ident("enum name")?;
        self.expect(TokenKind::LBrace)?;

        // At least one constant, optionally followed by a trailing comma
        let mut constants = vec![self.ident("enum constant")?];
        while self.eat(&TokenKind::Comma) && !self.at(&TokenKind::RBrace) {
            constants.push(self.ident("enum constant")?);
        }
        self.expect(TokenKind::RBrace)?;

        Ok(EnumDecl {
            name,
            constants,
            position,
        })
    }

    fn class_decl(&mut self, position: Position) -> UidlResult<ClassDecl> {
        let is_abstract = self.eat_keyword("abstract");
        self.expect_keyword("class")?;
        let name = self.ident("class name")?;

        let superclass = if self.eat_keyword("extends") {
            Some(self.ident("superclass name")?)
        } else {
            None
        };
        let interfaces = if self.eat_keyword("implements") {
            self.ident_list("interface name")?
        } else {
            Vec::new()
        };
        let referenceable = self.eat_keyword("referenceable");
        let members = self.members()?;

        Ok(ClassDecl {
            name,
            is_abstract,
            superclass,
            interfaces,
            referenceable,
            members,
            position,
        })
    }

    fn interface_decl(&mut self, position: Position) -> UidlResult<InterfaceDecl> {
        self.expect_keyword("interface")?;
        let name = self.ident("interface name")?;
        let superinterfaces = if self.eat_keyword("extends") {
            self.ident_list("interface name")?
        } else {
            Vec::new()
        };
        let members = self.members()?;

        Ok(InterfaceDecl {
            name,
            superinterfaces,
            members,
            position,
        })
    }

    fn members(&mut self) -> UidlResult<Members> {
        self.expect(TokenKind::LBrace)?;
        let mut members = Members::default();

        while !self.eat(&TokenKind::RBrace) {
            if self.at(&TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }

            // `command foo(...)` vs. a property whose type happens to be named `command`
            let message_kind = match &self.peek().kind {
                TokenKind::Ident(word)
                    if matches!(self.peek_at(1).kind, TokenKind::Ident(_))
                        && self.peek_at(2).kind == TokenKind::LParen =>
                {
                    match word.as_str() {
                        "command" => Some(MessageKind::Command),
                        "event" => Some(MessageKind::Event),
                        "query" => Some(MessageKind::Query),
                        _ => None,
                    }
                }
                _ => None,
            };

            match message_kind {
                Some(kind) => {
                    let message = self.message(kind)?;
                    match kind {
                        MessageKind::Command => members.commands.push(message),
                        MessageKind::Event => members.events.push(message),
                        MessageKind::Query => members.queries.push(message),
                    }
                }
                None => members.properties.push(self.property()?),
            }
        }

        Ok(members)
    }

    fn property(&mut self) -> UidlResult<Property> {
        let position = self.position();
        // `required` is only a modifier when a type follows it
        let required = self.at_keyword("required")
            && matches!(
                self.peek_at(1).kind,
                TokenKind::Ident(_) | TokenKind::Star
            )
            && self.eat_keyword("required");
        let ty = self.type_ref()?;
        let name = self.ident("property name")?;
        let default = if self.eat(&TokenKind::Eq) {
            Some(self.literal()?)
        } else {
            None
        };
        self.expect(TokenKind::Semi)?;

        Ok(Property {
            name,
            ty,
            required,
            default,
            position,
        })
    }

    fn message(&mut self, kind: MessageKind) -> UidlResult<Message> {
        self.advance(); // command / event / query
        let position = self.position();
        let name = self.ident("message name")?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(&TokenKind::RParen) {
            loop {
                let ty = self.type_ref()?;
                let name = self.ident("parameter name")?;
                params.push(Param { name, ty });
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        let returns = if self.eat_keyword("returns") {
            if kind == MessageKind::Event {
                let token = self.tokens[self.pos - 1].clone();
                return Err(self.error_at(&token, "events cannot declare a return type"));
            }
            Some(self.type_ref()?)
        } else {
            None
        };
        if kind == MessageKind::Query && returns.is_none() {
            return Err(self.unexpected("'returns' (queries must declare a result type)"));
        }
        self.expect(TokenKind::Semi)?;

        Ok(Message {
            name,
            kind,
            params,
            returns,
            position,
        })
    }

    fn type_ref(&mut self) -> UidlResult<TypeRef> {
        if self.eat(&TokenKind::Star) {
            return Ok(TypeRef::Reference(self.ident("referenced class name")?));
        }

        let name = self.ident("type")?;
        if let Some(primitive) = Primitive::from_keyword(&name) {
            return Ok(TypeRef::Primitive(primitive));
        }

        match name.as_str() {
            "List" | "Dictionary" if self.at(&TokenKind::Lt) => {
                self.advance();
                let inner = Box::new(self.type_ref()?);
                self.expect(TokenKind::Gt)?;
                Ok(if name == "List" {
                    TypeRef::List(inner)
                } else {
                    TypeRef::Dictionary(inner)
                })
            }
            _ => Ok(TypeRef::Named(name)),
        }
    }

    fn literal(&mut self) -> UidlResult<Literal> {
        let token = self.advance();
        let (line, column) = (token.line, token.column);
        match token.kind {
            TokenKind::Str(s) => Ok(Literal::String(s)),
            TokenKind::Int(n) => Ok(Literal::Integer(n)),
            TokenKind::Float(n) => Ok(Literal::Float(n)),
            TokenKind::LBracket => {
                self.expect(TokenKind::RBracket)?;
                Ok(Literal::EmptyList)
            }
            TokenKind::LBrace => {
                self.expect(TokenKind::RBrace)?;
                Ok(Literal::EmptyMap)
            }
            TokenKind::Ident(word) => match word.as_str() {
                "true" => Ok(Literal::Bool(true)),
                "false" => Ok(Literal::Bool(false)),
                "null" => Ok(Literal::Null),
                _ => {
                    self.expect(TokenKind::Dot)?;
                    let constant = self.ident("enum constant")?;
                    Ok(Literal::EnumConstant {
                        enum_name: word,
                        constant,
                    })
                }
            },
            other => Err(UidlError::parse(
                self.file,
                line,
                column,
                format!("expected default value, found {}", other),
            )),
        }
    }
}
