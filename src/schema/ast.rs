//! Syntax tree for `.dto` schema files

use serde::Serialize;
use std::fmt;

/// 1-based source position of a declaration or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// One parsed schema file
#[derive(Debug, Clone)]
pub struct SchemaFile {
    /// Display path, relative to the source directory
    pub path: String,

    /// Optional `package a.b.c;` header
    pub package: Option<String>,

    pub declarations: Vec<Declaration>,
}

/// Top-level declaration
#[derive(Debug, Clone)]
pub enum Declaration {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Interface(i) => &i.name,
            Self::Enum(e) => &e.name,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            Self::Class(_) => DeclarationKind::Class,
            Self::Interface(_) => DeclarationKind::Interface,
            Self::Enum(_) => DeclarationKind::Enum,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Class(c) => c.position,
            Self::Interface(i) => i.position,
            Self::Enum(e) => e.position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
        };
        write!(f, "{}", name)
    }
}

/// `abstract? class Name extends Super implements A, B referenceable? { ... }`
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub is_abstract: bool,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub referenceable: bool,
    pub members: Members,
    pub position: Position,
}

/// `interface Name extends A, B { ... }`
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: String,
    pub superinterfaces: Vec<String>,
    pub members: Members,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub constants: Vec<String>,
    pub position: Position,
}

/// Body of a class or interface, in declaration order per member kind
#[derive(Debug, Clone, Default)]
pub struct Members {
    pub properties: Vec<Property>,
    pub commands: Vec<Message>,
    pub events: Vec<Message>,
    pub queries: Vec<Message>,
}

impl Members {
    /// All member names with their positions, properties first
    pub fn names(&self) -> impl Iterator<Item = (&str, Position)> {
        let props = self.properties.iter().map(|p| (p.name.as_str(), p.position));
        let msgs = self
            .commands
            .iter()
            .chain(&self.events)
            .chain(&self.queries)
            .map(|m| (m.name.as_str(), m.position));
        props.chain(msgs)
    }

    /// Every type mentioned by a property, parameter or return type
    pub fn types(&self) -> impl Iterator<Item = &TypeRef> {
        let props = self.properties.iter().map(|p| &p.ty);
        let msgs = self
            .commands
            .iter()
            .chain(&self.events)
            .chain(&self.queries)
            .flat_map(|m| m.params.iter().map(|p| &p.ty).chain(m.returns.as_ref()));
        props.chain(msgs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeRef,
    pub required: bool,
    pub default: Option<Literal>,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Command,
    Event,
    Query,
}

impl MessageKind {
    /// Suffix of the generated struct name
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Command => "Command",
            Self::Event => "Event",
            Self::Query => "Query",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Command => "command",
            Self::Event => "event",
            Self::Query => "query",
        };
        write!(f, "{}", name)
    }
}

/// A command, event or query declared inside a class or interface
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub name: String,
    pub kind: MessageKind,
    pub params: Vec<Param>,
    pub returns: Option<TypeRef>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Object,
}

impl Primitive {
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "boolean" => Some(Self::Boolean),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "String" => Some(Self::String),
            "Object" => Some(Self::Object),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "String",
            Self::Object => "Object",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(Primitive),
    /// A declared class, interface or enum
    Named(String),
    /// `*Name`: an id-only reference to a referenceable class instance
    Reference(String),
    List(Box<TypeRef>),
    /// String-keyed map
    Dictionary(Box<TypeRef>),
}

impl TypeRef {
    /// Declared type names this type depends on, with whether each is a `*` reference
    pub fn named_types(&self) -> Vec<(&str, bool)> {
        match self {
            Self::Primitive(_) => Vec::new(),
            Self::Named(name) => vec![(name.as_str(), false)],
            Self::Reference(name) => vec![(name.as_str(), true)],
            Self::List(inner) | Self::Dictionary(inner) => inner.named_types(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{}", p.keyword()),
            Self::Named(name) => write!(f, "{}", name),
            Self::Reference(name) => write!(f, "*{}", name),
            Self::List(inner) => write!(f, "List<{}>", inner),
            Self::Dictionary(inner) => write!(f, "Dictionary<{}>", inner),
        }
    }
}

/// Default value of a property
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    EnumConstant { enum_name: String, constant: String },
    EmptyList,
    EmptyMap,
}

impl Literal {
    /// Whether this literal is a valid default for a property of type `ty`
    pub fn fits(&self, ty: &TypeRef) -> bool {
        use Primitive as P;
        match (self, ty) {
            (Self::Null, _) => true,
            (_, TypeRef::Primitive(P::Object)) => !matches!(
                self,
                Self::EnumConstant { .. } | Self::EmptyList | Self::EmptyMap
            ),
            (Self::String(_), TypeRef::Primitive(P::String)) => true,
            (Self::Integer(_), TypeRef::Primitive(P::Int | P::Long | P::Float | P::Double)) => {
                true
            }
            (Self::Float(_), TypeRef::Primitive(P::Float | P::Double)) => true,
            (Self::Bool(_), TypeRef::Primitive(P::Boolean)) => true,
            (Self::EnumConstant { enum_name, .. }, TypeRef::Named(name)) => enum_name == name,
            (Self::EmptyList, TypeRef::List(_)) => true,
            (Self::EmptyMap, TypeRef::Dictionary(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{:?}", s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{:?}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Null => write!(f, "null"),
            Self::EnumConstant {
                enum_name,
                constant,
            } => write!(f, "{}.{}", enum_name, constant),
            Self::EmptyList => write!(f, "[]"),
            Self::EmptyMap => write!(f, "{{}}"),
        }
    }
}
