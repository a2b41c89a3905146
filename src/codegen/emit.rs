//! Per-declaration emitters: classes, references, interfaces and enums

use super::types::RustTypes;
use super::writer::CodeWriter;
use crate::error::{UidlError, UidlResult};
use crate::model::naming::{field_ident, pascal_case, screaming_snake_case};
use crate::model::{DtoModel, OwnedMessage};
use crate::schema::{
    ClassDecl, DeclarationKind, EnumDecl, InterfaceDecl, Members, Message, Property,
};

/// File header shared by every generated module
pub fn header(w: &mut CodeWriter, source: Option<&str>) {
    match source {
        Some(file) => w.line(format!("// @generated by uidl from {}. Do not edit.", file)),
        None => w.line("// @generated by uidl. Do not edit."),
    };
}

fn preamble(w: &mut CodeWriter, source: Option<&str>) {
    header(w, source);
    w.line("#![allow(unused_imports)]");
    w.blank();
    w.line("use serde::{Deserialize, Serialize};");
    w.line("use std::collections::HashMap;");
    w.blank();
    w.line("use super::*;");
    w.blank();
}

/// The JSON key serde derives from a field identifier under `rename_all = "camelCase"`
fn serde_camel(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut out = String::with_capacity(ident.len());
    let mut upper = false;
    for c in ident.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn serde_attr(args: &[String]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(format!("#[serde({})]", args.join(", ")))
    }
}

/// `rename = "..."` when the camelCase derivation would not give back `name`
fn rename_arg(name: &str, ident: &str) -> Option<String> {
    (serde_camel(ident) != name).then(|| format!("rename = {:?}", name))
}

pub struct Emitter<'a> {
    model: &'a DtoModel,
    types: RustTypes<'a>,
}

/// Field of a generated struct
struct Field {
    name: String,
    ident: String,
    ty: String,
    required: bool,
    boxed: bool,
    default: Option<String>,
}

impl<'a> Emitter<'a> {
    pub fn new(model: &'a DtoModel) -> Self {
        Self {
            model,
            types: RustTypes::new(model),
        }
    }

    fn fields(&self, owner: &str, properties: &[Property]) -> UidlResult<Vec<Field>> {
        properties
            .iter()
            .map(|p| {
                let ty = self.types.field_type(owner, &p.ty)?;
                let default = match &p.default {
                    Some(literal) => self
                        .types
                        .default_expr(&p.ty, literal)?
                        .map(|expr| if ty.boxed { format!("Box::new({})", expr) } else { expr }),
                    None => None,
                };
                Ok(Field {
                    name: p.name.clone(),
                    ident: field_ident(&p.name),
                    ty: ty.spelled(),
                    required: p.required,
                    boxed: ty.boxed,
                    default,
                })
            })
            .collect()
    }

    fn default_fn(field: &Field) -> String {
        format!("default_{}", field.ident.trim_start_matches("r#"))
    }

    /// Module for one class: struct, constructor, builders, interface
    /// impls and the class's own messages
    pub fn class(&self, class: &ClassDecl) -> UidlResult<String> {
        let mut w = CodeWriter::new();
        preamble(&mut w, self.model.file_of(&class.name));

        let fields = self.fields(&class.name, &self.model.all_properties(&class.name)?)?;
        let name = &class.name;

        let mut doc = format!("`{}`", name);
        if let Some(parent) = &class.superclass {
            doc.push_str(&format!(", extends [`{}`]", parent));
        }
        w.doc(doc);
        if class.is_abstract {
            w.doc("");
            w.doc("Abstract in the schema: fields of this type are carried as JSON.");
        }
        w.line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]");
        w.line("#[serde(rename_all = \"camelCase\")]");
        w.open(format!("pub struct {}", name));
        for field in &fields {
            let mut args: Vec<String> = rename_arg(&field.name, &field.ident).into_iter().collect();
            if field.required {
                if let Some(attr) = serde_attr(&args) {
                    w.line(attr);
                }
                w.line(format!("pub {}: {},", field.ident, field.ty));
            } else {
                match &field.default {
                    Some(_) => args.push(format!("default = \"{}::{}\"", name, Self::default_fn(field))),
                    None => args.push("default".to_string()),
                }
                args.push("skip_serializing_if = \"Option::is_none\"".to_string());
                if let Some(attr) = serde_attr(&args) {
                    w.line(attr);
                }
                w.line(format!("pub {}: Option<{}>,", field.ident, field.ty));
            }
        }
        w.close();
        w.blank();

        w.open(format!("impl {}", name));
        w.line(format!("pub const TYPE_ID: &'static str = {:?};", name));
        w.blank();

        let params: Vec<String> = fields
            .iter()
            .filter(|f| f.required)
            .map(|f| format!("{}: {}", f.ident, f.ty))
            .collect();
        w.open(format!("pub fn new({}) -> Self", params.join(", ")));
        w.open("Self");
        for field in &fields {
            if field.required {
                w.line(format!("{},", field.ident));
            } else if field.default.is_some() {
                w.line(format!("{}: Self::{}(),", field.ident, Self::default_fn(field)));
            } else {
                w.line(format!("{}: None,", field.ident));
            }
        }
        w.close();
        w.close();

        for field in &fields {
            let setter = field.ident.trim_start_matches("r#");
            w.blank();
            w.open(format!(
                "pub fn with_{}(mut self, {}: {}) -> Self",
                setter, field.ident, field.ty
            ));
            if field.required {
                w.line(format!("self.{0} = {0};", field.ident));
            } else {
                w.line(format!("self.{0} = Some({0});", field.ident));
            }
            w.line("self");
            w.close();
        }

        for field in fields.iter().filter(|f| !f.required) {
            if let Some(expr) = &field.default {
                w.blank();
                w.open(format!(
                    "fn {}() -> Option<{}>",
                    Self::default_fn(field),
                    field.ty
                ));
                w.line(format!("Some({})", expr));
                w.close();
            }
        }
        w.close();

        for interface in self.model.all_interfaces(&class.name) {
            w.blank();
            self.interface_impl(&mut w, class, interface, &fields)?;
        }

        self.messages(&mut w, &class.name, DeclarationKind::Class, &class.members);
        Ok(w.finish())
    }

    fn interface_impl(
        &self,
        w: &mut CodeWriter,
        class: &ClassDecl,
        interface: &InterfaceDecl,
        fields: &[Field],
    ) -> UidlResult<()> {
        w.open(format!("impl {} for {}", interface.name, class.name));
        for (i, property) in interface.members.properties.iter().enumerate() {
            let mismatch = |reason: String| UidlError::InvalidSupertype {
                owner: class.name.clone(),
                relation: "implement",
                target: interface.name.clone(),
                reason,
            };
            let field = fields
                .iter()
                .find(|f| f.name == property.name)
                .ok_or_else(|| mismatch(format!("property {} is missing", property.name)))?;
            let ty = self.types.rust_type(&property.ty);
            if field.ty != ty && field.ty != format!("Box<{}>", ty) {
                return Err(mismatch(format!(
                    "property {} has type {} in {}",
                    property.name, property.ty, class.name
                )));
            }

            if i > 0 {
                w.blank();
            }
            let ident = &field.ident;
            match (property.required, field.required) {
                (true, true) => {
                    w.open(format!("fn {}(&self) -> &{}", ident, ty));
                    w.line(format!("&self.{}", ident));
                }
                (false, true) => {
                    w.open(format!("fn {}(&self) -> Option<&{}>", ident, ty));
                    w.line(format!("Some(&self.{})", ident));
                }
                (false, false) => {
                    w.open(format!("fn {}(&self) -> Option<&{}>", ident, ty));
                    if field.boxed {
                        w.line(format!("self.{}.as_deref()", ident));
                    } else {
                        w.line(format!("self.{}.as_ref()", ident));
                    }
                }
                (true, false) => {
                    return Err(mismatch(format!(
                        "property {} is required by {} but optional in {}",
                        property.name, interface.name, class.name
                    )))
                }
            }
            w.close();
        }
        w.close();
        Ok(())
    }

    /// `…Reference` struct for a referenceable base class
    pub fn reference(&self, class: &ClassDecl) -> String {
        let mut w = CodeWriter::new();
        preamble(&mut w, self.model.file_of(&class.name));

        let name = format!("{}Reference", class.name);
        w.doc(format!(
            "Identifies a [`{}`] instance, or one of a subclass, by id",
            class.name
        ));
        w.line("#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]");
        w.line("#[serde(transparent)]");
        w.open(format!("pub struct {}", name));
        w.line("pub id: String,");
        w.close();
        w.blank();
        w.open(format!("impl {}", name));
        w.open("pub fn new(id: impl Into<String>) -> Self");
        w.line("Self { id: id.into() }");
        w.close();
        w.close();
        w.blank();
        w.open(format!("impl From<&str> for {}", name));
        w.open("fn from(id: &str) -> Self");
        w.line("Self::new(id)");
        w.close();
        w.close();
        w.finish()
    }

    /// Accessor trait for an interface plus the interface's own messages
    pub fn interface(&self, interface: &InterfaceDecl) -> UidlResult<String> {
        let mut w = CodeWriter::new();
        preamble(&mut w, self.model.file_of(&interface.name));

        w.doc(format!("`{}`", interface.name));
        if interface.superinterfaces.is_empty() {
            w.open(format!("pub trait {}", interface.name));
        } else {
            w.open(format!(
                "pub trait {}: {}",
                interface.name,
                interface.superinterfaces.join(" + ")
            ));
        }
        for property in &interface.members.properties {
            let ident = field_ident(&property.name);
            let ty = self.types.rust_type(&property.ty);
            if property.required {
                w.line(format!("fn {}(&self) -> &{};", ident, ty));
            } else {
                w.line(format!("fn {}(&self) -> Option<&{}>;", ident, ty));
            }
        }
        w.close();

        self.messages(
            &mut w,
            &interface.name,
            DeclarationKind::Interface,
            &interface.members,
        );
        Ok(w.finish())
    }

    fn messages(
        &self,
        w: &mut CodeWriter,
        owner: &str,
        owner_kind: DeclarationKind,
        members: &Members,
    ) {
        let all = members
            .commands
            .iter()
            .chain(&members.events)
            .chain(&members.queries);
        for message in all {
            w.blank();
            self.message(
                w,
                OwnedMessage {
                    owner,
                    owner_kind,
                    message,
                },
            );
        }
    }

    fn message(&self, w: &mut CodeWriter, owned: OwnedMessage<'_>) {
        let message: &Message = owned.message;
        let name = owned.struct_name();
        let params: Vec<(String, String, &str)> = message
            .params
            .iter()
            .map(|p| (field_ident(&p.name), self.types.rust_type(&p.ty), p.name.as_str()))
            .collect();

        let signature = message
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        let mut doc = format!("`{} {}({})`", message.kind, message.name, signature);
        if let Some(returns) = &message.returns {
            doc.push_str(&format!(" returns `{}`", returns));
        }
        w.doc(doc);
        w.line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]");
        w.line("#[serde(rename_all = \"camelCase\")]");
        w.open(format!("pub struct {}", name));
        for (ident, ty, original) in &params {
            if let Some(attr) = rename_arg(original, ident).map(|a| format!("#[serde({})]", a)) {
                w.line(attr);
            }
            w.line(format!("pub {}: {},", ident, ty));
        }
        w.close();
        w.blank();

        w.open(format!("impl {}", name));
        w.line(format!("pub const TYPE_ID: &'static str = {:?};", owned.type_id()));
        w.blank();
        let args: Vec<String> = params
            .iter()
            .map(|(ident, ty, _)| format!("{}: {}", ident, ty))
            .collect();
        w.open(format!("pub fn new({}) -> Self", args.join(", ")));
        if params.is_empty() {
            w.line("Self {}");
        } else {
            let idents: Vec<&str> = params.iter().map(|(i, _, _)| i.as_str()).collect();
            w.line(format!("Self {{ {} }}", idents.join(", ")));
        }
        w.close();
        w.close();

        if let Some(returns) = &message.returns {
            w.blank();
            w.doc(format!("Result of [`{}`]", name));
            w.line(format!(
                "pub type {}Result = {};",
                name,
                self.types.rust_type(returns)
            ));
        }
    }

    /// Enum with SCREAMING_SNAKE wire names
    pub fn enumeration(&self, decl: &EnumDecl) -> String {
        let mut w = CodeWriter::new();
        preamble(&mut w, self.model.file_of(&decl.name));

        let variants: Vec<(String, String)> = decl
            .constants
            .iter()
            .map(|c| (pascal_case(c), screaming_snake_case(c)))
            .collect();

        w.doc(format!("`{}`", decl.name));
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]");
        w.open(format!("pub enum {}", decl.name));
        for (variant, wire) in &variants {
            w.line(format!("#[serde(rename = {:?})]", wire));
            w.line(format!("{},", variant));
        }
        w.close();
        w.blank();

        w.open(format!("impl {}", decl.name));
        let all: Vec<String> = variants
            .iter()
            .map(|(v, _)| format!("Self::{}", v))
            .collect();
        w.line(format!("pub const ALL: &'static [Self] = &[{}];", all.join(", ")));
        w.blank();
        w.open("pub fn as_str(&self) -> &'static str");
        w.open("match *self");
        for (variant, wire) in &variants {
            w.line(format!("Self::{} => {:?},", variant, wire));
        }
        w.close();
        w.close();
        w.close();
        w.finish()
    }
}
