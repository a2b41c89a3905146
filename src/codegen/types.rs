//! Mapping of schema types and default literals onto Rust

use crate::error::{UidlError, UidlResult};
use crate::model::naming::pascal_case;
use crate::model::DtoModel;
use crate::schema::{DeclarationKind, Literal, Primitive, TypeRef};
use std::collections::HashSet;

/// Type resolver bound to one model
#[derive(Debug, Clone, Copy)]
pub struct RustTypes<'a> {
    model: &'a DtoModel,
}

impl<'a> RustTypes<'a> {
    pub fn new(model: &'a DtoModel) -> Self {
        Self { model }
    }

    /// Interfaces and abstract classes have no single concrete struct;
    /// values of those types stay JSON.
    pub fn is_polymorphic(&self, name: &str) -> bool {
        match self.model.kind_of(name) {
            Some(DeclarationKind::Interface) => true,
            Some(DeclarationKind::Class) => self.model.class(name).is_some_and(|c| c.is_abstract),
            _ => false,
        }
    }

    /// Rust spelling of `ty`
    pub fn rust_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(p) => primitive(*p).to_string(),
            TypeRef::Named(name) if self.is_polymorphic(name) => "serde_json::Value".to_string(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::Reference(name) => self.reference_type(name),
            TypeRef::List(inner) => format!("Vec<{}>", self.rust_type(inner)),
            TypeRef::Dictionary(inner) => format!("HashMap<String, {}>", self.rust_type(inner)),
        }
    }

    /// Name of the `…Reference` struct used for `*name`
    pub fn reference_type(&self, name: &str) -> String {
        let base = self
            .model
            .class(name)
            .and_then(|c| self.model.referenceable_base(c))
            .map_or(name, |c| c.name.as_str());
        format!("{}Reference", base)
    }

    /// Type of a struct field holding `ty` inside `owner`, boxed when the
    /// field would otherwise make `owner` infinitely sized
    pub fn field_type(&self, owner: &str, ty: &TypeRef) -> UidlResult<FieldType> {
        let rust = self.rust_type(ty);
        let boxed = match ty {
            TypeRef::Named(name) if self.model.class(name).is_some() && !self.is_polymorphic(name) => {
                self.contains_directly(name, owner, &mut HashSet::new())?
            }
            _ => false,
        };
        Ok(FieldType { rust, boxed })
    }

    /// Whether a value of class `from` embeds a `target` without indirection
    fn contains_directly(
        &self,
        from: &str,
        target: &str,
        seen: &mut HashSet<String>,
    ) -> UidlResult<bool> {
        if from == target {
            return Ok(true);
        }
        if !seen.insert(from.to_string()) {
            return Ok(false);
        }
        for property in self.model.all_properties(from)?.iter() {
            if let TypeRef::Named(name) = &property.ty {
                if self.model.class(name).is_some()
                    && !self.is_polymorphic(name)
                    && self.contains_directly(name, target, seen)?
                {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Rust expression for a default literal, `None` for `null`
    pub fn default_expr(&self, ty: &TypeRef, literal: &Literal) -> UidlResult<Option<String>> {
        let expr = match (literal, ty) {
            (Literal::Null, _) => return Ok(None),
            (_, TypeRef::Primitive(Primitive::Object)) => {
                let scalar = self
                    .default_expr(&json_scalar_type(literal), literal)?
                    .unwrap_or_else(|| "()".to_string());
                format!("serde_json::Value::from({})", scalar)
            }
            (Literal::String(s), _) => format!("{:?}.to_string()", s),
            (Literal::Integer(n), TypeRef::Primitive(Primitive::Float | Primitive::Double)) => {
                format!("{}.0", n)
            }
            (Literal::Integer(n), _) => n.to_string(),
            (Literal::Float(n), _) => format!("{:?}", n),
            (Literal::Bool(b), _) => b.to_string(),
            (Literal::EnumConstant { enum_name, constant }, _) => {
                format!("{}::{}", enum_name, pascal_case(constant))
            }
            (Literal::EmptyList, _) => "Vec::new()".to_string(),
            (Literal::EmptyMap, _) => "HashMap::new()".to_string(),
        };

        if !literal.fits(ty) {
            return Err(UidlError::Internal(format!(
                "default {} does not fit {}",
                literal, ty
            )));
        }
        Ok(Some(expr))
    }
}

/// Rust type of a field plus whether it is wrapped in a `Box`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub rust: String,
    pub boxed: bool,
}

impl FieldType {
    pub fn spelled(&self) -> String {
        if self.boxed {
            format!("Box<{}>", self.rust)
        } else {
            self.rust.clone()
        }
    }
}

pub fn primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::Boolean => "bool",
        Primitive::Int => "i32",
        Primitive::Long => "i64",
        Primitive::Float => "f32",
        Primitive::Double => "f64",
        Primitive::String => "String",
        Primitive::Object => "serde_json::Value",
    }
}

fn json_scalar_type(literal: &Literal) -> TypeRef {
    let p = match literal {
        Literal::Integer(_) => Primitive::Long,
        Literal::Float(_) => Primitive::Double,
        Literal::Bool(_) => Primitive::Boolean,
        _ => Primitive::String,
    };
    TypeRef::Primitive(p)
}
