//! Resolved DTO model
//!
//! Merges parsed schema files into one validated type universe and answers
//! the questions the emitter asks about it: inheritance, referenceability,
//! inherited properties and the full list of commands, events and queries.
//!
//! Inherited property lists are memoized per type in a
//! [`CopyOnWriteLeakyCache`]: the key space is the set of declared types,
//! and the emitter reads each entry many times.

pub mod naming;

use crate::cache::{CopyOnWriteLeakyCache, PublishPolicy};
use crate::error::{UidlError, UidlResult};
use crate::schema::{
    ClassDecl, Declaration, DeclarationKind, EnumDecl, InterfaceDecl, Literal, Members, Message,
    MessageKind, Property, SchemaFile, TypeRef,
};
use naming::screaming_snake_case;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct TypeEntry {
    kind: DeclarationKind,
    index: usize,
    file: String,
}

/// A command, event or query together with the declaration it belongs to
#[derive(Debug, Clone, Copy)]
pub struct OwnedMessage<'a> {
    pub owner: &'a str,
    pub owner_kind: DeclarationKind,
    pub message: &'a Message,
}

impl OwnedMessage<'_> {
    pub fn kind(&self) -> MessageKind {
        self.message.kind
    }

    /// JSON type tag, e.g. `UiRichTextEditor.imageUploadTooBig`
    pub fn type_id(&self) -> String {
        format!("{}.{}", self.owner, self.message.name)
    }

    /// Type enum constant, e.g. `UI_RICH_TEXT_EDITOR_IMAGE_UPLOAD_TOO_BIG`
    pub fn type_constant(&self) -> String {
        format!(
            "{}_{}",
            screaming_snake_case(self.owner),
            screaming_snake_case(&self.message.name)
        )
    }

    /// Generated struct name inside the owner's module, e.g. `ImageUploadTooBigEvent`
    pub fn struct_name(&self) -> String {
        format!(
            "{}{}",
            naming::pascal_case(&self.message.name),
            self.message.kind.suffix()
        )
    }
}

/// Validated set of declarations from one or more schema files
#[derive(Debug)]
pub struct DtoModel {
    package: Option<String>,
    classes: Vec<ClassDecl>,
    interfaces: Vec<InterfaceDecl>,
    enums: Vec<EnumDecl>,
    index: HashMap<String, TypeEntry>,
    properties: CopyOnWriteLeakyCache<String, Arc<Vec<Property>>>,
}

impl DtoModel {
    /// Build and validate a model with the default cache publish policy
    pub fn from_files(files: Vec<SchemaFile>) -> UidlResult<Self> {
        Self::with_policy(files, PublishPolicy::default())
    }

    /// Build and validate a model whose metadata cache uses `policy`
    pub fn with_policy(files: Vec<SchemaFile>, policy: PublishPolicy) -> UidlResult<Self> {
        let mut model = Self {
            package: None,
            classes: Vec::new(),
            interfaces: Vec::new(),
            enums: Vec::new(),
            index: HashMap::new(),
            properties: CopyOnWriteLeakyCache::with_policy(policy),
        };

        for file in files {
            if model.package.is_none() {
                model.package = file.package.clone();
            }
            for declaration in file.declarations {
                model.insert(declaration, &file.path)?;
            }
        }

        model.validate()?;
        debug!(
            "Model resolved: {} classes, {} interfaces, {} enums",
            model.classes.len(),
            model.interfaces.len(),
            model.enums.len()
        );
        Ok(model)
    }

    fn insert(&mut self, declaration: Declaration, file: &str) -> UidlResult<()> {
        let name = declaration.name().to_string();
        if let Some(existing) = self.index.get(&name) {
            return Err(UidlError::DuplicateType {
                name,
                first: existing.file.clone(),
                second: file.to_string(),
            });
        }

        let kind = declaration.kind();
        let index = match declaration {
            Declaration::Class(c) => {
                self.classes.push(c);
                self.classes.len() - 1
            }
            Declaration::Interface(i) => {
                self.interfaces.push(i);
                self.interfaces.len() - 1
            }
            Declaration::Enum(e) => {
                self.enums.push(e);
                self.enums.len() - 1
            }
        };
        trace!("Declared {} {} in {}", kind, name, file);
        self.index.insert(
            name,
            TypeEntry {
                kind,
                index,
                file: file.to_string(),
            },
        );
        Ok(())
    }

    /// Package declared by the first schema file that has one
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    pub fn interfaces(&self) -> &[InterfaceDecl] {
        &self.interfaces
    }

    pub fn enums(&self) -> &[EnumDecl] {
        &self.enums
    }

    pub fn kind_of(&self, name: &str) -> Option<DeclarationKind> {
        self.index.get(name).map(|e| e.kind)
    }

    /// Schema file a type was declared in
    pub fn file_of(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|e| e.file.as_str())
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        match self.index.get(name) {
            Some(TypeEntry {
                kind: DeclarationKind::Class,
                index,
                ..
            }) => self.classes.get(*index),
            _ => None,
        }
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceDecl> {
        match self.index.get(name) {
            Some(TypeEntry {
                kind: DeclarationKind::Interface,
                index,
                ..
            }) => self.interfaces.get(*index),
            _ => None,
        }
    }

    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        match self.index.get(name) {
            Some(TypeEntry {
                kind: DeclarationKind::Enum,
                index,
                ..
            }) => self.enums.get(*index),
            _ => None,
        }
    }

    pub fn superclass(&self, class: &ClassDecl) -> Option<&ClassDecl> {
        class.superclass.as_deref().and_then(|s| self.class(s))
    }

    /// Superclass chain starting with the direct parent
    pub fn ancestors<'a>(&'a self, class: &'a ClassDecl) -> impl Iterator<Item = &'a ClassDecl> {
        std::iter::successors(self.superclass(class), move |c| self.superclass(c))
    }

    /// Declared referenceable, or inheriting from a referenceable class
    pub fn is_referenceable(&self, class: &ClassDecl) -> bool {
        class.referenceable || self.ancestors(class).any(|c| c.referenceable)
    }

    /// The topmost referenceable class of its hierarchy; gets a `…Reference` type
    pub fn is_referenceable_base_class(&self, class: &ClassDecl) -> bool {
        self.is_referenceable(class)
            && self
                .superclass(class)
                .map_or(true, |parent| !self.is_referenceable(parent))
    }

    /// The referenceable base class whose `…Reference` type identifies `class`
    pub fn referenceable_base<'a>(&'a self, class: &'a ClassDecl) -> Option<&'a ClassDecl> {
        std::iter::once(class)
            .chain(self.ancestors(class))
            .find(|c| self.is_referenceable_base_class(c))
    }

    /// All interfaces a class or interface implements, transitively, in
    /// declaration order without duplicates
    pub fn all_interfaces(&self, name: &str) -> Vec<&InterfaceDecl> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let roots: Vec<&str> = if let Some(class) = self.class(name) {
            let mut roots: Vec<&str> = self
                .ancestors(class)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .flat_map(|c| c.interfaces.iter().map(String::as_str))
                .collect();
            roots.extend(class.interfaces.iter().map(String::as_str));
            roots
        } else if let Some(interface) = self.interface(name) {
            interface.superinterfaces.iter().map(String::as_str).collect()
        } else {
            Vec::new()
        };

        for root in roots {
            self.collect_interfaces(root, &mut seen, &mut out);
        }
        out
    }

    fn collect_interfaces<'a>(
        &'a self,
        name: &str,
        seen: &mut HashSet<String>,
        out: &mut Vec<&'a InterfaceDecl>,
    ) {
        let Some(interface) = self.interface(name) else {
            return;
        };
        if !seen.insert(interface.name.clone()) {
            return;
        }
        for parent in &interface.superinterfaces {
            self.collect_interfaces(parent, seen, out);
        }
        out.push(interface);
    }

    /// Properties of a class or interface including inherited ones.
    ///
    /// Order: superclass chain (root first), then implemented interfaces,
    /// then own. A name already inherited is not repeated.
    pub fn all_properties(&self, name: &str) -> UidlResult<Arc<Vec<Property>>> {
        // A miss copies the current map, so the superclass entry has to be
        // published before this type's computation starts
        let inherited = if self.properties.contains_key(name) {
            None
        } else {
            match self.class(name).and_then(|c| self.superclass(c)) {
                Some(parent) => Some(self.all_properties(&parent.name)?),
                None => None,
            }
        };

        self.properties.try_compute_if_absent(name.to_string(), |name| {
            self.resolve_properties(name, inherited)
        })
    }

    fn resolve_properties(
        &self,
        name: &str,
        inherited: Option<Arc<Vec<Property>>>,
    ) -> UidlResult<Arc<Vec<Property>>> {
        trace!("Resolving properties of {}", name);
        let mut props: Vec<Property> = Vec::new();

        if let Some(class) = self.class(name) {
            if let Some(parent) = self.superclass(class) {
                let parent_props = match inherited {
                    Some(props) => props,
                    None => self.all_properties(&parent.name)?,
                };
                merge_properties(&mut props, parent_props.as_slice());
            }
            for interface in self.all_interfaces(name) {
                merge_properties(&mut props, &interface.members.properties);
            }
            merge_properties(&mut props, &class.members.properties);
        } else if let Some(interface) = self.interface(name) {
            for parent in self.all_interfaces(name) {
                merge_properties(&mut props, &parent.members.properties);
            }
            merge_properties(&mut props, &interface.members.properties);
        } else {
            return Err(UidlError::UnknownType {
                name: name.to_string(),
                referenced_by: "property lookup".to_string(),
            });
        }

        Ok(Arc::new(props))
    }

    /// Properties that must be passed to the generated constructor
    pub fn required_properties(&self, name: &str) -> UidlResult<Vec<Property>> {
        Ok(self
            .all_properties(name)?
            .iter()
            .filter(|p| p.required)
            .cloned()
            .collect())
    }

    /// Cache backing [`all_properties`](Self::all_properties)
    pub fn property_cache(&self) -> &CopyOnWriteLeakyCache<String, Arc<Vec<Property>>> {
        &self.properties
    }

    fn members_of(&self, name: &str) -> Option<(&Members, DeclarationKind, &str)> {
        if let Some(c) = self.class(name) {
            Some((&c.members, DeclarationKind::Class, c.name.as_str()))
        } else {
            self.interface(name)
                .map(|i| (&i.members, DeclarationKind::Interface, i.name.as_str()))
        }
    }

    fn own_messages<'a>(
        members: &'a Members,
        owner: &'a str,
        owner_kind: DeclarationKind,
        kind: MessageKind,
    ) -> impl Iterator<Item = OwnedMessage<'a>> {
        let list = match kind {
            MessageKind::Command => &members.commands,
            MessageKind::Event => &members.events,
            MessageKind::Query => &members.queries,
        };
        list.iter().map(move |message| OwnedMessage {
            owner,
            owner_kind,
            message,
        })
    }

    /// Every declared message of `kind`: classes first, then interfaces, in source order
    pub fn messages(&self, kind: MessageKind) -> Vec<OwnedMessage<'_>> {
        let from_classes = self.classes.iter().flat_map(|c| {
            Self::own_messages(&c.members, &c.name, DeclarationKind::Class, kind)
        });
        let from_interfaces = self.interfaces.iter().flat_map(|i| {
            Self::own_messages(&i.members, &i.name, DeclarationKind::Interface, kind)
        });
        from_classes.chain(from_interfaces).collect()
    }

    pub fn commands(&self) -> Vec<OwnedMessage<'_>> {
        self.messages(MessageKind::Command)
    }

    pub fn events(&self) -> Vec<OwnedMessage<'_>> {
        self.messages(MessageKind::Event)
    }

    pub fn queries(&self) -> Vec<OwnedMessage<'_>> {
        self.messages(MessageKind::Query)
    }

    /// Messages of `kind` a class or interface understands, inherited ones first
    pub fn all_messages(&self, name: &str, kind: MessageKind) -> Vec<OwnedMessage<'_>> {
        let Some((members, owner_kind, owner)) = self.members_of(name) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        if let Some(class) = self.class(name) {
            let mut chain: Vec<&ClassDecl> = self.ancestors(class).collect();
            chain.reverse();
            for ancestor in chain {
                out.extend(Self::own_messages(
                    &ancestor.members,
                    &ancestor.name,
                    DeclarationKind::Class,
                    kind,
                ));
            }
        }
        for interface in self.all_interfaces(name) {
            out.extend(Self::own_messages(
                &interface.members,
                &interface.name,
                DeclarationKind::Interface,
                kind,
            ));
        }
        out.extend(Self::own_messages(members, owner, owner_kind, kind));
        out
    }

    pub fn all_commands(&self, name: &str) -> Vec<OwnedMessage<'_>> {
        self.all_messages(name, MessageKind::Command)
    }

    pub fn all_events(&self, name: &str) -> Vec<OwnedMessage<'_>> {
        self.all_messages(name, MessageKind::Event)
    }

    pub fn all_queries(&self, name: &str) -> Vec<OwnedMessage<'_>> {
        self.all_messages(name, MessageKind::Query)
    }

    // ---- validation ----

    fn validate(&self) -> UidlResult<()> {
        self.validate_supertypes()?;
        self.validate_class_cycles()?;
        self.validate_interface_cycles()?;

        for class in &self.classes {
            self.validate_members(&class.name, &class.members)?;
        }
        for interface in &self.interfaces {
            self.validate_members(&interface.name, &interface.members)?;
        }
        Ok(())
    }

    fn validate_supertypes(&self) -> UidlResult<()> {
        for class in &self.classes {
            if let Some(parent) = &class.superclass {
                self.expect_kind(&class.name, "extend", parent, DeclarationKind::Class)?;
            }
            for interface in &class.interfaces {
                self.expect_kind(&class.name, "implement", interface, DeclarationKind::Interface)?;
            }
        }
        for interface in &self.interfaces {
            for parent in &interface.superinterfaces {
                self.expect_kind(&interface.name, "extend", parent, DeclarationKind::Interface)?;
            }
        }
        Ok(())
    }

    fn expect_kind(
        &self,
        owner: &str,
        relation: &'static str,
        target: &str,
        expected: DeclarationKind,
    ) -> UidlResult<()> {
        match self.kind_of(target) {
            None => Err(UidlError::UnknownType {
                name: target.to_string(),
                referenced_by: owner.to_string(),
            }),
            Some(kind) if kind != expected => Err(UidlError::InvalidSupertype {
                owner: owner.to_string(),
                relation,
                target: target.to_string(),
                reason: format!(
                    "{} is {} {}, not {} {}",
                    target,
                    article(kind),
                    kind,
                    article(expected),
                    expected
                ),
            }),
            Some(_) => Ok(()),
        }
    }

    fn validate_class_cycles(&self) -> UidlResult<()> {
        for class in &self.classes {
            let mut seen = HashSet::new();
            seen.insert(class.name.as_str());
            let mut current = class;
            while let Some(parent) = self.superclass(current) {
                if !seen.insert(parent.name.as_str()) {
                    return Err(UidlError::InheritanceCycle(class.name.clone()));
                }
                current = parent;
            }
        }
        Ok(())
    }

    fn validate_interface_cycles(&self) -> UidlResult<()> {
        fn visit<'a>(
            model: &'a DtoModel,
            name: &'a str,
            path: &mut Vec<&'a str>,
            done: &mut HashSet<&'a str>,
        ) -> UidlResult<()> {
            if done.contains(name) {
                return Ok(());
            }
            if path.contains(&name) {
                return Err(UidlError::InheritanceCycle(name.to_string()));
            }
            path.push(name);
            if let Some(interface) = model.interface(name) {
                for parent in &interface.superinterfaces {
                    visit(model, parent, path, done)?;
                }
            }
            path.pop();
            done.insert(name);
            Ok(())
        }

        let mut done = HashSet::new();
        for interface in &self.interfaces {
            visit(self, &interface.name, &mut Vec::new(), &mut done)?;
        }
        Ok(())
    }

    fn validate_members(&self, owner: &str, members: &Members) -> UidlResult<()> {
        let mut names = HashSet::new();
        for (name, _) in members.names() {
            if !names.insert(name) {
                return Err(UidlError::DuplicateMember {
                    owner: owner.to_string(),
                    member: name.to_string(),
                });
            }
        }

        for ty in members.types() {
            self.validate_type(owner, ty)?;
        }

        for property in &members.properties {
            if let Some(default) = &property.default {
                if !default.fits(&property.ty) {
                    return Err(UidlError::InvalidDefault {
                        owner: owner.to_string(),
                        property: property.name.clone(),
                        reason: format!("{} is not a valid {}", default, property.ty),
                    });
                }
            }
            if let Some(Literal::EnumConstant {
                enum_name,
                constant,
            }) = &property.default
            {
                let known = self
                    .enum_decl(enum_name)
                    .is_some_and(|e| e.constants.iter().any(|c| c == constant));
                if !known {
                    return Err(UidlError::UnknownType {
                        name: format!("{}.{}", enum_name, constant),
                        referenced_by: format!("{}.{}", owner, property.name),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_type(&self, owner: &str, ty: &TypeRef) -> UidlResult<()> {
        for (name, is_reference) in ty.named_types() {
            if self.kind_of(name).is_none() {
                return Err(UidlError::UnknownType {
                    name: name.to_string(),
                    referenced_by: owner.to_string(),
                });
            }
            if is_reference && !self.class(name).is_some_and(|c| self.is_referenceable(c)) {
                return Err(UidlError::NotReferenceable {
                    name: name.to_string(),
                    referenced_by: owner.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn merge_properties(props: &mut Vec<Property>, extra: &[Property]) {
    for p in extra {
        if !props.iter().any(|existing| existing.name == p.name) {
            props.push(p.clone());
        }
    }
}

fn article(kind: DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Interface | DeclarationKind::Enum => "an",
        DeclarationKind::Class => "a",
    }
}
