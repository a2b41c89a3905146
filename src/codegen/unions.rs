//! Aggregate modules spanning the whole model: type enums, message unions,
//! the type id table and `mod.rs`

use super::emit::header;
use super::writer::CodeWriter;
use crate::model::naming::{pascal_case, snake_case};
use crate::model::{DtoModel, OwnedMessage};
use crate::schema::MessageKind;

fn preamble(w: &mut CodeWriter) {
    header(w, None);
    w.blank();
    w.line("use serde::{Deserialize, Serialize};");
    w.blank();
}

/// Variant name shared by a message's type enum entry and union arm
fn variant(message: &OwnedMessage<'_>) -> String {
    pascal_case(&message.type_constant())
}

fn message_path(message: &OwnedMessage<'_>) -> String {
    format!("super::{}::{}", snake_case(message.owner), message.struct_name())
}

/// `ObjectType`: one variant per class, named and serialized by type id
pub fn object_type(model: &DtoModel) -> String {
    let mut w = CodeWriter::new();
    preamble(&mut w);

    let names: Vec<&str> = model.classes().iter().map(|c| c.name.as_str()).collect();

    w.doc("Every class declared in the schema");
    w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]");
    w.open("pub enum ObjectType");
    for name in &names {
        w.line(format!("{},", name));
    }
    w.close();
    w.blank();

    w.open("impl ObjectType");
    let all: Vec<String> = names.iter().map(|n| format!("Self::{}", n)).collect();
    w.line(format!("pub const ALL: &'static [Self] = &[{}];", all.join(", ")));
    w.blank();
    w.open("pub fn type_id(&self) -> &'static str");
    w.open("match *self");
    for name in &names {
        w.line(format!("Self::{} => {:?},", name, name));
    }
    w.close();
    w.close();
    w.close();
    w.finish()
}

/// `EventType` / `QueryType`: one SCREAMING_SNAKE constant per message
pub fn message_type(model: &DtoModel, kind: MessageKind) -> String {
    let mut w = CodeWriter::new();
    preamble(&mut w);

    let enum_name = format!("{}Type", kind.suffix());
    let messages = model.messages(kind);

    w.doc(format!("Type constant of every {} in the schema", kind));
    w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]");
    w.open(format!("pub enum {}", enum_name));
    for message in &messages {
        w.line(format!("#[serde(rename = {:?})]", message.type_constant()));
        w.line(format!("{},", variant(message)));
    }
    w.close();
    w.blank();

    w.open(format!("impl {}", enum_name));
    let all: Vec<String> = messages
        .iter()
        .map(|m| format!("Self::{}", variant(m)))
        .collect();
    w.line(format!("pub const ALL: &'static [Self] = &[{}];", all.join(", ")));
    w.blank();
    w.open("pub fn as_str(&self) -> &'static str");
    w.open("match *self");
    for message in &messages {
        w.line(format!("Self::{} => {:?},", variant(message), message.type_constant()));
    }
    w.close();
    w.close();
    w.blank();
    w.doc("Tag of the message in [`type_ids`](super::type_ids)");
    w.open("pub fn type_id(&self) -> &'static str");
    w.open("match *self");
    for message in &messages {
        w.line(format!("Self::{} => {:?},", variant(message), message.type_id()));
    }
    w.close();
    w.close();
    w.close();
    w.finish()
}

/// `Command` / `Event` / `Query`: internally tagged union over all messages
pub fn message_union(model: &DtoModel, kind: MessageKind) -> String {
    let mut w = CodeWriter::new();
    preamble(&mut w);

    let union = kind.suffix();
    let messages = model.messages(kind);

    w.doc(format!("Any {} declared in the schema, tagged by type id", kind));
    w.line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]");
    if !messages.is_empty() {
        w.line("#[serde(tag = \"_type\")]");
    }
    w.open(format!("pub enum {}", union));
    for message in &messages {
        w.line(format!("#[serde(rename = {:?})]", message.type_id()));
        w.line(format!("{}({}),", variant(message), message_path(message)));
    }
    w.close();

    w.blank();
    w.open(format!("impl {}", union));
    w.open("pub fn type_id(&self) -> &'static str");
    w.open("match *self");
    for message in &messages {
        w.line(format!(
            "Self::{}(_) => {}::TYPE_ID,",
            variant(message),
            message_path(message)
        ));
    }
    w.close();
    w.close();

    if kind != MessageKind::Command {
        let type_enum = format!("{}Type", union);
        w.blank();
        w.open(format!(
            "pub fn {}_type(&self) -> super::{}",
            snake_case(union),
            type_enum
        ));
        w.open("match *self");
        for message in &messages {
            w.line(format!(
                "Self::{0}(_) => super::{1}::{0},",
                variant(message),
                type_enum
            ));
        }
        w.close();
        w.close();
    }
    w.close();

    for message in &messages {
        let path = message_path(message);
        w.blank();
        w.open(format!("impl From<{}> for {}", path, union));
        w.open(format!("fn from(message: {}) -> Self", path));
        w.line(format!("Self::{}(message)", variant(message)));
        w.close();
        w.close();
    }
    w.finish()
}

/// Type id to Rust path for every type that travels as JSON
pub fn type_ids(model: &DtoModel) -> String {
    let mut entries: Vec<(String, String)> = Vec::new();
    for class in model.classes() {
        entries.push((
            class.name.clone(),
            format!("{}::{}", snake_case(&class.name), class.name),
        ));
    }
    for decl in model.enums() {
        entries.push((
            decl.name.clone(),
            format!("{}::{}", snake_case(&decl.name), decl.name),
        ));
    }
    for kind in [MessageKind::Command, MessageKind::Event, MessageKind::Query] {
        for message in model.messages(kind) {
            entries.push((
                message.type_id(),
                format!("{}::{}", snake_case(message.owner), message.struct_name()),
            ));
        }
    }
    entries.sort();

    let mut w = CodeWriter::new();
    header(&mut w, None);
    w.blank();
    w.doc("`(type id, path below this package)`, sorted by type id");
    w.open_raw("pub const TYPE_IDS: &[(&str, &str)] = &[");
    for (id, path) in &entries {
        w.line(format!("({:?}, {:?}),", id, path));
    }
    w.close_with("];");
    w.blank();
    w.open("pub fn rust_path(type_id: &str) -> Option<&'static str>");
    w.line("TYPE_IDS");
    w.line("    .binary_search_by(|(id, _)| (*id).cmp(type_id))");
    w.line("    .ok()");
    w.line("    .map(|index| TYPE_IDS[index].1)");
    w.close();
    w.finish()
}

/// Public items a package `mod.rs` re-exports, by module
#[derive(Debug, Default)]
pub struct ModuleIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl ModuleIndex {
    pub fn add(&mut self, module: impl Into<String>, exports: Vec<String>) {
        self.entries.push((module.into(), exports));
    }

    pub fn render(mut self) -> String {
        self.entries.sort();

        let mut w = CodeWriter::new();
        header(&mut w, None);
        w.blank();
        for (module, _) in &self.entries {
            w.line(format!("pub mod {};", module));
        }
        w.blank();
        for (module, exports) in &self.entries {
            match exports.as_slice() {
                [] => {}
                [single] => {
                    w.line(format!("pub use {}::{};", module, single));
                }
                many => {
                    w.line(format!("pub use {}::{{{}}};", module, many.join(", ")));
                }
            }
        }
        w.finish()
    }
}

/// `mod.rs` for a directory that only contains the next package segment
pub fn parent_module(child: &str) -> String {
    let mut w = CodeWriter::new();
    header(&mut w, None);
    w.blank();
    w.line(format!("pub mod {};", child));
    w.finish()
}
