// @generated by uidl. Do not edit.

use serde::{Deserialize, Serialize};

/// Every class declared in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Component,
    Label,
}

impl ObjectType {
    pub const ALL: &'static [Self] = &[Self::Component, Self::Label];

    pub fn type_id(&self) -> &'static str {
        match *self {
            Self::Component => "Component",
            Self::Label => "Label",
        }
    }
}
